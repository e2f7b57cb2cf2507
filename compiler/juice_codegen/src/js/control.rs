//! `if`, `for`, `match` and the `?` operator.

use juice_ir::{ElseBranch, Expr, ExprKind, For, ForIterable, If, Match, MatchArm};

use super::expr::js_name;
use super::Tail;
use crate::context::Generator;
use crate::GenerationError;

impl Generator {
    pub(crate) fn if_statement(&mut self, if_node: &If, tail: Tail) -> Result<String, GenerationError> {
        let condition = self.expr(&if_node.condition)?;
        let body = self.block_body(&if_node.body, tail)?;
        let mut out = format!("if ({condition}) {{\n{body}\n}}");
        match &if_node.else_branch {
            Some(ElseBranch::If(nested)) => {
                out.push_str(" else ");
                out.push_str(&self.if_statement(nested, tail)?);
            }
            Some(ElseBranch::Block(block)) => {
                let body = self.block_body(block, tail)?;
                out.push_str(&format!(" else {{\n{body}\n}}"));
            }
            None => {}
        }
        Ok(out)
    }

    /// An `if` in value position: each branch returns its value from an
    /// immediately invoked arrow function.
    pub(crate) fn if_expression(&mut self, if_node: &If) -> Result<String, GenerationError> {
        let statement = self.if_statement(if_node, Tail::Return)?;
        Ok(format!("(() => {{\n{statement}\n}})()"))
    }

    /// The four loop shapes. A range counts from `from` towards `to`,
    /// excluding `to`, in whichever direction that is; the direction is
    /// fixed when the loop starts.
    pub(crate) fn for_loop(&mut self, for_node: &For) -> Result<String, GenerationError> {
        let Some(iterable) = &for_node.iterable else {
            let body = self.block_body(&for_node.body, Tail::Discard)?;
            return Ok(format!("while (true) {{\n{body}\n}}"));
        };

        match iterable {
            ForIterable::Expr(expr) => {
                let iterable = self.expr(expr)?;
                let binding = match &for_node.binding {
                    Some(binding) => js_name(binding).into_owned(),
                    None => self.unique_id(),
                };
                let body = self.block_body(&for_node.body, Tail::Discard)?;
                Ok(format!("for (const {binding} of {iterable}) {{\n{body}\n}}"))
            }
            ForIterable::Range(range) => {
                let from = self.expr(&range.from)?;
                let to = self.expr(&range.to)?;
                let id = self.unique_id();
                let i = match &for_node.binding {
                    Some(binding) => js_name(binding).into_owned(),
                    None => format!("{id}_i"),
                };
                let body = self.block_body(&for_node.body, Tail::Discard)?;
                Ok(format!(
                    "const {id}_from = {from};\n\
                     const {id}_to = {to};\n\
                     const {id} = {id}_from <= {id}_to;\n\
                     for (let {i} = {id}_from; ({id} ? {i} < {id}_to : {i} > {id}_to); ({id} ? {i}++ : {i}--)) {{\n\
                     {body}\n\
                     }}"
                ))
            }
        }
    }

    /// A `match` in statement position: a plain block, so `return`,
    /// `break` and `?` inside an arm act on the enclosing function or loop.
    pub(crate) fn match_statement(
        &mut self,
        match_node: &Match,
        tail: Tail,
    ) -> Result<String, GenerationError> {
        let chain = self.match_chain(match_node, tail)?;
        Ok(format!("{{\n{chain}\n}}"))
    }

    /// A `match` in value position: each arm returns its value from an
    /// immediately invoked arrow function.
    pub(crate) fn match_expression(&mut self, match_node: &Match) -> Result<String, GenerationError> {
        let chain = self.match_chain(match_node, Tail::Return)?;
        Ok(format!("(() => {{\n{chain}\n}})()"))
    }

    /// The target is evaluated once; arms are tried in order and the first
    /// whose pattern matches runs.
    fn match_chain(&mut self, match_node: &Match, tail: Tail) -> Result<String, GenerationError> {
        let target = self.expr(&match_node.target)?;
        let id = self.unique_id();

        let mut out = format!("const {id} = {target};\n");
        for arm in &match_node.arms {
            out.push_str(&self.match_arm(&id, arm, tail)?);
            out.push_str(" else ");
        }
        let fallback = match &match_node.fallback {
            Some(block) => self.block_body(block, tail)?,
            None => format!(
                "throw new Error(`No match found for ${{globalThis.juice.pretty({id})}}`);"
            ),
        };
        out.push_str(&format!("{{\n{fallback}\n}}"));
        Ok(out)
    }

    /// `ctor(a, field: b)` binds `a` to the value's first field and `b` to
    /// its `field`; any other pattern is compared as a value.
    fn match_arm(
        &mut self,
        id: &str,
        arm: &MatchArm,
        tail: Tail,
    ) -> Result<String, GenerationError> {
        let mut lines = Vec::new();
        let pattern = match &arm.pattern.kind {
            ExprKind::Call { target, args } => {
                let ctor = self.expr(target)?;
                for (index, arg) in args.iter().enumerate() {
                    let Some(binding) = arg.value.as_simple_identifier() else {
                        return Err(GenerationError::unsupported(
                            "a pattern binding that is not a name",
                            arg.span,
                        ));
                    };
                    let source = match &arg.name {
                        Some(field) => format!("{id}.{}", js_name(field)),
                        None => format!("{id}[{ctor}._params[{index}]]"),
                    };
                    lines.push(format!("let {} = {source};", js_name(binding)));
                }
                ctor
            }
            _ => self.expr(&arm.pattern)?,
        };

        let body = self.block_body(&arm.body, tail)?;
        if !body.is_empty() {
            lines.push(body);
        } else if tail == Tail::Return {
            lines.push("return;".to_string());
        }
        Ok(format!(
            "if (globalThis.juice.match({id}, {pattern})) {{\n{}\n}}",
            lines.join("\n")
        ))
    }

    /// Anchor a guard that returns a failing result from the enclosing
    /// function; the expression itself is the success payload.
    pub(crate) fn unwrap(&mut self, inner: &Expr) -> Result<String, GenerationError> {
        let value = self.expr(inner)?;
        let id = self.unique_id();
        self.push_anchor(&format!(
            "const {id} = {value};\n\
             if (!globalThis.juice.is_result_type({id})) {{\n\
             \tthrow new Error(\"Value is not a result type\");\n\
             }}\n\
             if (!globalThis.juice.is_result_ok({id})) {{\n\
             \treturn {id};\n\
             }}"
        ));
        Ok(format!("globalThis.juice.unwrap_result({id})"))
    }
}
