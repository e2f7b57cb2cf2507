//! Expressions.

use std::borrow::Cow;

use juice_ir::{
    BinaryOp, CallArg, Expr, ExprKind, IdentSegment, Identifier, MacroCall, RecordEntry,
    StringLiteral, StringPart,
};
use juice_stack::ensure_sufficient_stack;

use super::Tail;
use crate::context::Generator;
use crate::GenerationError;

impl Generator {
    pub(crate) fn expr(&mut self, expr: &Expr) -> Result<String, GenerationError> {
        ensure_sufficient_stack(|| self.expr_inner(expr))
    }

    fn expr_inner(&mut self, expr: &Expr) -> Result<String, GenerationError> {
        Ok(match &expr.kind {
            ExprKind::Number(number) if number.value.is_infinite() => "Infinity".to_string(),
            ExprKind::Number(number) => number.value.to_string(),
            ExprKind::Boolean(value) => value.to_string(),
            ExprKind::String(literal) => self.template_literal(literal)?,
            ExprKind::Identifier(ident) => self.identifier(ident)?,
            ExprKind::TypeIdentifier(name) => name.clone(),
            ExprKind::Function(function) => self.function(function)?,
            ExprKind::Block(block) => {
                let body = self.block_body(block, Tail::Return)?;
                format!("(() => {{\n{body}\n}})()")
            }
            ExprKind::List(items) | ExprKind::Tuple(items) => {
                format!("[{}]", self.expr_list(items)?)
            }
            ExprKind::Record(entries) => self.record(entries)?,
            ExprKind::If(if_node) => self.if_expression(if_node)?,
            ExprKind::Match(match_node) => self.match_expression(match_node)?,
            ExprKind::MacroCall(call) => self.macro_call(call)?,
            ExprKind::Unwrap(inner) => self.unwrap(inner)?,
            // `-2 ** 2` is a syntax error in JavaScript; `(-2) ** 2` is not.
            ExprKind::Unary { op, operand } => {
                format!("({}{})", op.as_symbol(), self.expr(operand)?)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.expr(left)?;
                let right = self.expr(right)?;
                format!("({left} {} {right})", binary_symbol(*op))
            }
            ExprKind::Postfix { op, operand } => {
                format!("{}{}", self.expr(operand)?, op.as_symbol())
            }
            ExprKind::Member { object, member } => {
                let object = self.expr(object)?;
                if member.as_simple() == Some("await") {
                    format!("(await ({object}))")
                } else {
                    let mut access = object;
                    for segment in &member.segments {
                        access.push_str(&self.accessor(segment)?);
                    }
                    format!("({access})")
                }
            }
            ExprKind::Call { target, args } => {
                let target = self.expr(target)?;
                format!("{target}({})", self.call_args(args)?)
            }
        })
    }

    pub(crate) fn expr_list(&mut self, items: &[Expr]) -> Result<String, GenerationError> {
        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            parts.push(self.expr(item)?);
        }
        Ok(parts.join(", "))
    }

    /// Named arguments are passed by position.
    fn call_args(&mut self, args: &[CallArg]) -> Result<String, GenerationError> {
        let mut parts = Vec::with_capacity(args.len());
        for arg in args {
            parts.push(self.expr(&arg.value)?);
        }
        Ok(parts.join(", "))
    }

    /// A template literal with one `${}` per interpolation.
    pub(crate) fn template_literal(
        &mut self,
        literal: &StringLiteral,
    ) -> Result<String, GenerationError> {
        let mut out = String::from("`");
        for part in &literal.parts {
            match part {
                StringPart::Raw(text) => escape_template(text, &mut out),
                StringPart::Interpolation(expr) => {
                    out.push_str("${");
                    out.push_str(&self.expr(expr)?);
                    out.push('}');
                }
            }
        }
        out.push('`');
        Ok(out)
    }

    /// `a`, `a.b`, `a[key]`. A computed segment indexes whatever precedes
    /// it, so the first segment must be a plain name.
    pub(crate) fn identifier(&mut self, ident: &Identifier) -> Result<String, GenerationError> {
        let mut segments = ident.segments.iter();
        let mut out = match segments.next() {
            Some(IdentSegment::Name(name)) => js_name(name).into_owned(),
            _ => {
                return Err(GenerationError::unsupported(
                    "a computed name with nothing to index",
                    ident.span,
                ))
            }
        };
        for segment in segments {
            out.push_str(&self.accessor(segment)?);
        }
        Ok(out)
    }

    fn accessor(&mut self, segment: &IdentSegment) -> Result<String, GenerationError> {
        Ok(match segment {
            IdentSegment::Name(name) => format!(".{}", js_name(name)),
            IdentSegment::Quoted(literal) => format!("[{}]", self.template_literal(literal)?),
            IdentSegment::Interpolation(expr) => format!("[{}]", self.expr(expr)?),
        })
    }

    fn record(&mut self, entries: &[RecordEntry]) -> Result<String, GenerationError> {
        let mut parts = Vec::with_capacity(entries.len());
        for entry in entries {
            let key = self.record_key(&entry.key)?;
            let value = self.expr(&entry.value)?;
            parts.push(format!("{key}: {value}"));
        }
        Ok(format!("{{{}}}", parts.join(", ")))
    }

    fn record_key(&mut self, key: &Expr) -> Result<String, GenerationError> {
        let ExprKind::Identifier(ident) = &key.kind else {
            return Ok(format!("[{}]", self.expr(key)?));
        };
        if let Some(name) = ident.as_simple() {
            return Ok(js_name(name).into_owned());
        }
        // `a${k}` as a key names the property "a" + k.
        let mut out = String::from("[`");
        for segment in &ident.segments {
            match segment {
                IdentSegment::Name(name) => escape_template(&js_name(name), &mut out),
                IdentSegment::Quoted(literal) => {
                    out.push_str("${");
                    out.push_str(&self.template_literal(literal)?);
                    out.push('}');
                }
                IdentSegment::Interpolation(expr) => {
                    out.push_str("${");
                    out.push_str(&self.expr(expr)?);
                    out.push('}');
                }
            }
        }
        out.push_str("`]");
        Ok(out)
    }

    /// `js!(a, b) { body }` runs `body` in an arrow function that receives
    /// `a` and `b` under their own names.
    fn macro_call(&mut self, call: &MacroCall) -> Result<String, GenerationError> {
        if call.name != "js" {
            return Err(GenerationError::unknown_macro(&call.name, call.span));
        }
        let args = match &call.args {
            Some(args) => self.expr_list(args)?,
            None => String::new(),
        };
        let body = call.body.as_deref().unwrap_or_default().trim();
        Ok(format!("(({args}) => {{\n{body}\n}})({args})"))
    }
}

fn binary_symbol(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Eq => "===",
        BinaryOp::NotEq => "!==",
        _ => op.as_symbol(),
    }
}

/// A source name as a JavaScript identifier. A trailing prime (`x'`)
/// cannot appear in one and is spelled `__prime`.
pub(crate) fn js_name(name: &str) -> Cow<'_, str> {
    if name.contains('\'') {
        Cow::Owned(name.replace('\'', "__prime"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Escape `text` for the inside of a template literal.
pub(crate) fn escape_template(text: &str, out: &mut String) {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
}
