//! Lowering from the syntax tree to JavaScript text.
//!
//! Every lowering method returns the text of its construct. Constructs
//! that belong in another section (imports, type registrations, `impl`
//! methods) emit there instead and contribute no text to the body.
//!
//! `?` needs statements placed before the statement it appears in. It
//! writes them to the anchor, and [`Generator::statement`] prepends
//! whatever its statement anchored.

mod control;
mod expr;
mod function;
pub(crate) mod runtime;
mod types;

use juice_ir::{Assignment, Block, ExprKind, Import, Program, Statement, StatementKind};
use juice_stack::ensure_sufficient_stack;
use tracing::debug;

use expr::js_name;

use crate::context::{Generator, Section};
use crate::GenerationError;

/// What happens to the value of the last statement of a block.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Tail {
    Discard,
    /// Returned from the enclosing function.
    Return,
}

impl Generator {
    /// Reset, then lower `program` as the unit `namespace.module_name`.
    pub fn generate(
        &mut self,
        namespace: &str,
        module_name: &str,
        program: &Program,
    ) -> Result<String, GenerationError> {
        self.reset(namespace, module_name);
        for statement in &program.body {
            if let Some(text) = self.statement(statement, Tail::Discard)? {
                self.emit(Section::Body, &text);
            }
        }
        Ok(self.take_output())
    }

    /// Lower one statement, preceded by anything it anchored.
    pub(crate) fn statement(
        &mut self,
        statement: &Statement,
        tail: Tail,
    ) -> Result<Option<String>, GenerationError> {
        ensure_sufficient_stack(|| {
            let (text, anchor) = self.with_fresh_anchor(|g| g.statement_text(statement, tail));
            Ok(match text? {
                Some(text) => Some(anchor + &text),
                None if anchor.is_empty() => None,
                None => Some(anchor.trim_end().to_string()),
            })
        })
    }

    fn statement_text(
        &mut self,
        statement: &Statement,
        tail: Tail,
    ) -> Result<Option<String>, GenerationError> {
        let text = match &statement.kind {
            StatementKind::Expression(expr) => {
                let value = self.expr(expr)?;
                tail_value(&value, tail)
            }
            StatementKind::If(if_node) => self.if_statement(if_node, tail)?,
            StatementKind::Match(match_node) => self.match_statement(match_node, tail)?,
            StatementKind::Assignment(assignment) => self.assignment(assignment)?,
            StatementKind::Function(function) => {
                if function.is_macro {
                    debug!(span = %statement.span, "skipping macro declaration");
                    return Ok(None);
                }
                self.function(function)?
            }
            StatementKind::For(for_node) => self.for_loop(for_node)?,
            StatementKind::Break => "break;".to_string(),
            StatementKind::Return(None) => "return;".to_string(),
            StatementKind::Return(Some(value)) => format!("return {};", self.expr(value)?),
            StatementKind::Import(import) => {
                self.import(import);
                return Ok(None);
            }
            StatementKind::TypeAssignment(declaration) => {
                self.type_declaration(declaration);
                return Ok(None);
            }
            StatementKind::Impl(impl_node) => {
                self.impl_block(impl_node)?;
                return Ok(None);
            }
            StatementKind::Export(inner) => return self.export(inner),
            StatementKind::Eof => return Ok(None),
        };
        Ok(Some(text))
    }

    /// The statements of `block`, one per line. With [`Tail::Return`] the
    /// last one returns its value if it has one.
    pub(crate) fn block_body(&mut self, block: &Block, tail: Tail) -> Result<String, GenerationError> {
        let last = block
            .statements
            .iter()
            .rposition(|statement| !matches!(statement.kind, StatementKind::Eof));
        let mut lines = Vec::with_capacity(block.statements.len());
        for (index, statement) in block.statements.iter().enumerate() {
            let tail = if Some(index) == last { tail } else { Tail::Discard };
            if let Some(text) = self.statement(statement, tail)? {
                lines.push(text);
            }
        }
        Ok(lines.join("\n"))
    }

    /// `x := v` declares; `a.b := v` and `a${k} := v` assign to an
    /// existing property.
    fn assignment(&mut self, assignment: &Assignment) -> Result<String, GenerationError> {
        let value = self.expr(&assignment.value)?;
        let target = self.expr(&assignment.target)?;
        let declares = match &assignment.target.kind {
            ExprKind::Identifier(ident) => ident.segments.len() == 1,
            ExprKind::List(_) | ExprKind::Tuple(_) | ExprKind::Record(_) => true,
            _ => false,
        };
        Ok(if declares {
            format!("let {target} = {value};")
        } else {
            format!("{target} = {value};")
        })
    }

    fn import(&mut self, import: &Import) {
        let mut module = import.path.join(".");
        if import.internal {
            module = format!("{}.{module}", self.namespace);
        }
        if import.foreign {
            module.push_str("__foreign");
        }

        if import.expose.is_empty() || import.alias.is_some() {
            let line = format!(
                "import * as {} from \"./{module}.js\";",
                js_name(import.binding_name())
            );
            self.emit(Section::Imports, &line);
        }
        if !import.expose.is_empty() {
            let line = format!(
                "import {{ {} }} from \"./{module}.js\";",
                import
                    .expose
                    .iter()
                    .map(|name| js_name(name))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            self.emit(Section::Imports, &line);
        }
    }

    fn export(&mut self, inner: &Statement) -> Result<Option<String>, GenerationError> {
        match &inner.kind {
            StatementKind::TypeAssignment(declaration) => {
                self.export_types = true;
                self.type_declaration(declaration);
                self.export_types = false;
                Ok(None)
            }
            StatementKind::Assignment(_) | StatementKind::Function(_) => Ok(self
                .statement_text(inner, Tail::Discard)?
                .map(|text| format!("export {text}"))),
            _ => Err(GenerationError::unsupported(
                "`export` of this statement",
                inner.span,
            )),
        }
    }
}

fn tail_value(value: &str, tail: Tail) -> String {
    match tail {
        Tail::Discard => format!("{value};"),
        Tail::Return => format!("return {value};"),
    }
}
