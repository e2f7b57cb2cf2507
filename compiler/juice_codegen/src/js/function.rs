//! Functions and `impl` blocks.

use juice_ir::{Expr, ExprKind, Function, Identifier, Impl, Param};
use tracing::debug;

use super::expr::js_name;
use super::Tail;
use crate::context::{Generator, Section};
use crate::GenerationError;

impl Generator {
    /// `[async ]function[ name](params) { body }`, returning the value of
    /// the last statement.
    pub(crate) fn function(&mut self, function: &Function) -> Result<String, GenerationError> {
        let name = match &function.name {
            Some(name) => format!(" {}", self.identifier(name)?),
            None => String::new(),
        };
        let params = self.params(&function.params)?;
        let body = self.block_body(&function.body, Tail::Return)?;
        let prefix = if function.is_async { "async " } else { "" };
        Ok(format!("{prefix}function{name}({params}) {{\n{body}\n}}"))
    }

    fn params(&mut self, params: &[Param]) -> Result<String, GenerationError> {
        let mut parts = Vec::with_capacity(params.len());
        for param in params {
            match &param.default {
                Some(default) => {
                    let default = self.expr(default)?;
                    parts.push(format!("{} = {default}", js_name(&param.name)));
                }
                None => parts.push(js_name(&param.name).into_owned()),
            }
        }
        Ok(parts.join(", "))
    }

    /// Attach each method to the target, or to its prototype for instance
    /// methods. An instance method receives the receiver as its first
    /// argument, conventionally named `self`.
    pub(crate) fn impl_block(&mut self, impl_node: &Impl) -> Result<(), GenerationError> {
        let target = self.impl_target(&impl_node.target)?;
        if let Some(trait_name) = &impl_node.trait_name {
            debug!(%target, %trait_name, "trait has no runtime representation");
        }
        for method in &impl_node.methods {
            let name = match method.name.as_ref().and_then(Identifier::as_simple) {
                Some(name) => js_name(name).into_owned(),
                None => return Err(GenerationError::unnamed_method(method.span)),
            };
            let params = self.params(&method.params)?;
            let body = self.block_body(&method.body, Tail::Return)?;
            let inner = if method.is_async { "async function" } else { "function" };
            let text = if method.is_static {
                format!(
                    "{target}.{name} = function(...__args) {{\n\
                     \treturn ({inner} __{name}({params}) {{\n{body}\n}})(...__args);\n\
                     }}"
                )
            } else {
                format!(
                    "{target}.prototype.{name} = function(...__args) {{\n\
                     \tconst self = this;\n\
                     \treturn ({inner} __{name}({params}) {{\n{body}\n}})(self, ...__args);\n\
                     }}"
                )
            };
            self.emit(Section::Impls, &text);
        }
        Ok(())
    }

    /// The dotted path methods are attached to: `$point`, `shapes.circle`.
    fn impl_target(&mut self, target: &Expr) -> Result<String, GenerationError> {
        match &target.kind {
            ExprKind::TypeIdentifier(name) => Ok(name.clone()),
            ExprKind::Identifier(ident) => self.identifier(ident),
            ExprKind::Member { object, member } => {
                let object = self.impl_target(object)?;
                match member.as_simple() {
                    Some(name) => Ok(format!("{object}.{}", js_name(name))),
                    None => self.expr(target),
                }
            }
            ExprKind::Call { target, args } if args.is_empty() => self.impl_target(target),
            _ => self.expr(target),
        }
    }
}
