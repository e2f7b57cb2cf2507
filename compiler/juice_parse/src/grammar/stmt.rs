//! Statements.

use juice_diagnostic::ErrorCode;
use juice_ir::{
    Assignment, Expr, ExprKind, Import, Keyword, Operator, Statement, StatementKind, TokenKind,
    TypeAssignment,
};
use smallvec::SmallVec;
use tracing::debug;

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        debug!(at = %self.current_span().start, token = %self.current_kind().display_name(), "statement");
        match self.current_kind() {
            TokenKind::Keyword(Keyword::Import) => self.parse_import(),
            TokenKind::Keyword(Keyword::Export) => {
                let start = self.advance().span;
                let inner = self.parse_statement()?;
                let span = start.merge(inner.span);
                Ok(Statement::new(StatementKind::Export(Box::new(inner)), span))
            }
            // `type name := ...`: the lexer already made `name` a type identifier.
            TokenKind::Keyword(Keyword::Type) => {
                let start = self.advance().span;
                let mut inner = self.parse_statement()?;
                inner.span = start.merge(inner.span);
                Ok(inner)
            }
            TokenKind::Keyword(Keyword::Fn | Keyword::Async | Keyword::Static)
                if self.function_has_name() =>
            {
                let function = self.parse_function()?;
                let span = function.span;
                Ok(Statement::new(StatementKind::Function(function), span))
            }
            TokenKind::Keyword(Keyword::If) => {
                let if_node = self.parse_if()?;
                let span = if_node.span;
                Ok(Statement::new(StatementKind::If(if_node), span))
            }
            TokenKind::Keyword(Keyword::For) => {
                let for_node = self.parse_for()?;
                let span = for_node.span;
                Ok(Statement::new(StatementKind::For(for_node), span))
            }
            TokenKind::Keyword(Keyword::Impl) => {
                let impl_node = self.parse_impl()?;
                let span = impl_node.span;
                Ok(Statement::new(StatementKind::Impl(impl_node), span))
            }
            TokenKind::Keyword(Keyword::Match) => {
                let match_node = self.parse_match()?;
                let span = match_node.span;
                Ok(Statement::new(StatementKind::Match(match_node), span))
            }
            TokenKind::Keyword(Keyword::Break) => {
                let span = self.advance().span;
                Ok(Statement::new(StatementKind::Break, span))
            }
            TokenKind::Keyword(Keyword::Return) => self.parse_return(),
            _ => self.parse_expression_statement(),
        }
    }

    /// `return` takes a value only when one follows on the same line.
    fn parse_return(&mut self) -> Result<Statement, ParseError> {
        let start = self.advance().span;
        let ends_here = self.is_at_end()
            || self.check(&TokenKind::CloseBrace)
            || self.cursor.has_newline_before();
        if ends_here {
            return Ok(Statement::new(StatementKind::Return(None), start));
        }
        let value = self.parse_expr()?;
        let span = start.merge(value.span);
        Ok(Statement::new(StatementKind::Return(Some(value)), span))
    }

    /// An expression in statement position, which may turn out to be a
    /// binding (`x := v`, `x: $T = v`) or a type declaration (`$T := ...`).
    fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
        let target = self.parse_operand_chain()?;

        if self.check_operator(Operator::ColonEq) {
            if let Some(name) = type_declaration_name(&target) {
                let name = name.to_string();
                self.advance();
                return self.in_error_context(ErrorContext::TypeDeclaration, |p| {
                    let definition = p.parse_type_definition(&name)?;
                    let span = target.span.merge(p.previous_span());
                    Ok(Statement::new(
                        StatementKind::TypeAssignment(TypeAssignment {
                            name,
                            definition,
                            span,
                        }),
                        span,
                    ))
                });
            }
            check_binding_target(&target)?;
            self.advance();
            let value = self.parse_expr()?;
            return Ok(binding(target, None, value));
        }

        if self.check_operator(Operator::Colon) {
            check_binding_target(&target)?;
            self.advance();
            let annotation = if self.check_operator(Operator::Eq) {
                None
            } else {
                Some(self.parse_type_expr()?)
            };
            self.expect_operator(Operator::Eq)?;
            let value = self.parse_expr()?;
            return Ok(binding(target, annotation, value));
        }

        let span = target.span;
        Ok(Statement::new(StatementKind::Expression(target), span))
    }

    /// `import [foreign] [internal] a.b.c [as alias] [(x, y)]`
    fn parse_import(&mut self) -> Result<Statement, ParseError> {
        let start = self.advance().span;
        self.in_error_context(ErrorContext::Import, |p| {
            let mut foreign = false;
            let mut internal = false;
            loop {
                if p.check_keyword(Keyword::Foreign) {
                    foreign = true;
                } else if p.check_keyword(Keyword::Internal) {
                    internal = true;
                } else {
                    break;
                }
                p.advance();
            }

            let mut path = SmallVec::new();
            path.push(p.expect_ident()?.0);
            while p.eat_operator(Operator::Dot) {
                path.push(p.expect_ident()?.0);
            }

            let alias = if p.check_keyword(Keyword::As) {
                p.advance();
                Some(p.expect_ident()?.0)
            } else {
                None
            };

            let mut expose = Vec::new();
            if p.check(&TokenKind::OpenParen) && !p.cursor.has_newline_before() {
                let open = p.advance().span;
                while !p.check(&TokenKind::CloseParen) {
                    expose.push(p.expect_ident()?.0);
                    if !p.eat_operator(Operator::Comma) {
                        break;
                    }
                }
                p.expect_closing(&TokenKind::CloseParen, open)?;
            }

            let span = start.merge(p.previous_span());
            Ok(Statement::new(
                StatementKind::Import(Import {
                    path,
                    alias,
                    expose,
                    foreign,
                    internal,
                    span,
                }),
                span,
            ))
        })
    }

    /// Whether the `fn` at the cursor, after any modifiers, is named.
    fn function_has_name(&self) -> bool {
        let mut n = 0;
        while matches!(
            self.cursor.peek_kind_at(n),
            TokenKind::Keyword(Keyword::Async | Keyword::Static)
        ) {
            n += 1;
        }
        self.cursor.peek_kind_at(n).is_keyword(Keyword::Fn)
            && matches!(
                self.cursor.peek_kind_at(n + 1),
                TokenKind::Identifier(_) | TokenKind::MacroIdentifier(_)
            )
    }
}

fn binding(target: Expr, annotation: Option<juice_ir::TypeExpr>, value: Expr) -> Statement {
    let span = target.span.merge(value.span);
    Statement::new(
        StatementKind::Assignment(Assignment {
            target,
            annotation,
            value,
            span,
        }),
        span,
    )
}

/// `$T` or `$T()` on the left of `:=` declares a type.
fn type_declaration_name(target: &Expr) -> Option<&str> {
    match &target.kind {
        ExprKind::TypeIdentifier(name) => Some(name),
        ExprKind::Call { target, args } if args.is_empty() => match &target.kind {
            ExprKind::TypeIdentifier(name) => Some(name),
            _ => None,
        },
        _ => None,
    }
}

/// Names, member paths and list/tuple destructuring of names can be bound.
fn check_binding_target(target: &Expr) -> Result<(), ParseError> {
    let valid = match &target.kind {
        ExprKind::Identifier(_) | ExprKind::Member { .. } => true,
        ExprKind::List(items) | ExprKind::Tuple(items) => items
            .iter()
            .all(|item| matches!(item.kind, ExprKind::Identifier(_))),
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(invalid_binding_target(target))
    }
}

#[cold]
fn invalid_binding_target(target: &Expr) -> ParseError {
    ParseError::new(
        ErrorCode::E1008,
        format!("cannot bind a value to `{target}`"),
        target.span,
    )
    .with_hint("only names, member paths and lists of names can be bound")
}
