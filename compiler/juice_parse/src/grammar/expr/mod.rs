//! Expression parsing.
//!
//! Binary operators are resolved by precedence climbing over the table in
//! [`BinaryOp::precedence`]. Levels associate to the left, so the right
//! operand of an operator at level `p` is parsed at `p + 1`; reassignment
//! associates to the right and parses its right operand at `p`.
//!
//! Below the binary layer sit the prefix operators (`!`, and `-` in front
//! of a number literal), then the postfix loop (`.member`, adjacent call,
//! adjacent `?`, `++`/`--`), then primaries.

mod literals;
mod postfix;
mod primary;

use juice_diagnostic::ErrorCode;
use juice_ir::{BinaryOp, Expr, ExprKind, Operator, Span, Token, TokenKind, UnaryOp};
use juice_stack::ensure_sufficient_stack;

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression in value position.
    ///
    /// A `:=` right after it means a binding was written where a value was
    /// required (a call argument, a list item, a condition).
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_operand_chain()?;
        if self.check_operator(Operator::ColonEq) {
            return Err(statement_in_expression(
                self.current_span(),
                "a binding",
            ));
        }
        Ok(expr)
    }

    /// A full operator chain, without the value-position check; statements
    /// use this and then look at what follows.
    pub(crate) fn parse_operand_chain(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(1)
    }

    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let mut left = self.parse_unary()?;
            while let Some(op) = self.current_binary_op() {
                let precedence = op.precedence();
                if precedence < min_precedence {
                    break;
                }
                if op == BinaryOp::Assign {
                    check_reassignment_target(&left)?;
                }
                self.advance();
                let right = if op.is_right_associative() {
                    self.parse_binary(precedence)?
                } else {
                    self.parse_binary(precedence + 1)?
                };
                let span = left.span.merge(right.span);
                left = Expr::new(
                    ExprKind::Binary {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    span,
                );
            }
            Ok(left)
        })
    }

    fn current_binary_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Operator(op) => BinaryOp::from_operator(*op),
            _ => None,
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let TokenKind::Operator(op) = *self.current_kind() else {
            let primary = self.parse_primary()?;
            return self.parse_postfix(primary);
        };

        if let Some(unary) = UnaryOp::from_prefix(op) {
            let start = self.advance().span;
            let operand = ensure_sufficient_stack(|| self.parse_unary())?;
            let span = start.merge(operand.span);
            return Ok(Expr::new(
                ExprKind::Unary {
                    op: unary,
                    operand: Box::new(operand),
                },
                span,
            ));
        }

        let span = self.current_span();
        match op {
            Operator::Minus if matches!(self.cursor.peek_kind_at(1), TokenKind::Number(_)) => {
                self.advance();
                let number = self.parse_primary()?;
                let span = span.merge(number.span);
                Ok(Expr::new(
                    ExprKind::Unary {
                        op: UnaryOp::Neg,
                        operand: Box::new(number),
                    },
                    span,
                ))
            }
            Operator::DotDot => Err(ParseError::new(
                ErrorCode::E1007,
                "a range is only allowed in a `for` header",
                span,
            )
            .with_hint("write `for i of from..to { ... }`")),
            _ => Err(invalid_prefix_operator(op, span)),
        }
    }

    /// Parse a token slice carried inside another token (an interpolation)
    /// as exactly one expression.
    fn parse_nested_expr(tokens: &[Token], enclosing: Span) -> Result<Expr, ParseError> {
        let mut nested = Parser::nested(tokens, enclosing);
        let expr = nested
            .parse_expr()
            .map_err(|err| err.with_context(ErrorContext::Interpolation))?;
        if !nested.is_at_end() {
            return Err(nested
                .cursor
                .make_expect_error("`}`")
                .with_context(ErrorContext::Interpolation));
        }
        Ok(expr)
    }
}

/// Only names and member paths can be reassigned.
fn check_reassignment_target(target: &Expr) -> Result<(), ParseError> {
    match target.kind {
        ExprKind::Identifier(_) | ExprKind::Member { .. } => Ok(()),
        _ => Err(ParseError::new(
            ErrorCode::E1008,
            format!("cannot assign to `{target}`"),
            target.span,
        )
        .with_hint("only names and member paths can be reassigned with `=`")),
    }
}

#[cold]
pub(crate) fn statement_in_expression(span: Span, what: &str) -> ParseError {
    ParseError::new(
        ErrorCode::E1004,
        format!("{what} is a statement and cannot be used as a value"),
        span,
    )
}

#[cold]
fn invalid_prefix_operator(op: Operator, span: Span) -> ParseError {
    let err = ParseError::new(
        ErrorCode::E1005,
        format!("`{}` cannot start an expression", op.as_symbol()),
        span,
    );
    if op == Operator::Minus {
        err.with_hint("only number literals can be negated; write `0 - x`")
    } else {
        err
    }
}
