//! Postfix forms: member access, calls, unwrap, `++`/`--`.
//!
//! A call and an unwrap both need their token to touch the operand;
//! `f (x)` is `f` followed by a parenthesized expression.

use juice_ir::{
    CallArg, Expr, ExprKind, IdentSegment, Identifier, Operator, PostfixOp, TokenKind,
};
use smallvec::SmallVec;

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    pub(super) fn parse_postfix(&mut self, mut expr: Expr) -> Result<Expr, ParseError> {
        loop {
            match self.current_kind() {
                TokenKind::Operator(Operator::Dot) => {
                    self.advance();
                    let member = self.parse_member_name()?;
                    let span = expr.span.merge(member.span);
                    expr = Expr::new(
                        ExprKind::Member {
                            object: Box::new(expr),
                            member,
                        },
                        span,
                    );
                }
                TokenKind::OpenParen if self.cursor.is_adjacent() => {
                    let args = self.parse_call_args()?;
                    let span = expr.span.merge(self.previous_span());
                    expr = Expr::new(
                        ExprKind::Call {
                            target: Box::new(expr),
                            args,
                        },
                        span,
                    );
                }
                TokenKind::Operator(Operator::Question) if self.cursor.is_adjacent() => {
                    let span = expr.span.merge(self.advance().span);
                    expr = Expr::new(ExprKind::Unwrap(Box::new(expr)), span);
                }
                TokenKind::Operator(op) if !self.cursor.has_newline_before() => {
                    let Some(op) = PostfixOp::from_operator(*op) else {
                        break;
                    };
                    let span = expr.span.merge(self.advance().span);
                    expr = Expr::new(
                        ExprKind::Postfix {
                            op,
                            operand: Box::new(expr),
                        },
                        span,
                    );
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    /// The name after `.`: an identifier (possibly computed), a quoted
    /// string, or a keyword used as a plain name.
    fn parse_member_name(&mut self) -> Result<Identifier, ParseError> {
        match self.current_kind() {
            TokenKind::Identifier(_) | TokenKind::Interpolation(_) => self.parse_identifier(),
            TokenKind::String(_) => {
                let string = self.parse_string_literal()?;
                let span = string.span;
                let mut segments = SmallVec::new();
                segments.push(IdentSegment::Quoted(string));
                Ok(Identifier { segments, span })
            }
            TokenKind::Keyword(kw) => {
                let name = kw.as_str();
                let span = self.advance().span;
                Ok(Identifier::simple(name, span))
            }
            _ => Err(self.cursor.make_expect_error("a member name")),
        }
    }

    /// `(a, name: b, )`; the cursor is on the `(`.
    fn parse_call_args(&mut self) -> Result<Vec<CallArg>, ParseError> {
        let open = self.advance().span;
        self.in_error_context(ErrorContext::CallArguments, |p| {
            let mut args = Vec::new();
            while !p.check(&TokenKind::CloseParen) && !p.is_at_end() {
                let start = p.current_span();
                let name = match p.current_kind() {
                    TokenKind::Identifier(name)
                        if p.cursor.peek_kind_at(1).is_operator(Operator::Colon) =>
                    {
                        let name = name.clone();
                        p.advance();
                        p.advance();
                        Some(name)
                    }
                    _ => None,
                };
                let value = p.parse_expr()?;
                let span = start.merge(value.span);
                args.push(CallArg { name, value, span });
                if !p.eat_operator(Operator::Comma) {
                    break;
                }
            }
            p.expect_closing(&TokenKind::CloseParen, open)?;
            Ok(args)
        })
    }
}
