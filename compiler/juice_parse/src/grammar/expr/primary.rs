//! Primary expressions.

use juice_diagnostic::ErrorCode;
use juice_ir::{Expr, ExprKind, IdentSegment, Identifier, Keyword, Span, TokenKind};
use smallvec::SmallVec;

use super::statement_in_expression;
use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(super) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let span = self.current_span();
        match self.current_kind() {
            TokenKind::Number(number) => {
                let number = number.clone();
                self.advance();
                Ok(Expr::new(ExprKind::Number(number), span))
            }
            TokenKind::Boolean(value) => {
                let value = *value;
                self.advance();
                Ok(Expr::new(ExprKind::Boolean(value), span))
            }
            TokenKind::String(_) => {
                let string = self.parse_string_literal()?;
                let span = string.span;
                Ok(Expr::new(ExprKind::String(string), span))
            }
            TokenKind::Identifier(_) | TokenKind::Interpolation(_) => {
                let ident = self.parse_identifier()?;
                let span = ident.span;
                Ok(Expr::new(ExprKind::Identifier(ident), span))
            }
            TokenKind::TypeIdentifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(Expr::new(ExprKind::TypeIdentifier(name), span))
            }
            TokenKind::Keyword(Keyword::Fn | Keyword::Async | Keyword::Static) => {
                let function = self.parse_function()?;
                let span = function.span;
                Ok(Expr::new(ExprKind::Function(Box::new(function)), span))
            }
            TokenKind::Keyword(Keyword::If) => {
                let if_node = self.parse_if()?;
                let span = if_node.span;
                Ok(Expr::new(ExprKind::If(Box::new(if_node)), span))
            }
            TokenKind::Keyword(Keyword::Match) => {
                let match_node = self.parse_match()?;
                let span = match_node.span;
                Ok(Expr::new(ExprKind::Match(Box::new(match_node)), span))
            }
            TokenKind::Keyword(
                kw @ (Keyword::Import
                | Keyword::Export
                | Keyword::Type
                | Keyword::For
                | Keyword::Impl
                | Keyword::Break
                | Keyword::Return),
            ) => {
                let what = format!("`{}`", kw.as_str());
                Err(statement_in_expression(span, &what))
            }
            TokenKind::OpenBrace => {
                if self.at_record_start() {
                    self.parse_record()
                } else {
                    let block = self.parse_block()?;
                    let span = block.span;
                    Ok(Expr::new(ExprKind::Block(block), span))
                }
            }
            TokenKind::OpenBracket => self.parse_list(),
            TokenKind::OpenParen => self.parse_group_or_tuple(),
            TokenKind::MacroIdentifier(_) => self.parse_macro_call(),
            found => Err(expected_expression(found, span)),
        }
    }

    /// An identifier with any directly following computed segments:
    /// `name`, `name${key}`, `${key}_suffix`.
    pub(crate) fn parse_identifier(&mut self) -> Result<Identifier, ParseError> {
        let start = self.current_span();
        let mut segments = SmallVec::new();
        segments.push(self.parse_identifier_segment()?);
        while self.cursor.is_adjacent()
            && matches!(
                self.current_kind(),
                TokenKind::Identifier(_) | TokenKind::Interpolation(_)
            )
        {
            segments.push(self.parse_identifier_segment()?);
        }
        Ok(Identifier {
            segments,
            span: start.merge(self.previous_span()),
        })
    }

    fn parse_identifier_segment(&mut self) -> Result<IdentSegment, ParseError> {
        match self.current_kind() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(IdentSegment::Name(name))
            }
            TokenKind::Interpolation(tokens) => {
                let tokens = tokens.clone();
                let span = self.advance().span;
                let expr = Self::parse_nested_expr(&tokens, span)?;
                Ok(IdentSegment::Interpolation(Box::new(expr)))
            }
            _ => Err(self.cursor.make_expect_error("an identifier")),
        }
    }
}

#[cold]
fn expected_expression(found: &TokenKind, span: Span) -> ParseError {
    let code = if matches!(found, TokenKind::Eof) {
        ErrorCode::E1003
    } else {
        ErrorCode::E1002
    };
    ParseError::new(
        code,
        format!("expected an expression, found {}", found.display_name()),
        span,
    )
}
