//! Recursive descent parser for Juice.
//!
//! One entry point, [`parse`], lexes and parses a whole compilation unit
//! into a [`Program`]. [`parse_tokens`] parses a pre-lexed stream and is
//! what nested parses (string interpolations, macro argument lists) use
//! on their token slices.
//!
//! The grammar has no statement terminators. Statements follow each other
//! until the closing `}` or end of input, and whitespace matters in three
//! places: a call needs its `(` to touch the callee, `return` takes a value
//! only on the same line, and a blank line before `else` ends an `if`.

mod cursor;
mod error;
mod grammar;

pub use cursor::{Cursor, TriviaFlags};
pub use error::{ErrorContext, ParseError};

use juice_ir::{Keyword, Operator, Program, Span, Statement, StatementKind, Token, TokenKind};
use tracing::debug;

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    /// Parser over a nested token slice that belongs to `enclosing`.
    pub(crate) fn nested(tokens: &'a [Token], enclosing: Span) -> Self {
        Parser {
            cursor: Cursor::with_fallback_end(tokens, Span::point(enclosing.end)),
        }
    }

    /// Parse statements until end of input.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let start = self.current_span().start;
        let mut body = Vec::new();
        while !self.is_at_end() {
            body.push(self.parse_statement()?);
        }
        let eof = self.current_span();
        body.push(Statement::new(StatementKind::Eof, eof));
        Ok(Program {
            body,
            span: Span::new(start, eof.end),
        })
    }

    // Cursor delegation.

    #[inline]
    fn current_kind(&self) -> &TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn check_operator(&self, op: Operator) -> bool {
        self.cursor.check_operator(op)
    }

    #[inline]
    fn check_keyword(&self, kw: Keyword) -> bool {
        self.cursor.check_keyword(kw)
    }

    #[inline]
    fn advance(&mut self) -> &Token {
        self.cursor.advance()
    }

    #[inline]
    fn eat_operator(&mut self, op: Operator) -> bool {
        self.cursor.eat_operator(op)
    }

    #[inline]
    fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        self.cursor.expect(kind)
    }

    #[inline]
    fn expect_operator(&mut self, op: Operator) -> Result<Span, ParseError> {
        self.cursor.expect_operator(op)
    }

    #[inline]
    fn expect_ident(&mut self) -> Result<(String, Span), ParseError> {
        self.cursor.expect_ident()
    }

    /// Run `f`, tagging any error it returns with `context` unless an inner
    /// production already did.
    fn in_error_context<T>(
        &mut self,
        context: ErrorContext,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        f(self).map_err(|err| err.with_context(context))
    }

    /// Consume the closing delimiter of a construct opened at `open`.
    ///
    /// Running out of input reports the opening location as well.
    fn expect_closing(
        &mut self,
        kind: &TokenKind,
        open: Span,
    ) -> Result<Span, ParseError> {
        self.expect(kind).map_err(|err| {
            if self.is_at_end() {
                err.with_related(open, "opened here")
                    .with_hint(format!("add the missing {}", kind.display_name()))
            } else {
                err
            }
        })
    }
}

/// Lex and parse a source file.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = juice_lexer::lex(source)?;
    parse_tokens(&tokens)
}

/// Parse an already lexed token stream.
pub fn parse_tokens(tokens: &[Token]) -> Result<Program, ParseError> {
    let program = Parser::new(tokens).parse_program()?;
    debug!(statements = program.body.len(), "parsed");
    Ok(program)
}

#[cfg(test)]
mod tests;
