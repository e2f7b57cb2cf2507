//! Token cursor for navigating the token stream.
//!
//! The lexer keeps whitespace and comments; the cursor folds them into
//! [`TriviaFlags`] on the following significant token, so the grammar can
//! ask "was there a space before this `(`?" or "is there a blank line
//! before this `else`?" without walking trivia itself.
//!
//! A cursor over a nested token slice (an interpolation, a macro argument
//! list) has no `Eof` token of its own; reading past the end yields a
//! synthesized one positioned after the last token.

use bitflags::bitflags;
use juice_diagnostic::ErrorCode;
use juice_ir::{Keyword, Operator, Span, Token, TokenKind};
use tracing::trace;

use crate::ParseError;

bitflags! {
    /// What separated a significant token from the one before it.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TriviaFlags: u8 {
        /// Any whitespace or comment. Absent means the tokens touch.
        const SPACE_BEFORE = 1 << 0;
        /// At least one line break.
        const NEWLINE_BEFORE = 1 << 1;
        /// A single whitespace run holding two or more line breaks.
        const BLANK_LINE_BEFORE = 1 << 2;
    }
}

impl TriviaFlags {
    fn absorb(&mut self, trivia: &TokenKind) {
        *self |= TriviaFlags::SPACE_BEFORE;
        if let TokenKind::Whitespace(text) = trivia {
            let newlines = text.matches('\n').count();
            if newlines > 0 {
                *self |= TriviaFlags::NEWLINE_BEFORE;
            }
            if newlines > 1 {
                *self |= TriviaFlags::BLANK_LINE_BEFORE;
            }
        }
    }
}

pub struct Cursor<'a> {
    /// Significant tokens only.
    tokens: Vec<&'a Token>,
    /// Parallel to `tokens`.
    flags: Vec<TriviaFlags>,
    /// Returned once the cursor runs off the end.
    eof: Token,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(all: &'a [Token]) -> Self {
        Self::with_fallback_end(all, Span::DUMMY)
    }

    /// Cursor over `all`; if `all` is empty, end of input is reported at
    /// `fallback`.
    pub fn with_fallback_end(all: &'a [Token], fallback: Span) -> Self {
        let mut tokens = Vec::with_capacity(all.len());
        let mut flags = Vec::with_capacity(all.len());
        let mut pending = TriviaFlags::empty();
        for token in all {
            if token.is_trivia() {
                pending.absorb(&token.kind);
            } else {
                tokens.push(token);
                flags.push(pending);
                pending = TriviaFlags::empty();
            }
        }
        let end = all
            .last()
            .map_or(fallback, |token| Span::point(token.span.end));
        Cursor {
            tokens,
            flags,
            eof: Token::new(TokenKind::Eof, end),
            pos: 0,
        }
    }

    /// Index of the current significant token.
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).copied().unwrap_or(&self.eof)
    }

    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the last consumed token.
    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span,
            None => Span::point(self.current_span().start),
        }
    }

    /// Kind of the token `n` significant tokens ahead; `0` is the current one.
    pub fn peek_kind_at(&self, n: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(&self.eof.kind, |token| &token.kind)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    #[inline]
    pub fn current_flags(&self) -> TriviaFlags {
        self.flags.get(self.pos).copied().unwrap_or_default()
    }

    /// True if the current token touches the previous one.
    #[inline]
    pub fn is_adjacent(&self) -> bool {
        self.pos > 0
            && self.pos < self.tokens.len()
            && !self.current_flags().contains(TriviaFlags::SPACE_BEFORE)
    }

    #[inline]
    pub fn has_newline_before(&self) -> bool {
        self.current_flags().contains(TriviaFlags::NEWLINE_BEFORE)
    }

    #[inline]
    pub fn has_blank_line_before(&self) -> bool {
        self.current_flags().contains(TriviaFlags::BLANK_LINE_BEFORE)
    }

    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn check_operator(&self, op: Operator) -> bool {
        self.current_kind().is_operator(op)
    }

    #[inline]
    pub fn check_keyword(&self, kw: Keyword) -> bool {
        self.current_kind().is_keyword(kw)
    }

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos;
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        let token = self.tokens.get(index).copied().unwrap_or(&self.eof);
        trace!(token = ?token.kind, "advance");
        token
    }

    /// Consume the current token if it is `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn eat_operator(&mut self, op: Operator) -> bool {
        if self.check_operator(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.make_expect_error(&kind.display_name()))
        }
    }

    pub fn expect_operator(&mut self, op: Operator) -> Result<Span, ParseError> {
        if self.check_operator(op) {
            Ok(self.advance().span)
        } else {
            Err(self.make_expect_error(&format!("`{}`", op.as_symbol())))
        }
    }

    pub fn expect_keyword(&mut self, kw: Keyword) -> Result<Span, ParseError> {
        if self.check_keyword(kw) {
            Ok(self.advance().span)
        } else {
            Err(self.make_expect_error(&format!("`{}`", kw.as_str())))
        }
    }

    /// Consume a plain identifier and return its name.
    pub fn expect_ident(&mut self) -> Result<(String, Span), ParseError> {
        if let TokenKind::Identifier(name) = self.current_kind() {
            let name = name.clone();
            let span = self.advance().span;
            Ok((name, span))
        } else {
            Err(self.make_expect_error("an identifier"))
        }
    }

    /// Build the error for a failed `expect*()` call.
    ///
    /// Kept out of line so the hot path stays small.
    #[cold]
    #[inline(never)]
    pub fn make_expect_error(&self, expected: &str) -> ParseError {
        let found = self.current_kind();
        let code = if matches!(found, TokenKind::Eof) {
            ErrorCode::E1003
        } else {
            ErrorCode::E1001
        };
        ParseError::new(
            code,
            format!("expected {expected}, found {}", found.display_name()),
            self.current_span(),
        )
    }
}
