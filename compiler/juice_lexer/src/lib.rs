//! Lexer for Juice.
//!
//! Juice cannot be tokenized by a context-free scanner: a `(` right after a
//! macro identifier opens a re-tokenized argument list, a `{` after a macro
//! opens a verbatim body, and any name following the `type` keyword is a
//! type identifier. The lexer therefore looks back at the last significant
//! token it emitted before dispatching on the next character.
//!
//! Whitespace and comments are kept as tokens and, together with the final
//! [`TokenKind::Eof`], the spans of the top-level stream partition the
//! input exactly.
//!
//! Nested streams (string interpolations, `${...}` identifier segments,
//! macro arguments) are lexed by the same dispatch with their own lookback
//! and carry no `Eof` of their own.

mod cursor;
mod lex_error;

use juice_ir::{
    Keyword, NumberLiteral, NumberRadix, Operator, Position, Span, StringSegment, Token,
    TokenKind,
};
use juice_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use cursor::Cursor;
pub use lex_error::{LexError, LexErrorContext, LexErrorKind};

/// Where in a larger document the lexed text starts.
///
/// Used when re-lexing a fragment (an editor buffer slice, a REPL line) so
/// spans stay meaningful in the enclosing file.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LexOptions {
    /// Byte offset into `source` to start scanning at.
    pub offset: usize,
    /// Line reported for the first scanned character.
    pub line: u32,
    /// Column reported for the first scanned character.
    pub column: u32,
}

impl Default for LexOptions {
    fn default() -> Self {
        LexOptions {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

/// Lex a whole source file.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    lex_with(source, LexOptions::default())
}

/// Lex `source` starting at the location described by `options`.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex_with(source: &str, options: LexOptions) -> Result<Vec<Token>, LexError> {
    if u32::try_from(source.len()).is_err() {
        return Err(LexError::source_too_large(source.len()));
    }

    let mut lexer = Lexer {
        cursor: Cursor::new(source, options.offset, options.line, options.column),
        contexts: Vec::new(),
    };
    let tokens = lexer.lex_all()?;
    debug!(count = tokens.len(), "lexed");
    Ok(tokens)
}

struct Lexer<'a> {
    cursor: Cursor<'a>,
    /// Innermost construct being scanned, attached to errors.
    contexts: Vec<LexErrorContext>,
}

impl Lexer<'_> {
    fn lex_all(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        if self.cursor.starts_with("#!") {
            tokens.push(self.lex_shebang());
        }
        while !self.cursor.is_eof() {
            let token = self.lex_token(&tokens)?;
            tokens.push(token);
        }
        tokens.push(Token::new(
            TokenKind::Eof,
            Span::point(self.cursor.position()),
        ));
        Ok(tokens)
    }

    /// Lex one token. `emitted` is the stream being built, for lookback.
    fn lex_token(&mut self, emitted: &[Token]) -> Result<Token, LexError> {
        let prev = emitted
            .iter()
            .rev()
            .find(|token| !matches!(token.kind, TokenKind::Whitespace(_)))
            .map(|token| &token.kind);
        let after_macro_name = matches!(prev, Some(TokenKind::MacroIdentifier(_)));
        let after_macro_args = matches!(prev, Some(TokenKind::MacroArgs(_)));
        let after_type_keyword = prev.is_some_and(|kind| kind.is_keyword(Keyword::Type));

        let start = self.cursor.position();
        let Some(c) = self.cursor.current() else {
            return Ok(Token::new(TokenKind::Eof, Span::point(start)));
        };

        let kind = match c {
            '{' if after_macro_name || after_macro_args => self.lex_macro_body(start)?,
            '{' => self.single(TokenKind::OpenBrace),
            '}' => self.single(TokenKind::CloseBrace),
            '(' if after_macro_name => self.lex_macro_args(start)?,
            '(' => self.single(TokenKind::OpenParen),
            ')' => self.single(TokenKind::CloseParen),
            '[' => self.single(TokenKind::OpenBracket),
            ']' => self.single(TokenKind::CloseBracket),
            '/' if self.cursor.peek_nth(1) == Some('/') => self.lex_comment(),
            c if Operator::is_operator_char(c) => self.lex_operator(start)?,
            ' ' | '\t' | '\r' | '\n' => {
                let text = self.cursor.eat_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
                TokenKind::Whitespace(text.to_string())
            }
            '$' if self.cursor.peek_nth(1) == Some('{') => {
                TokenKind::Interpolation(self.lex_interpolation(start)?)
            }
            '$' => {
                self.cursor.advance();
                self.lex_type_name(start)?
            }
            c if after_type_keyword && is_ident_start(c) => self.lex_type_name(start)?,
            c if is_ident_start(c) => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(start)?,
            '"' => self.lex_string(start)?,
            other => {
                self.cursor.advance();
                let span = Span::new(start, self.cursor.position());
                return Err(self.in_context(LexError::unexpected_character(span, other)));
            }
        };

        let span = Span::new(start, self.cursor.position());
        trace!(token = %kind.display_name(), %span, "token");
        Ok(Token::new(kind, span))
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }

    fn in_context(&self, err: LexError) -> LexError {
        err.with_context(self.contexts.last().copied().unwrap_or_default())
    }

    /// `#!` on the very first line is kept as a comment.
    fn lex_shebang(&mut self) -> Token {
        let start = self.cursor.position();
        let text = self.cursor.eat_while(|c| c != '\n');
        Token::new(
            TokenKind::Comment(text.to_string()),
            Span::new(start, self.cursor.position()),
        )
    }

    fn lex_comment(&mut self) -> TokenKind {
        self.cursor.advance();
        self.cursor.advance();
        let text = self.cursor.eat_while(|c| c != '\n');
        TokenKind::Comment(text.to_string())
    }

    /// Greedily take operator characters, then look the run up.
    ///
    /// A `//` inside the run starts a comment and ends the operator.
    fn lex_operator(&mut self, start: Position) -> Result<TokenKind, LexError> {
        let begin = self.cursor.offset();
        while let Some(c) = self.cursor.current() {
            let starts_comment = c == '/' && self.cursor.peek_nth(1) == Some('/');
            if !Operator::is_operator_char(c) || starts_comment {
                break;
            }
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(begin);
        match Operator::from_symbol(text) {
            Some(op) => Ok(TokenKind::Operator(op)),
            None => {
                let span = Span::new(start, self.cursor.position());
                Err(self.in_context(LexError::invalid_operator(span, text)))
            }
        }
    }

    fn lex_identifier(&mut self) -> TokenKind {
        let name = self.cursor.eat_while(is_ident_continue).to_string();

        // `name!` is a macro, but `name!=` is a comparison.
        if self.cursor.current() == Some('!') && self.cursor.peek_nth(1) != Some('=') {
            self.cursor.advance();
            return TokenKind::MacroIdentifier(name);
        }

        // A trailing prime makes a distinct plain identifier, even for keywords.
        if self.cursor.current() == Some('\'') {
            self.cursor.advance();
            return TokenKind::Identifier(format!("{name}'"));
        }

        match name.as_str() {
            "true" => TokenKind::Boolean(true),
            "false" => TokenKind::Boolean(false),
            _ => match Keyword::lookup(&name) {
                Some(kw) => TokenKind::Keyword(kw),
                None => TokenKind::Identifier(name),
            },
        }
    }

    /// Name of a type identifier; the `$` sigil, if any, is already consumed.
    fn lex_type_name(&mut self, start: Position) -> Result<TokenKind, LexError> {
        let name = self.cursor.eat_while(is_ident_continue);
        if name.is_empty() {
            let span = Span::new(start, self.cursor.position());
            return Err(self.in_context(LexError::missing_type_name(span)));
        }
        Ok(TokenKind::TypeIdentifier(name.to_string()))
    }

    fn lex_number(&mut self, start: Position) -> Result<TokenKind, LexError> {
        let begin = self.cursor.offset();
        let mut radix = NumberRadix::Integer;
        if self.cursor.current() == Some('0') {
            let prefixed = match self.cursor.peek_nth(1) {
                Some('x') => Some(NumberRadix::Hex),
                Some('o') => Some(NumberRadix::Octal),
                Some('b') => Some(NumberRadix::Binary),
                _ => None,
            };
            if let Some(prefixed) = prefixed {
                radix = prefixed;
                self.cursor.advance();
                self.cursor.advance();
            }
        }

        let mut digits = String::new();
        loop {
            match self.cursor.current() {
                Some(c) if is_radix_digit(radix, c) => {
                    digits.push(c);
                    self.cursor.advance();
                }
                // Separators only count between digits.
                Some('_')
                    if !digits.is_empty()
                        && self
                            .cursor
                            .peek_nth(1)
                            .is_some_and(|c| is_radix_digit(radix, c)) =>
                {
                    self.cursor.advance();
                }
                Some('.')
                    if radix == NumberRadix::Integer
                        && self.cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) =>
                {
                    radix = NumberRadix::Float;
                    digits.push('.');
                    self.cursor.advance();
                }
                _ => break,
            }
        }

        let raw = self.cursor.slice_from(begin);
        let value = match radix {
            NumberRadix::Integer | NumberRadix::Float => digits.parse::<f64>().ok(),
            NumberRadix::Hex => parse_radix(&digits, 16),
            NumberRadix::Octal => parse_radix(&digits, 8),
            NumberRadix::Binary => parse_radix(&digits, 2),
        };
        match value {
            Some(value) => Ok(TokenKind::Number(NumberLiteral {
                value,
                radix,
                raw: raw.to_string(),
            })),
            None => {
                let span = Span::new(start, self.cursor.position());
                Err(self.in_context(LexError::invalid_number(span, raw)))
            }
        }
    }

    fn lex_string(&mut self, start: Position) -> Result<TokenKind, LexError> {
        self.contexts.push(LexErrorContext::InsideString { start });
        let result = self.lex_string_segments(start);
        self.contexts.pop();
        result.map(TokenKind::String)
    }

    fn lex_string_segments(&mut self, start: Position) -> Result<Vec<StringSegment>, LexError> {
        self.cursor.advance();
        let mut segments: Vec<StringSegment> = Vec::new();

        loop {
            match self.cursor.current() {
                None => {
                    let span = Span::new(start, self.cursor.position());
                    return Err(LexError::unterminated_string(span));
                }
                Some('"') => {
                    self.cursor.advance();
                    break;
                }
                Some('$') if self.cursor.peek_nth(1) == Some('{') => {
                    let seg_start = self.cursor.position();
                    let tokens = self.lex_interpolation(seg_start)?;
                    let seg_end = self.cursor.position();
                    segments.push(StringSegment::Interpolation {
                        tokens,
                        span: Span::new(seg_start, seg_end),
                    });
                    segments.push(StringSegment::Raw {
                        text: String::new(),
                        span: Span::point(seg_end),
                    });
                }
                Some(_) => {
                    let char_start = self.cursor.position();
                    let c = self.lex_string_char()?;
                    let char_end = self.cursor.position();
                    if let Some(StringSegment::Raw { text, span }) = segments.last_mut() {
                        text.push(c);
                        *span = span.extend_to(char_end);
                    } else {
                        segments.push(StringSegment::Raw {
                            text: c.to_string(),
                            span: Span::new(char_start, char_end),
                        });
                    }
                }
            }
        }

        // Decided on decoded text, so an escaped `\n` opens a block too.
        let is_block = matches!(
            segments.first(),
            Some(StringSegment::Raw { text, .. }) if text.starts_with('\n')
        );
        if is_block {
            dedent_block(&mut segments);
        }
        Ok(segments)
    }

    /// One decoded character of string content.
    fn lex_string_char(&mut self) -> Result<char, LexError> {
        let start = self.cursor.position();
        let Some(c) = self.cursor.advance() else {
            return Err(LexError::unterminated_string(Span::point(start)));
        };
        if c != '\\' {
            return Ok(c);
        }
        let Some(escaped) = self.cursor.advance() else {
            return Err(self.in_context(LexError::unterminated_string(Span::new(
                start,
                self.cursor.position(),
            ))));
        };
        match escaped {
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            'x' => self.lex_hex_escape(start, 'x', 2),
            'u' => self.lex_hex_escape(start, 'u', 4),
            other => Ok(other),
        }
    }

    fn lex_hex_escape(&mut self, start: Position, marker: char, len: usize) -> Result<char, LexError> {
        let mut hex = String::with_capacity(len);
        for _ in 0..len {
            match self.cursor.current() {
                Some(c) if c.is_ascii_hexdigit() => {
                    hex.push(c);
                    self.cursor.advance();
                }
                _ => break,
            }
        }
        let decoded = (hex.len() == len)
            .then(|| u32::from_str_radix(&hex, 16).ok())
            .flatten()
            .and_then(char::from_u32);
        decoded.ok_or_else(|| {
            let span = Span::new(start, self.cursor.position());
            self.in_context(LexError::invalid_escape(span, format!("\\{marker}{hex}")))
        })
    }

    /// `${ ... }`: lex until the matching `}` and return the inner tokens.
    fn lex_interpolation(&mut self, start: Position) -> Result<Vec<Token>, LexError> {
        self.cursor.advance();
        self.cursor.advance();
        self.contexts
            .push(LexErrorContext::InsideInterpolation { start });
        let result = ensure_sufficient_stack(|| {
            self.lex_nested(TokenKind::OpenBrace, TokenKind::CloseBrace, || {
                LexError::unterminated_interpolation(Span::point(start))
            })
        });
        self.contexts.pop();
        result
    }

    /// `( ... )` after a macro name, re-tokenized.
    fn lex_macro_args(&mut self, start: Position) -> Result<TokenKind, LexError> {
        self.cursor.advance();
        self.contexts.push(LexErrorContext::InsideMacroArgs { start });
        let result = ensure_sufficient_stack(|| {
            self.lex_nested(TokenKind::OpenParen, TokenKind::CloseParen, || {
                LexError::unterminated_macro_args(Span::point(start))
            })
        });
        self.contexts.pop();
        result.map(TokenKind::MacroArgs)
    }

    /// Lex tokens until the `close` that balances an already consumed `open`.
    fn lex_nested(
        &mut self,
        open: TokenKind,
        close: TokenKind,
        unterminated: impl Fn() -> LexError,
    ) -> Result<Vec<Token>, LexError> {
        let mut nested = Vec::new();
        let mut depth = 1usize;
        loop {
            if self.cursor.is_eof() {
                let err = unterminated();
                let span = err.span.extend_to(self.cursor.position());
                return Err(LexError { span, ..err });
            }
            let token = self.lex_token(&nested)?;
            if token.kind == open {
                depth += 1;
            } else if token.kind == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(nested);
                }
            }
            nested.push(token);
        }
    }

    /// `{ ... }` after a macro: raw text with balanced braces.
    ///
    /// A backslash keeps the following character, so `\}` does not close.
    fn lex_macro_body(&mut self, start: Position) -> Result<TokenKind, LexError> {
        self.cursor.advance();
        let mut body = String::new();
        let mut depth = 1usize;
        loop {
            let Some(c) = self.cursor.advance() else {
                let span = Span::new(start, self.cursor.position());
                return Err(self.in_context(LexError::unterminated_macro_body(span)));
            };
            match c {
                '\\' => {
                    body.push(c);
                    if let Some(next) = self.cursor.advance() {
                        body.push(next);
                    }
                }
                '{' => {
                    depth += 1;
                    body.push(c);
                }
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(TokenKind::MacroBody(body));
                    }
                    body.push(c);
                }
                _ => body.push(c),
            }
        }
    }
}

#[inline]
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_radix_digit(radix: NumberRadix, c: char) -> bool {
    match radix {
        NumberRadix::Integer | NumberRadix::Float => c.is_ascii_digit(),
        NumberRadix::Hex => c.is_ascii_hexdigit(),
        NumberRadix::Octal => matches!(c, '0'..='7'),
        NumberRadix::Binary => matches!(c, '0' | '1'),
    }
}

#[allow(clippy::cast_precision_loss, reason = "Juice numbers are doubles")]
fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    if let Ok(value) = u64::from_str_radix(digits, radix) {
        return Some(value as f64);
    }
    // Past `u64::MAX` the literal is still a (rounded) double.
    digits.chars().try_fold(0.0_f64, |value, c| {
        c.to_digit(radix)
            .map(|digit| value * f64::from(radix) + f64::from(digit))
    })
}

/// Block strings open with a line break. Drop it, strip each following
/// line's indentation and optional `|` margin, and drop the closing line.
fn dedent_block(segments: &mut [StringSegment]) {
    let last = segments.len().saturating_sub(1);
    for (index, segment) in segments.iter_mut().enumerate() {
        let StringSegment::Raw { text, .. } = segment else {
            continue;
        };
        let mut lines = text.split('\n');
        let mut out = lines.next().unwrap_or_default().to_string();
        let mut rest: Vec<&str> = lines.map(strip_margin).collect();
        if index == last {
            rest.pop();
        }
        for line in rest {
            out.push('\n');
            out.push_str(line);
        }
        *text = out;
    }
    if let Some(StringSegment::Raw { text, .. }) = segments.first_mut() {
        if text.starts_with('\n') {
            text.remove(0);
        }
    }
}

fn strip_margin(line: &str) -> &str {
    let line = line.trim_start_matches([' ', '\t']);
    match line.strip_prefix('|') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    }
}

#[cfg(test)]
mod tests;
