//! Character cursor over the source text.
//!
//! Tracks the byte offset together with the 1-based line and column of the
//! next character, so every token can be stamped with a [`Position`] as it
//! is scanned. Columns count characters, not bytes.

use juice_ir::Position;

#[derive(Clone, Debug)]
pub(crate) struct Cursor<'a> {
    source: &'a str,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    /// Start at `pos`, which the caller reports as `line:column`.
    ///
    /// A `pos` that is not a character boundary reads as end of input.
    pub(crate) fn new(source: &'a str, pos: usize, line: u32, column: u32) -> Self {
        Cursor {
            source,
            pos,
            line,
            column,
        }
    }

    #[inline]
    fn rest(&self) -> &'a str {
        self.source.get(self.pos..).unwrap_or("")
    }

    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character `n` positions ahead of the current one.
    #[inline]
    pub(crate) fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.rest().is_empty()
    }

    #[inline]
    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Consume one character, updating line and column.
    pub(crate) fn advance(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume characters while `pred` holds and return them.
    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.current().is_some_and(&mut pred) {
            self.advance();
        }
        self.slice_from(start)
    }

    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.pos
    }

    /// Source text between `start` and the current offset.
    #[inline]
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        self.source.get(start..self.pos).unwrap_or("")
    }

    /// Position of the next character.
    ///
    /// Offsets past `u32::MAX` saturate; [`crate::lex_with`] rejects such
    /// sources before scanning.
    #[inline]
    pub(crate) fn position(&self) -> Position {
        Position::new(
            u32::try_from(self.pos).unwrap_or(u32::MAX),
            self.line,
            self.column,
        )
    }
}
