//! Source location spans.
//!
//! A span is a half-open pair of [`Position`]s. Each position carries the
//! byte offset (for slicing the source) alongside the 1-based line and
//! column (for diagnostics).

use std::fmt;

/// Error when a byte offset does not fit the `u32` position layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanError {
    /// Offset exceeds `u32::MAX`.
    OffsetTooLarge(usize),
}

impl fmt::Display for SpanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanError::OffsetTooLarge(v) => write!(
                f,
                "source offset {} (0x{:X}) exceeds u32::MAX (0x{:X})",
                v,
                v,
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for SpanError {}

/// A single point in the source text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub offset: u32,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column, counted in characters.
    pub column: u32,
}

impl Position {
    /// The first character of a document.
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };

    #[inline]
    pub const fn new(offset: u32, line: u32, column: u32) -> Self {
        Position {
            offset,
            line,
            column,
        }
    }

    /// Build a position from a `usize` byte offset.
    #[inline]
    pub fn try_new(offset: usize, line: u32, column: u32) -> Result<Self, SpanError> {
        let offset = u32::try_from(offset).map_err(|_| SpanError::OffsetTooLarge(offset))?;
        Ok(Position {
            offset,
            line,
            column,
        })
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source location span, start inclusive and end exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Dummy span for synthesized nodes.
    pub const DUMMY: Span = Span {
        start: Position::START,
        end: Position::START,
    };

    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Create a zero-length span.
    #[inline]
    pub const fn point(at: Position) -> Span {
        Span { start: at, end: at }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.offset - self.start.offset
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Check if another span is fully contained within this span.
    #[inline]
    pub fn contains_span(&self, other: Span) -> bool {
        self.start.offset <= other.start.offset && other.end.offset <= self.end.offset
    }

    /// Merge two spans to create one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        let start = if other.start.offset < self.start.offset {
            other.start
        } else {
            self.start
        };
        let end = if other.end.offset > self.end.offset {
            other.end
        } else {
            self.end
        };
        Span { start, end }
    }

    /// Extend the span so it ends at `end` (never shrinks).
    #[inline]
    #[must_use]
    pub fn extend_to(self, end: Position) -> Span {
        if end.offset > self.end.offset {
            Span {
                start: self.start,
                end,
            }
        } else {
            self
        }
    }

    /// Byte range for slicing the source text.
    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start.offset as usize..self.end.offset as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start.offset, self.end.offset)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn span(start: u32, end: u32) -> Span {
        Span::new(Position::new(start, 1, start + 1), Position::new(end, 1, end + 1))
    }

    #[test]
    fn test_span_basic() {
        let s = span(10, 20);
        assert_eq!(s.len(), 10);
        assert!(!s.is_empty());
        assert_eq!(s.to_range(), 10..20);
    }

    #[test]
    fn test_span_merge_keeps_outer_positions() {
        let merged = span(10, 20).merge(span(15, 30));
        assert_eq!(merged.start.offset, 10);
        assert_eq!(merged.end.offset, 30);
        assert_eq!(merged.end.column, 31);

        let reversed = span(15, 30).merge(span(10, 20));
        assert_eq!(reversed, merged);
    }

    #[test]
    fn test_span_contains() {
        let outer = span(0, 10);
        assert!(outer.contains_span(span(2, 5)));
        assert!(outer.contains_span(outer));
        assert!(!outer.contains_span(span(5, 11)));
    }

    #[test]
    fn test_extend_to_never_shrinks() {
        let s = span(4, 8);
        assert_eq!(s.extend_to(Position::new(6, 1, 7)), s);
        assert_eq!(s.extend_to(Position::new(12, 1, 13)).end.offset, 12);
    }

    #[test]
    fn test_display_uses_line_and_column() {
        let s = Span::new(Position::new(0, 1, 1), Position::new(14, 2, 5));
        assert_eq!(s.to_string(), "1:1-2:5");
        assert_eq!(format!("{s:?}"), "0..14");
    }

    #[test]
    fn test_try_new_rejects_huge_offsets() {
        assert!(Position::try_new(12, 1, 1).is_ok());
        if let Ok(big) = usize::try_from(u64::from(u32::MAX) + 1) {
            assert_eq!(
                Position::try_new(big, 1, 1),
                Err(SpanError::OffsetTooLarge(big))
            );
        }
    }
}
