//! Token types produced by the lexer.
//!
//! Whitespace and comments are real tokens: the parser relies on whitespace
//! adjacency to tell calls from groupings and on blank lines to end `if`
//! chains.

use std::fmt;

use crate::{Operator, Span};

/// A token with its span in the source.
#[derive(Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Create a dummy token for tests and synthesized input.
    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::DUMMY,
        }
    }

    /// Whitespace and comments carry no grammar of their own.
    #[inline]
    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace(_) | TokenKind::Comment(_))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Token kinds.
#[derive(Clone, PartialEq, Debug)]
pub enum TokenKind {
    /// End of input. Exactly one terminates every top-level token stream.
    Eof,
    /// Run of spaces, tabs and line breaks.
    Whitespace(String),
    /// `// ...` up to (not including) the line break; also a leading `#!` line.
    Comment(String),
    Identifier(String),
    /// `$name`, or any name right after the `type` keyword. Stored without sigil.
    TypeIdentifier(String),
    /// `name!`. Stored without the trailing `!`.
    MacroIdentifier(String),
    Keyword(Keyword),
    Operator(Operator),
    Boolean(bool),
    Number(NumberLiteral),
    String(Vec<StringSegment>),
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    /// `${ ... }` outside a string: a computed identifier segment.
    Interpolation(Vec<Token>),
    /// `( ... )` right after a macro identifier, re-tokenized.
    MacroArgs(Vec<Token>),
    /// `{ ... }` after a macro identifier or argument list, kept verbatim.
    MacroBody(String),
}

impl TokenKind {
    /// Human-readable description used in "expected X, found Y" messages.
    pub fn display_name(&self) -> String {
        match self {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Whitespace(_) => "whitespace".to_string(),
            TokenKind::Comment(_) => "comment".to_string(),
            TokenKind::Identifier(name) => format!("identifier `{name}`"),
            TokenKind::TypeIdentifier(name) => format!("type `${name}`"),
            TokenKind::MacroIdentifier(name) => format!("macro `{name}!`"),
            TokenKind::Keyword(kw) => format!("keyword `{}`", kw.as_str()),
            TokenKind::Operator(op) => format!("`{}`", op.as_symbol()),
            TokenKind::Boolean(value) => format!("`{value}`"),
            TokenKind::Number(number) => format!("number `{}`", number.raw),
            TokenKind::String(_) => "string".to_string(),
            TokenKind::OpenParen => "`(`".to_string(),
            TokenKind::CloseParen => "`)`".to_string(),
            TokenKind::OpenBrace => "`{`".to_string(),
            TokenKind::CloseBrace => "`}`".to_string(),
            TokenKind::OpenBracket => "`[`".to_string(),
            TokenKind::CloseBracket => "`]`".to_string(),
            TokenKind::Interpolation(_) => "interpolation".to_string(),
            TokenKind::MacroArgs(_) => "macro arguments".to_string(),
            TokenKind::MacroBody(_) => "macro body".to_string(),
        }
    }

    #[inline]
    pub fn is_operator(&self, op: Operator) -> bool {
        matches!(self, TokenKind::Operator(found) if *found == op)
    }

    #[inline]
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(found) if *found == kw)
    }
}

/// Reserved words.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Keyword {
    Fn,
    Import,
    Export,
    As,
    Type,
    If,
    Else,
    For,
    Of,
    Impl,
    Break,
    Return,
    Match,
    Static,
    Async,
    Foreign,
    Internal,
}

impl Keyword {
    pub const ALL: &[Keyword] = &[
        Keyword::Fn,
        Keyword::Import,
        Keyword::Export,
        Keyword::As,
        Keyword::Type,
        Keyword::If,
        Keyword::Else,
        Keyword::For,
        Keyword::Of,
        Keyword::Impl,
        Keyword::Break,
        Keyword::Return,
        Keyword::Match,
        Keyword::Static,
        Keyword::Async,
        Keyword::Foreign,
        Keyword::Internal,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fn => "fn",
            Self::Import => "import",
            Self::Export => "export",
            Self::As => "as",
            Self::Type => "type",
            Self::If => "if",
            Self::Else => "else",
            Self::For => "for",
            Self::Of => "of",
            Self::Impl => "impl",
            Self::Break => "break",
            Self::Return => "return",
            Self::Match => "match",
            Self::Static => "static",
            Self::Async => "async",
            Self::Foreign => "foreign",
            Self::Internal => "internal",
        }
    }

    pub fn lookup(word: &str) -> Option<Keyword> {
        Self::ALL.iter().copied().find(|kw| kw.as_str() == word)
    }
}

/// Which literal form a number was written in.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NumberRadix {
    Integer,
    Float,
    Hex,
    Octal,
    Binary,
}

/// A numeric literal: the decoded value plus the exact source text.
#[derive(Clone, PartialEq, Debug)]
pub struct NumberLiteral {
    pub value: f64,
    pub radix: NumberRadix,
    /// Source spelling, including `_` separators and any radix prefix.
    pub raw: String,
}

/// One piece of a string literal.
#[derive(Clone, PartialEq, Debug)]
pub enum StringSegment {
    /// Decoded text (escapes resolved, block strings dedented).
    Raw { text: String, span: Span },
    /// `${ ... }`, tokenized for re-parsing as an expression.
    Interpolation { tokens: Vec<Token>, span: Span },
}

impl StringSegment {
    pub fn span(&self) -> Span {
        match self {
            StringSegment::Raw { span, .. } | StringSegment::Interpolation { span, .. } => *span,
        }
    }
}
