//! Lexer error types.
//!
//! Every error carries the span it points at, what went wrong, what the
//! lexer was inside of at the time, and suggestions for fixing it.
//! [`LexError::to_diagnostic`] turns one into a renderable [`Diagnostic`].

use std::fmt;

use juice_diagnostic::{Diagnostic, ErrorCode};
use juice_ir::{Position, Span};

/// A lexer error with full context for diagnostic rendering.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
    /// What the lexer was scanning when the error occurred.
    pub context: LexErrorContext,
    pub suggestions: Vec<String>,
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// A character no token can start with.
    UnexpectedCharacter { found: char },
    /// A run of operator characters that is not a known operator.
    InvalidOperator { text: String },
    /// Radix prefix without digits, or a value that does not fit.
    InvalidNumber { raw: String },
    /// `\x` or `\u` not followed by enough hex digits.
    InvalidEscape { escape: String },
    /// Missing closing `"`.
    UnterminatedString,
    /// `${` without its closing `}`.
    UnterminatedInterpolation,
    /// Macro argument list without its closing `)`.
    UnterminatedMacroArgs,
    /// Macro body without its closing `}`.
    UnterminatedMacroBody,
    /// `$` not followed by a name.
    MissingTypeName,
    /// Source longer than a span can address.
    SourceTooLarge { len: usize },
}

/// Lexing context at the point of error.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum LexErrorContext {
    #[default]
    TopLevel,
    /// Inside the string literal opened at `start`.
    InsideString { start: Position },
    /// Inside the `${` opened at `start`.
    InsideInterpolation { start: Position },
    /// Inside the macro argument list opened at `start`.
    InsideMacroArgs { start: Position },
}

impl LexError {
    fn new(span: Span, kind: LexErrorKind) -> Self {
        LexError {
            span,
            kind,
            context: LexErrorContext::TopLevel,
            suggestions: Vec::new(),
        }
    }

    #[cold]
    pub fn unexpected_character(span: Span, found: char) -> Self {
        let err = Self::new(span, LexErrorKind::UnexpectedCharacter { found });
        match found {
            ';' => err.with_suggestion("statements end at the line break; remove the `;`"),
            '\'' => err.with_suggestion("strings use double quotes: `\"...\"`"),
            '`' => err.with_suggestion("strings use double quotes and `${...}` for interpolation"),
            _ => err,
        }
    }

    #[cold]
    pub fn invalid_operator(span: Span, text: impl Into<String>) -> Self {
        let text = text.into();
        let err = Self::new(span, LexErrorKind::InvalidOperator { text: text.clone() });
        match text.as_str() {
            "===" => err.with_suggestion("use `==`; it already compiles to a strict comparison"),
            "!==" => err.with_suggestion("use `!=`; it already compiles to a strict comparison"),
            "=>" => err.with_suggestion("functions are written `fn(args) { body }`"),
            _ => err.with_suggestion("separate adjacent operators with a space"),
        }
    }

    #[cold]
    pub fn invalid_number(span: Span, raw: impl Into<String>) -> Self {
        Self::new(span, LexErrorKind::InvalidNumber { raw: raw.into() })
            .with_suggestion("hex, octal and binary literals need at least one digit after `0x`, `0o` or `0b`")
    }

    #[cold]
    pub fn invalid_escape(span: Span, escape: impl Into<String>) -> Self {
        Self::new(span, LexErrorKind::InvalidEscape { escape: escape.into() })
            .with_suggestion(r"`\x` takes two hex digits and `\u` takes four")
    }

    #[cold]
    pub fn unterminated_string(span: Span) -> Self {
        Self::new(span, LexErrorKind::UnterminatedString)
            .with_context(LexErrorContext::InsideString { start: span.start })
            .with_suggestion("add closing `\"`")
    }

    #[cold]
    pub fn unterminated_interpolation(span: Span) -> Self {
        Self::new(span, LexErrorKind::UnterminatedInterpolation)
            .with_context(LexErrorContext::InsideInterpolation { start: span.start })
            .with_suggestion("add closing `}`")
    }

    #[cold]
    pub fn unterminated_macro_args(span: Span) -> Self {
        Self::new(span, LexErrorKind::UnterminatedMacroArgs)
            .with_context(LexErrorContext::InsideMacroArgs { start: span.start })
            .with_suggestion("add closing `)`")
    }

    #[cold]
    pub fn unterminated_macro_body(span: Span) -> Self {
        Self::new(span, LexErrorKind::UnterminatedMacroBody)
            .with_suggestion("add closing `}`; braces inside the body must balance or be escaped with `\\`")
    }

    #[cold]
    pub fn missing_type_name(span: Span) -> Self {
        Self::new(span, LexErrorKind::MissingTypeName)
            .with_suggestion("type names follow the sigil directly, as in `$point`")
    }

    #[cold]
    pub fn source_too_large(len: usize) -> Self {
        Self::new(Span::DUMMY, LexErrorKind::SourceTooLarge { len })
    }

    /// Replace the context, keeping an existing one if `ctx` is top level.
    #[must_use]
    pub fn with_context(mut self, ctx: LexErrorContext) -> Self {
        if ctx != LexErrorContext::TopLevel {
            self.context = ctx;
        }
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn error_code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::UnexpectedCharacter { .. } => ErrorCode::E0002,
            LexErrorKind::InvalidNumber { .. } => ErrorCode::E0003,
            LexErrorKind::InvalidOperator { .. } => ErrorCode::E0004,
            LexErrorKind::InvalidEscape { .. } => ErrorCode::E0005,
            LexErrorKind::UnterminatedInterpolation => ErrorCode::E0006,
            LexErrorKind::UnterminatedMacroArgs | LexErrorKind::UnterminatedMacroBody => {
                ErrorCode::E0007
            }
            LexErrorKind::MissingTypeName => ErrorCode::E0008,
            LexErrorKind::SourceTooLarge { .. } => ErrorCode::E9001,
        }
    }

    /// Convert into a diagnostic for rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match &self.kind {
            LexErrorKind::UnexpectedCharacter { .. } => "unexpected character",
            LexErrorKind::InvalidOperator { .. } => "not an operator",
            LexErrorKind::InvalidNumber { .. } => "invalid number",
            LexErrorKind::InvalidEscape { .. } => "invalid escape",
            LexErrorKind::UnterminatedString => "string starts here",
            LexErrorKind::UnterminatedInterpolation => "interpolation starts here",
            LexErrorKind::UnterminatedMacroArgs => "argument list starts here",
            LexErrorKind::UnterminatedMacroBody => "macro body starts here",
            LexErrorKind::MissingTypeName => "expected a type name",
            LexErrorKind::SourceTooLarge { .. } => "",
        };

        let mut diag = Diagnostic::error(self.error_code()).with_message(self.to_string());
        if !label.is_empty() {
            diag = diag.with_label(self.span, label);
        }
        match self.context {
            LexErrorContext::TopLevel => {}
            LexErrorContext::InsideString { start } => {
                diag = diag.with_note(format!("inside the string starting at {start}"));
            }
            LexErrorContext::InsideInterpolation { start } => {
                diag = diag.with_note(format!("inside the interpolation starting at {start}"));
            }
            LexErrorContext::InsideMacroArgs { start } => {
                diag = diag.with_note(format!("inside the macro arguments starting at {start}"));
            }
        }
        for suggestion in &self.suggestions {
            diag = diag.with_suggestion(suggestion.clone());
        }
        diag
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::UnexpectedCharacter { found } => {
                write!(f, "unexpected character `{}`", found.escape_debug())
            }
            LexErrorKind::InvalidOperator { text } => write!(f, "unknown operator `{text}`"),
            LexErrorKind::InvalidNumber { raw } => write!(f, "invalid number literal `{raw}`"),
            LexErrorKind::InvalidEscape { escape } => {
                write!(f, "invalid escape sequence `{escape}`")
            }
            LexErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexErrorKind::UnterminatedInterpolation => write!(f, "unterminated interpolation"),
            LexErrorKind::UnterminatedMacroArgs => write!(f, "unterminated macro arguments"),
            LexErrorKind::UnterminatedMacroBody => write!(f, "unterminated macro body"),
            LexErrorKind::MissingTypeName => write!(f, "missing type name after `$`"),
            LexErrorKind::SourceTooLarge { len } => {
                write!(f, "source is {len} bytes; at most {} are supported", u32::MAX)
            }
        }
    }
}

impl std::error::Error for LexError {}
