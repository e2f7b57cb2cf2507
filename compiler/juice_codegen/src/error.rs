//! Generation error types.

use std::fmt;

use juice_diagnostic::{Diagnostic, ErrorCode};
use juice_ir::Span;

/// A construct the generator cannot lower.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct GenerationError {
    pub span: Span,
    pub kind: GenerationErrorKind,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum GenerationErrorKind {
    /// A method inside `impl` declared without a name.
    UnnamedMethod,
    /// A macro call other than `js!`.
    UnknownMacro { name: String },
    /// A construct with no lowering where it appears.
    Unsupported { construct: &'static str },
}

impl GenerationError {
    #[cold]
    pub fn unnamed_method(span: Span) -> Self {
        GenerationError {
            span,
            kind: GenerationErrorKind::UnnamedMethod,
        }
    }

    #[cold]
    pub fn unknown_macro(name: &str, span: Span) -> Self {
        GenerationError {
            span,
            kind: GenerationErrorKind::UnknownMacro {
                name: name.to_string(),
            },
        }
    }

    #[cold]
    pub fn unsupported(construct: &'static str, span: Span) -> Self {
        GenerationError {
            span,
            kind: GenerationErrorKind::Unsupported { construct },
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self.kind {
            GenerationErrorKind::UnnamedMethod => ErrorCode::E5001,
            GenerationErrorKind::UnknownMacro { .. } => ErrorCode::E5002,
            GenerationErrorKind::Unsupported { .. } => ErrorCode::E5003,
        }
    }

    /// Convert to a full diagnostic for rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.error_code())
            .with_message(self.to_string())
            .with_label(self.span, "here");
        match &self.kind {
            GenerationErrorKind::UnnamedMethod => {
                diag.with_suggestion("give the method a name: `fn name(self) { ... }`")
            }
            GenerationErrorKind::UnknownMacro { .. } => {
                diag.with_note("`js!` is the only macro the generator implements")
            }
            GenerationErrorKind::Unsupported { .. } => diag,
        }
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            GenerationErrorKind::UnnamedMethod => write!(f, "`impl` method without a name"),
            GenerationErrorKind::UnknownMacro { name } => write!(f, "unknown macro `{name}!`"),
            GenerationErrorKind::Unsupported { construct } => {
                write!(f, "{construct} cannot be generated here")
            }
        }
    }
}

impl std::error::Error for GenerationError {}
