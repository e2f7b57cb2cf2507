//! Parse error types.
//!
//! A [`ParseError`] carries a stable [`ErrorCode`], a message naming what
//! was expected and what was found, the offending span, and optionally the
//! construct being parsed ([`ErrorContext`]) for "while parsing X" notes,
//! a related location (the opening delimiter of an unclosed block) and a
//! hint.

mod context;

pub use context::ErrorContext;

use std::fmt;

use juice_diagnostic::{Diagnostic, ErrorCode};
use juice_ir::Span;
use juice_lexer::LexError;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    /// What was being parsed when the error occurred.
    pub context: Option<ErrorContext>,
    /// A second location worth pointing at, with its label.
    pub related: Option<(Span, String)>,
    pub hint: Option<String>,
    /// Set when the error came from lexing the source.
    pub lex_error: Option<LexError>,
}

impl ParseError {
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            context: None,
            related: None,
            hint: None,
            lex_error: None,
        }
    }

    /// Keep the innermost context: an existing one is not overwritten.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        if self.context.is_none() {
            self.context = Some(context);
        }
        self
    }

    #[must_use]
    pub fn with_related(mut self, span: Span, label: impl Into<String>) -> Self {
        self.related = Some((span, label.into()));
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Convert to a full diagnostic for rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        if let Some(lex_error) = &self.lex_error {
            return lex_error.to_diagnostic();
        }
        let mut diag = Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.span, "here");
        if let Some((span, label)) = &self.related {
            diag = diag.with_secondary_label(*span, label.clone());
        }
        if let Some(context) = self.context {
            diag = diag.with_note(format!("while parsing {}", context.description()));
        }
        if let Some(hint) = &self.hint {
            diag = diag.with_suggestion(hint.clone());
        }
        diag
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            code: err.error_code(),
            message: err.to_string(),
            span: err.span,
            context: None,
            related: None,
            hint: None,
            lex_error: Some(err),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span.start)?;
        if let Some(context) = self.context {
            write!(f, " (while parsing {})", context.description())?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
