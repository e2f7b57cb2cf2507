//! Result types for the portable compiler pipeline.
//!
//! These are the interface between the pipeline and its consumers (the
//! CLI, tests). They carry everything needed to present a result without
//! exposing phase-specific error types.

use std::fmt;

use juice_diagnostic::Diagnostic;
use juice_ir::{Import, Program, StatementKind};

/// Which compilation phase produced the error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorPhase {
    Lex,
    Parse,
    Generate,
}

impl ErrorPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorPhase::Lex => "lex",
            ErrorPhase::Parse => "parse",
            ErrorPhase::Generate => "generate",
        }
    }
}

impl fmt::Display for ErrorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successfully compiled unit.
#[derive(Clone, Debug)]
pub struct CompileOutput {
    /// The generated JavaScript module.
    pub code: String,
    /// The parsed program, for callers that follow imports.
    pub program: Program,
}

impl CompileOutput {
    /// Top-level `import` statements in source order.
    pub fn imports(&self) -> impl Iterator<Item = &Import> {
        self.program
            .body
            .iter()
            .filter_map(|statement| match &statement.kind {
                StatementKind::Import(import) => Some(import),
                _ => None,
            })
    }
}

/// A failed compilation: the phase that failed and what it reported.
#[derive(Clone, Debug)]
pub struct CompileError {
    pub phase: ErrorPhase,
    pub diagnostic: Diagnostic,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error {}: {}", self.phase, self.diagnostic.code, self.diagnostic.message)
    }
}

impl std::error::Error for CompileError {}
