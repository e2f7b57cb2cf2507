//! Core compilation pipeline: lex → parse → generate.
//!
//! Portable (no filesystem IO). Source comes in as `&str`; the generated
//! module comes out as a [`CompileOutput`].

use crate::output::{CompileError, CompileOutput, ErrorPhase};

/// Configuration for compiling one unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileConfig {
    /// Namespace the unit belongs to; part of every constructor tag.
    pub namespace: String,
    /// Dotted module name, unique within the namespace.
    pub module_name: String,
    /// Logical file path (used in diagnostics, not for IO).
    pub file_path: String,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            namespace: "main".to_string(),
            module_name: "main".to_string(),
            file_path: "main.juice".to_string(),
        }
    }
}

impl CompileConfig {
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn with_module_name(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = module_name.into();
        self
    }

    #[must_use]
    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = file_path.into();
        self
    }
}

/// Compile one unit to a JavaScript module.
#[tracing::instrument(level = "debug", skip(source, config), fields(
    namespace = %config.namespace,
    module = %config.module_name,
))]
pub fn compile(source: &str, config: &CompileConfig) -> Result<CompileOutput, CompileError> {
    let program = juice_parse::parse(source).map_err(|err| CompileError {
        phase: if err.lex_error.is_some() {
            ErrorPhase::Lex
        } else {
            ErrorPhase::Parse
        },
        diagnostic: err.to_diagnostic(),
    })?;

    let code = juice_codegen::generate(&config.namespace, &config.module_name, &program)
        .map_err(|err| CompileError {
            phase: ErrorPhase::Generate,
            diagnostic: err.to_diagnostic(),
        })?;

    Ok(CompileOutput { code, program })
}
