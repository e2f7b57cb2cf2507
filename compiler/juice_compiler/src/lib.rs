//! Portable Juice compiler driver.
//!
//! Runs the whole pipeline on one in-memory unit, with no filesystem
//! access, and renders diagnostics to strings. The CLI builds on this.
//!
//! # Usage
//!
//! ```ignore
//! use juice_compiler::{compile, CompileConfig};
//!
//! let output = compile("x := 1", &CompileConfig::default())?;
//! assert_eq!(output.code, "let x = 1;\n");
//! ```
//!
//! # Architecture
//!
//! ```text
//! juice_ir, juice_parse (+ juice_lexer), juice_codegen
//!                      ↓
//!               juice_compiler  ← this crate
//!                      ↓
//!                    juicec
//! ```

mod output;
mod pipeline;

pub use output::{CompileError, CompileOutput, ErrorPhase};
pub use pipeline::{compile, CompileConfig};

use std::sync::Once;

use juice_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use juice_diagnostic::Diagnostic;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set,
/// e.g. `RUST_LOG=juice_parse=debug`. With `JUICE_LOG_TREE` also set,
/// spans are printed as an indented tree instead of flat lines.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var("JUICE_LOG_TREE").is_ok() {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}

/// Render diagnostics to a string with source context.
///
/// Produces line numbers, `^` underlines and messages, with ANSI colors
/// when `color` is [`ColorMode::Always`]. `Auto` counts as not a
/// terminal here; callers that write to a terminal pass `Always`.
pub fn render_diagnostics(
    source: &str,
    file_path: &str,
    diagnostics: &[Diagnostic],
    color: ColorMode,
) -> String {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), color, false)
        .with_source(file_path, source);
    emitter.emit_all(diagnostics);
    emitter.flush();
    String::from_utf8_lossy(&emitter.into_inner()).into_owned()
}

#[cfg(test)]
mod tests;
