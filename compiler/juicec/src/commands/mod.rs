//! Command handlers for the `juice` CLI.
//!
//! Each submodule implements one command. Shared helpers for reading
//! sources and rendering diagnostics live here in the module root.

use std::io::IsTerminal;
use std::path::Path;

use juice_diagnostic::emitter::ColorMode;
use juice_diagnostic::Diagnostic;

use crate::DriverError;

mod build;
mod debug;
mod explain;

pub use build::build_entry;
pub use debug::{lex_file, parse_file};
pub use explain::explain_error;

/// Print the JavaScript runtime every generated module expects.
pub fn print_prelude() {
    print!("{}", juice_codegen::PRELUDE);
}

/// Read a source file to a string.
pub fn read_file(path: &Path) -> Result<String, DriverError> {
    std::fs::read_to_string(path).map_err(|source| DriverError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Settle `Auto` for output written to stderr.
///
/// `NO_COLOR` turns colors off; otherwise they follow whether stderr is
/// a terminal.
pub fn resolve_color(mode: ColorMode) -> ColorMode {
    resolve_color_with(
        mode,
        std::env::var_os("NO_COLOR").is_some(),
        std::io::stderr().is_terminal(),
    )
}

fn resolve_color_with(mode: ColorMode, no_color: bool, is_tty: bool) -> ColorMode {
    match mode {
        ColorMode::Auto if !no_color && is_tty => ColorMode::Always,
        ColorMode::Auto => ColorMode::Never,
        explicit => explicit,
    }
}

/// Render one diagnostic against its source to stderr.
fn report(source: &str, path: &Path, diagnostic: Diagnostic, color: ColorMode) {
    let rendered = juice_compiler::render_diagnostics(
        source,
        &path.display().to_string(),
        &[diagnostic],
        color,
    );
    eprint!("{rendered}");
}
