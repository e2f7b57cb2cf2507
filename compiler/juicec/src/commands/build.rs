//! The `build` command: compile an entry file and its imports to JavaScript.

use std::path::Path;

use juice_diagnostic::emitter::ColorMode;

use super::report;
use crate::graph::{build, BuildFailure, BuildOptions};
use crate::DriverError;

/// Build `entry` into `options.out_dir`, reporting every failed unit.
///
/// Units that compiled are written even when others fail; the result is
/// an error if any failed.
pub fn build_entry(entry: &Path, options: &BuildOptions, color: ColorMode) -> Result<(), DriverError> {
    let outcome = build(entry, options)?;

    for failure in &outcome.failures {
        match failure {
            BuildFailure::Compile {
                path,
                source,
                error,
            } => report(source, path, error.diagnostic.clone(), color),
            BuildFailure::Io(err) => eprintln!("error: {err}"),
        }
    }
    for path in &outcome.written {
        println!("wrote {}", path.display());
    }

    if outcome.is_success() {
        Ok(())
    } else {
        Err(DriverError::BuildFailed {
            count: outcome.failures.len(),
        })
    }
}
