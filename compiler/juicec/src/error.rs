//! Errors of the command-line driver itself.
//!
//! Compile errors are reported as diagnostics; these cover everything
//! around them: files, directories and arguments.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot copy foreign module `{}` to `{}`: {source}", from.display(), to.display())]
    CopyForeign {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{}` does not name a source file", path.display())]
    InvalidEntry { path: PathBuf },

    #[error("unknown error code `{0}`")]
    UnknownErrorCode(String),

    #[error("{count} module{} failed to build", if *count == 1 { "" } else { "s" })]
    BuildFailed { count: usize },

    #[error("{0} failed")]
    Compile(juice_compiler::ErrorPhase),
}
