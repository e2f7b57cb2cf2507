//! JavaScript generation for Juice.
//!
//! [`generate`] lowers one parsed compilation unit to an ES module. The
//! output calls into the runtime helpers defined by [`PRELUDE`], which the
//! driver writes next to the generated modules.
//!
//! # Architecture
//!
//! ```text
//! Program (juice_ir)
//!        ↓
//!    Generator        (one per unit; four section buffers + anchor)
//!        ↓
//!   imports | types | impls | body
//! ```
//!
//! Type declarations and `impl` blocks are lifted into their own sections
//! so that constructors and methods exist before the body runs.

mod context;
mod error;
mod js;

pub use context::Generator;
pub use error::{GenerationError, GenerationErrorKind};
pub use js::runtime::PRELUDE;

use juice_ir::Program;

/// Generate the JavaScript module for `program`.
///
/// `namespace` and `module_name` end up in the tag of every constructor
/// the unit declares, so they must be stable across builds.
#[tracing::instrument(level = "debug", skip(program))]
pub fn generate(
    namespace: &str,
    module_name: &str,
    program: &Program,
) -> Result<String, GenerationError> {
    Generator::new().generate(namespace, module_name, program)
}

#[cfg(test)]
mod tests;
