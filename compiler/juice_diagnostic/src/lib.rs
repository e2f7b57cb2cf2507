//! Diagnostic system for error reporting.
//!
//! Every phase error converts into a [`Diagnostic`]:
//! - an [`ErrorCode`] for searchability (`juice explain E1001`)
//! - a message saying what went wrong
//! - labeled spans saying where
//! - notes and help lines saying why and how to fix it
//!
//! Rendering lives in [`emitter`].

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
