//! Driver for the `juice` command-line compiler.
//!
//! [`graph`] discovers and compiles every module an entry file reaches;
//! [`commands`] holds one handler per CLI command.

pub mod commands;
mod error;
pub mod graph;

pub use error::DriverError;
