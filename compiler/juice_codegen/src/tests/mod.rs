//! Generator tests.
//!
//! Sources are parsed with `juice_parse` and generated for the unit
//! `test.main` unless a test needs other names.
//!
//! - `lowering`: expressions, bindings, functions, imports and exports
//! - `types`: type declarations and constructors
//! - `control`: `if`, loops, `match`, `impl` and `?`

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod lowering;

use juice_parse::parse;

use crate::{generate, GenerationError};

fn js(source: &str) -> String {
    js_in("test", "main", source)
}

fn js_in(namespace: &str, module_name: &str, source: &str) -> String {
    generate(namespace, module_name, &parse(source).unwrap()).unwrap()
}

fn error(source: &str) -> GenerationError {
    generate("test", "main", &parse(source).unwrap()).unwrap_err()
}
