//! Parser tests.
//!
//! - `parser`: statements, expressions and error reporting on fixed inputs
//! - `property`: generated operator chains and the render/re-parse fixed point

mod parser;
