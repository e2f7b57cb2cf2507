//! Grammar Modules
//!
//! Each module extends `Parser` with methods for specific productions:
//!
//! - [`stmt`]: statements, bindings, imports and exports
//! - [`expr`]: expressions (operators, postfix forms, primaries)
//! - [`control`]: blocks, functions, `if`, `for`, `match` and `impl`
//! - [`ty`]: type expressions and type declarations
//!
//! Statement and expression parsing share one path: a statement that is
//! not introduced by a keyword is parsed as an expression first, and only
//! then does the following `:=` or `:` decide whether it was really a
//! binding or a type declaration.

mod control;
mod expr;
mod stmt;
mod ty;
