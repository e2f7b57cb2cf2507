//! Juice IR - data shared by the lexer, parser and generator.
//!
//! This crate contains no behavior beyond construction helpers and
//! rendering:
//! - [`Span`] / [`Position`] for source locations
//! - [`Token`] / [`TokenKind`] for lexer output
//! - [`Operator`], [`BinaryOp`], [`UnaryOp`] and [`PostfixOp`]
//! - the syntax tree in [`ast`], with a `Display` pretty-printer

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod operators;
mod span;
mod token;

pub use ast::{
    Assignment, Block, CallArg, ElseBranch, Expr, ExprKind, For, ForIterable, Function, IdentSegment,
    Identifier, If, Impl, Import, MacroCall, Match, MatchArm, Param, Program, Range, RecordEntry,
    Statement, StatementKind, StringLiteral, StringPart, TypeAssignment, TypeConstructor,
    TypeDefinition, TypeExpr, TypeExprKind, TypeField, TypeOp,
};
pub use operators::{BinaryOp, Operator, PostfixOp, UnaryOp};
pub use span::{Position, Span, SpanError};
pub use token::{Keyword, NumberLiteral, NumberRadix, StringSegment, Token, TokenKind};

#[cfg(target_pointer_width = "64")]
static_assert_size!(Span, 24);
