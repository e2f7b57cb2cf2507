//! Syntax tree.
//!
//! One sum type per grammar production. Every node carries the [`Span`]
//! covering the tokens it was built from. Statement-only forms live in
//! [`StatementKind`]; everything usable as a value lives in [`ExprKind`].
//! `if` and `match` appear in both, sharing one node type.

mod display;

use smallvec::SmallVec;

use crate::{BinaryOp, NumberLiteral, PostfixOp, Span, UnaryOp};

// ─── Program and statements ───────────────────────────────────────────

/// A whole compilation unit.
#[derive(Clone, PartialEq, Debug)]
pub struct Program {
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

impl Statement {
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Statement { kind, span }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum StatementKind {
    Expression(Expr),
    Import(Import),
    Export(Box<Statement>),
    /// `x := v` or `x: $T = v`.
    Assignment(Assignment),
    /// `$T := ...`.
    TypeAssignment(TypeAssignment),
    /// A named `fn` in statement position.
    Function(Function),
    If(If),
    For(For),
    Impl(Impl),
    Break,
    Return(Option<Expr>),
    Match(Match),
    Eof,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Import {
    /// Dotted module path, `a.b.c`.
    pub path: SmallVec<[String; 4]>,
    pub alias: Option<String>,
    /// Names listed in `(a, b)`.
    pub expose: Vec<String>,
    /// Passthrough module; the compiler never reads it.
    pub foreign: bool,
    /// Path is relative to the current namespace.
    pub internal: bool,
    pub span: Span,
}

impl Import {
    /// The name the module is bound to when imported as a namespace.
    pub fn binding_name(&self) -> &str {
        match &self.alias {
            Some(alias) => alias,
            None => self.path.last().map_or("", String::as_str),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Assignment {
    pub target: Expr,
    pub annotation: Option<TypeExpr>,
    pub value: Expr,
    pub span: Span,
}

// ─── Type declarations ────────────────────────────────────────────────

#[derive(Clone, PartialEq, Debug)]
pub struct TypeAssignment {
    /// Type name, without the `$` sigil.
    pub name: String,
    pub definition: TypeDefinition,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub enum TypeDefinition {
    /// `$T := $other`: a compile-time alias with no runtime representation.
    Alias(TypeExpr),
    /// One or more constructors. A shorthand type holds exactly one,
    /// flagged `is_shorthand` and named like the type.
    Constructors(Vec<TypeConstructor>),
}

/// One variant of an algebraic type.
#[derive(Clone, PartialEq, Debug)]
pub struct TypeConstructor {
    pub name: String,
    pub fields: Vec<TypeField>,
    pub is_shorthand: bool,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub struct TypeField {
    pub name: String,
    pub ty: Option<TypeExpr>,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub enum TypeExprKind {
    /// `$name`
    Named(String),
    /// `$list($int)`
    Applied { name: String, args: Vec<TypeExpr> },
    /// `($a, $b)`
    Tuple(Vec<TypeExpr>),
    /// `$a | $b`, `$a & $b`
    Binary {
        op: TypeOp,
        left: Box<TypeExpr>,
        right: Box<TypeExpr>,
    },
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeOp {
    Union,
    Intersection,
}

impl TypeOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            TypeOp::Union => "|",
            TypeOp::Intersection => "&",
        }
    }
}

// ─── Functions and control flow ───────────────────────────────────────

#[derive(Clone, PartialEq, Debug)]
pub struct Function {
    pub name: Option<Identifier>,
    pub params: Vec<Param>,
    pub return_type: Option<TypeExpr>,
    pub body: Block,
    pub is_async: bool,
    /// `static fn` inside an `impl`: attached to the target, no `self`.
    pub is_static: bool,
    /// `fn name!(...)`: a compiler macro declaration, never emitted.
    pub is_macro: bool,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Param {
    pub name: String,
    pub ty: Option<TypeExpr>,
    pub default: Option<Expr>,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub struct If {
    pub condition: Expr,
    pub body: Block,
    pub else_branch: Option<ElseBranch>,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub enum ElseBranch {
    If(Box<If>),
    Block(Block),
}

/// `for` in all four shapes; see [`For::binding`] and [`For::iterable`].
#[derive(Clone, PartialEq, Debug)]
pub struct For {
    /// `i` in `for i of ...`.
    pub binding: Option<String>,
    /// Absent for the bare `for { }` loop.
    pub iterable: Option<ForIterable>,
    pub body: Block,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub enum ForIterable {
    Expr(Expr),
    Range(Range),
}

/// `from..to`; only valid as a `for` iterable.
#[derive(Clone, PartialEq, Debug)]
pub struct Range {
    pub from: Expr,
    pub to: Expr,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Impl {
    pub target: Expr,
    /// `$trait` in `impl $trait for target`.
    pub trait_name: Option<String>,
    pub methods: Vec<Function>,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Match {
    pub target: Expr,
    pub arms: Vec<MatchArm>,
    pub fallback: Option<Block>,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub struct MatchArm {
    pub pattern: Expr,
    pub body: Block,
    pub span: Span,
}

// ─── Expressions ──────────────────────────────────────────────────────

#[derive(Clone, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Whether this is a plain, single-name identifier.
    pub fn as_simple_identifier(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Identifier(ident) => ident.as_simple(),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    Number(NumberLiteral),
    Boolean(bool),
    String(StringLiteral),
    Identifier(Identifier),
    /// A type name used as a value (constructor namespace), without sigil.
    TypeIdentifier(String),
    Function(Box<Function>),
    /// `{ ... }` in value position.
    Block(Block),
    List(Vec<Expr>),
    Record(Vec<RecordEntry>),
    Tuple(Vec<Expr>),
    If(Box<If>),
    Match(Box<Match>),
    MacroCall(MacroCall),
    /// `expr?`: early-return the failing variant of a result.
    Unwrap(Box<Expr>),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Postfix {
        op: PostfixOp,
        operand: Box<Expr>,
    },
    Member {
        object: Box<Expr>,
        member: Identifier,
    },
    Call {
        target: Box<Expr>,
        args: Vec<CallArg>,
    },
}

/// A possibly computed name: `foo`, `foo${key}`, `"quoted"`.
#[derive(Clone, PartialEq, Debug)]
pub struct Identifier {
    pub segments: SmallVec<[IdentSegment; 1]>,
    pub span: Span,
}

impl Identifier {
    pub fn simple(name: impl Into<String>, span: Span) -> Self {
        let mut segments = SmallVec::new();
        segments.push(IdentSegment::Name(name.into()));
        Identifier { segments, span }
    }

    /// The name, if this identifier is a single plain segment.
    pub fn as_simple(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [IdentSegment::Name(name)] => Some(name),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum IdentSegment {
    Name(String),
    Quoted(StringLiteral),
    Interpolation(Box<Expr>),
}

#[derive(Clone, PartialEq, Debug)]
pub struct StringLiteral {
    pub parts: Vec<StringPart>,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub enum StringPart {
    Raw(String),
    Interpolation(Expr),
}

#[derive(Clone, PartialEq, Debug)]
pub struct RecordEntry {
    pub key: Expr,
    pub value: Expr,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub struct CallArg {
    /// `name` in `f(name: value)`.
    pub name: Option<String>,
    pub value: Expr,
    pub span: Span,
}

/// `name!(args) { body }`.
#[derive(Clone, PartialEq, Debug)]
pub struct MacroCall {
    /// Macro name without the `!`.
    pub name: String,
    pub args: Option<Vec<Expr>>,
    /// Opaque body text between the outer braces.
    pub body: Option<String>,
    pub span: Span,
}
