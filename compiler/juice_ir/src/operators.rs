//! Operators.
//!
//! [`Operator`] is the fixed lexical table: every operator token the lexer
//! may produce. [`BinaryOp`], [`UnaryOp`] and [`PostfixOp`] are the subsets
//! that survive into the syntax tree.

use std::fmt;

/// Every operator spelling the lexer accepts.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator {
    ColonEq,
    Eq,
    Colon,
    Comma,
    Dot,
    At,
    Hash,
    Bang,
    Question,
    Amp,
    Pipe,
    AmpAmp,
    PipePipe,
    Arrow,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar,
    PlusPlus,
    MinusMinus,
    GtEq,
    LtEq,
    EqEq,
    BangEq,
    Gt,
    Lt,
    Caret,
    DotDot,
}

impl Operator {
    /// The complete operator table.
    pub const ALL: &[Operator] = &[
        Operator::ColonEq,
        Operator::Eq,
        Operator::Colon,
        Operator::Comma,
        Operator::Dot,
        Operator::At,
        Operator::Hash,
        Operator::Bang,
        Operator::Question,
        Operator::Amp,
        Operator::Pipe,
        Operator::AmpAmp,
        Operator::PipePipe,
        Operator::Arrow,
        Operator::Plus,
        Operator::Minus,
        Operator::Star,
        Operator::Slash,
        Operator::Percent,
        Operator::StarStar,
        Operator::PlusPlus,
        Operator::MinusMinus,
        Operator::GtEq,
        Operator::LtEq,
        Operator::EqEq,
        Operator::BangEq,
        Operator::Gt,
        Operator::Lt,
        Operator::Caret,
        Operator::DotDot,
    ];

    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::ColonEq => ":=",
            Self::Eq => "=",
            Self::Colon => ":",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::At => "@",
            Self::Hash => "#",
            Self::Bang => "!",
            Self::Question => "?",
            Self::Amp => "&",
            Self::Pipe => "|",
            Self::AmpAmp => "&&",
            Self::PipePipe => "||",
            Self::Arrow => "->",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::StarStar => "**",
            Self::PlusPlus => "++",
            Self::MinusMinus => "--",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
            Self::EqEq => "==",
            Self::BangEq => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Caret => "^",
            Self::DotDot => "..",
        }
    }

    /// Look up an operator by its exact spelling.
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        Self::ALL.iter().copied().find(|op| op.as_symbol() == symbol)
    }

    /// Whether `c` may appear inside an operator run.
    #[inline]
    pub const fn is_operator_char(c: char) -> bool {
        matches!(
            c,
            ':' | '='
                | ','
                | '.'
                | '@'
                | '#'
                | '!'
                | '?'
                | '&'
                | '|'
                | '+'
                | '-'
                | '*'
                | '/'
                | '%'
                | '<'
                | '>'
                | '^'
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Reassignment
    Assign,

    // Logical
    Or,
    And,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Additive
    Add,
    Sub,
    BitAnd,

    // Multiplicative
    Mul,
    Div,
    Mod,
    Pow,
    BitXor,
    BitOr,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Or => "||",
            Self::And => "&&",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::BitAnd => "&",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::BitXor => "^",
            Self::BitOr => "|",
        }
    }

    /// Returns the binding strength of this operator.
    ///
    /// Higher number = binds more tightly.
    ///
    /// - 5: `*` `/` `%` `**` `^` `|`
    /// - 4: `+` `-` `&`
    /// - 3: `==` `!=` `<` `<=` `>` `>=`
    /// - 2: `&&` `||`
    /// - 1: `=`
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Mul | Self::Div | Self::Mod | Self::Pow | Self::BitXor | Self::BitOr => 5,
            Self::Add | Self::Sub | Self::BitAnd => 4,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 3,
            Self::And | Self::Or => 2,
            Self::Assign => 1,
        }
    }

    /// `a = b = c` is `a = (b = c)`; every other level groups left.
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Assign)
    }

    /// Map a lexical operator to the binary operator it spells, if any.
    pub const fn from_operator(op: Operator) -> Option<BinaryOp> {
        Some(match op {
            Operator::Eq => Self::Assign,
            Operator::PipePipe => Self::Or,
            Operator::AmpAmp => Self::And,
            Operator::EqEq => Self::Eq,
            Operator::BangEq => Self::NotEq,
            Operator::Lt => Self::Lt,
            Operator::LtEq => Self::LtEq,
            Operator::Gt => Self::Gt,
            Operator::GtEq => Self::GtEq,
            Operator::Plus => Self::Add,
            Operator::Minus => Self::Sub,
            Operator::Amp => Self::BitAnd,
            Operator::Star => Self::Mul,
            Operator::Slash => Self::Div,
            Operator::Percent => Self::Mod,
            Operator::StarStar => Self::Pow,
            Operator::Caret => Self::BitXor,
            Operator::Pipe => Self::BitOr,
            _ => return None,
        })
    }
}

/// Prefix operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `!x`, the only general-purpose prefix operator.
    Not,
    /// `-1`, restricted to numeric literal operands.
    Neg,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Neg => "-",
        }
    }

    /// Prefix operators allowed in front of an arbitrary operand.
    pub const fn from_prefix(op: Operator) -> Option<UnaryOp> {
        match op {
            Operator::Bang => Some(Self::Not),
            _ => None,
        }
    }
}

/// Postfix operators, tighter than any binary operator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PostfixOp {
    Increment,
    Decrement,
}

impl PostfixOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }

    pub const fn from_operator(op: Operator) -> Option<PostfixOp> {
        match op {
            Operator::PlusPlus => Some(Self::Increment),
            Operator::MinusMinus => Some(Self::Decrement),
            _ => None,
        }
    }
}
