//! Error codes for all compiler diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the compiler phase.

use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E5xxx: Generator errors
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Unexpected character in source
    E0002,
    /// Invalid number literal
    E0003,
    /// Operator spelling not in the operator table
    E0004,
    /// Invalid escape sequence
    E0005,
    /// Unterminated `${ ... }` interpolation
    E0006,
    /// Unterminated macro arguments or body
    E0007,
    /// `$` sigil without a type name
    E0008,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unexpected end of input
    E1003,
    /// Statement-only syntax used in expression position
    E1004,
    /// Operator not allowed in prefix position
    E1005,
    /// Malformed type declaration
    E1006,
    /// Range outside a `for` header
    E1007,
    /// Invalid binding or reassignment target
    E1008,

    // Generator Errors (E5xxx)
    /// `impl` method without a name
    E5001,
    /// Unknown macro
    E5002,
    /// Construct cannot be lowered in this position
    E5003,

    // Internal Errors (E9xxx)
    /// Internal compiler error
    E9001,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// Kept in sync with `as_str()`, which is exhaustive.
    pub const ALL: &[ErrorCode] = &[
        // Lexer
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        ErrorCode::E0008,
        // Parser
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        // Generator
        ErrorCode::E5001,
        ErrorCode::E5002,
        ErrorCode::E5003,
        // Internal
        ErrorCode::E9001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E0008 => "E0008",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E5001 => "E5001",
            ErrorCode::E5002 => "E5002",
            ErrorCode::E5003 => "E5003",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line explanation, shown by `juice explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "a string literal is missing its closing `\"`",
            ErrorCode::E0002 => "the source contains a character that starts no token",
            ErrorCode::E0003 => "a number literal has no digits or does not fit in 64 bits",
            ErrorCode::E0004 => {
                "a run of operator characters does not spell any known operator; \
                 separate adjacent operators with a space"
            }
            ErrorCode::E0005 => "`\\x` needs two hex digits and `\\u` needs four",
            ErrorCode::E0006 => "a `${` interpolation is missing its closing `}`",
            ErrorCode::E0007 => "a macro argument list or body is missing its closing delimiter",
            ErrorCode::E0008 => "the `$` type sigil must be followed by a name",
            ErrorCode::E1001 => "the parser found a token that cannot appear here",
            ErrorCode::E1002 => "an expression was required but something else was found",
            ErrorCode::E1003 => "the input ended inside a construct, usually an unclosed delimiter",
            ErrorCode::E1004 => {
                "bindings and type declarations are statements and cannot appear \
                 inside an expression such as a call argument"
            }
            ErrorCode::E1005 => "`!` is the only prefix operator; `-` only negates number literals",
            ErrorCode::E1006 => "a type declaration needs a type expression or a `{ ... }` body",
            ErrorCode::E1007 => "`from..to` ranges are only valid in a `for` header",
            ErrorCode::E1008 => {
                "only names and member expressions can be bound with `:=` or reassigned with `=`"
            }
            ErrorCode::E5001 => "every method inside an `impl` block needs a name",
            ErrorCode::E5002 => "the generator only knows the `js!` macro",
            ErrorCode::E5003 => "this construct has no lowering in the position it appears in",
            ErrorCode::E9001 => "internal compiler error; please report it",
        }
    }

    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_codegen_error(&self) -> bool {
        self.as_str().starts_with("E5")
    }

    pub fn is_internal_error(&self) -> bool {
        self.as_str().starts_with("E9")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E1001"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`] and [`ErrorCode::as_str()`].
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
