//! Error context for "while parsing X" notes.

/// The construct being parsed when an error occurred.
///
/// ```ignore
/// self.in_error_context(ErrorContext::IfStatement, |p| p.parse_if_inner())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    Import,
    TypeDeclaration,
    TypeExpression,
    Function,
    Parameters,
    Block,
    IfStatement,
    ForLoop,
    ImplBlock,
    MatchExpression,
    CallArguments,
    List,
    Record,
    Tuple,
    Interpolation,
    MacroArguments,
}

impl ErrorContext {
    /// Noun phrase for the construct, as in "while parsing {description}".
    pub fn description(self) -> &'static str {
        match self {
            ErrorContext::Import => "an import",
            ErrorContext::TypeDeclaration => "a type declaration",
            ErrorContext::TypeExpression => "a type expression",
            ErrorContext::Function => "a function",
            ErrorContext::Parameters => "function parameters",
            ErrorContext::Block => "a block",
            ErrorContext::IfStatement => "an if statement",
            ErrorContext::ForLoop => "a for loop",
            ErrorContext::ImplBlock => "an impl block",
            ErrorContext::MatchExpression => "a match expression",
            ErrorContext::CallArguments => "call arguments",
            ErrorContext::List => "a list",
            ErrorContext::Record => "a record",
            ErrorContext::Tuple => "a tuple",
            ErrorContext::Interpolation => "a string interpolation",
            ErrorContext::MacroArguments => "macro arguments",
        }
    }
}
