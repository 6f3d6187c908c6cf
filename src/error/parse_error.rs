#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Represents all errors that can occur during parsing.
pub enum ParseError {
    /// A specific token was required but something else was found.
    #[error("line {line}, error: {message}, found '{found}'")]
    Expected {
        /// What the grammar required at this point.
        message: String,
        /// Lexeme of the token actually found.
        found:   String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A token that cannot start an expression.
    #[error("line {line}, error: unexpected token \"{token}\"")]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("line {line}, error: unexpected end of input")]
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `return` statement appeared outside of any function body.
    #[error("line {line}, error: can't have return statements outside of functions")]
    ReturnOutsideFunction {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric literal that does not denote a finite number.
    #[error("line {line}, error: malformed number literal '{lexeme}'")]
    InvalidNumber {
        /// The literal text.
        lexeme: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A name slot received text that is not an identifier.
    #[error("line {line}, error: '{name}' is not a valid identifier")]
    InvalidIdentifier {
        /// The rejected name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A token used as an operator in a position where it is not one.
    #[error("line {line}, error: '{operator}' is not a valid {position} operator")]
    InvalidOperator {
        /// Lexeme of the token.
        operator: String,
        /// `unary` or `binary`.
        position: &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A user function tried to take the name of a builtin.
    #[error("line {line}, error: user defined functions can't have names of the builtin functions, {name}")]
    BuiltinRedefinition {
        /// The builtin name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The same parameter name appears twice in one declaration.
    #[error("line {line}, error: duplicate parameter '{name}'")]
    DuplicateParameter {
        /// The repeated parameter.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
}

impl ParseError {
    /// Gets the line number the error was raised on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Expected { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line }
            | Self::ReturnOutsideFunction { line }
            | Self::InvalidNumber { line, .. }
            | Self::InvalidIdentifier { line, .. }
            | Self::InvalidOperator { line, .. }
            | Self::BuiltinRedefinition { line, .. }
            | Self::DuplicateParameter { line, .. } => *line,
        }
    }
}
