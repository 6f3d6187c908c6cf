#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Represents all errors that can occur while scanning source text.
pub enum LexError {
    /// A character that begins no token.
    #[error("line {line}, error: unexpected character '{character}'")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A string literal reached the end of input without a closing quote.
    #[error("line {line}, error: missing closing quote for the string literal")]
    UnterminatedString {
        /// The source line where the input ended.
        line: usize,
    },
}

impl LexError {
    /// Gets the line number the error was raised on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. } | Self::UnterminatedString { line } => *line,
        }
    }
}
