/// Lexing errors.
///
/// Raised while turning source text into tokens: unterminated string
/// literals and characters that start no token.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree from
/// tokens. Parse errors include missing punctuation, unexpected tokens,
/// malformed literals and `return` outside of a function.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation and
/// execution. Runtime errors include things like division by zero, type
/// mismatches, bad indices or arity mismatches.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any fatal error produced by the pipeline.
///
/// Exactly one of these ends a run; errors are never collected or recovered
/// from.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failure while scanning the source text.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// Failure while building the syntax tree.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Failure while executing the program.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Header naming the error category, printed above the error line at the
    /// process boundary.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Lex(_) => "Lexing error",
            Self::Parse(_) => "Parsing error",
            Self::Runtime(_) => "Runtime error",
        }
    }

    /// Source line the error originated from.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Lex(e) => e.line(),
            Self::Parse(e) => e.line(),
            Self::Runtime(e) => e.line(),
        }
    }
}
