#[derive(Debug, Clone, PartialEq, thiserror::Error)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to read a variable that is not bound in any enclosing scope.
    #[error("line {line}, error: undefined variable '{name}'")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a function that is neither a builtin nor declared.
    #[error("line {line}, error: undefined function '{name}'")]
    UndefinedFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An operator received operands of the wrong type.
    #[error("line {line}, error: {details}")]
    TypeMismatch {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A condition or logical operand was not a boolean.
    #[error("line {line}, error: {context} must be a boolean, found {found}")]
    ExpectedBoolean {
        /// Which construct required the boolean.
        context: &'static str,
        /// Type name of the value actually found.
        found:   &'static str,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Attempted division by zero.
    #[error("line {line}, error: division by zero")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted modulo by zero.
    #[error("line {line}, error: modulo by zero")]
    ModuloByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An array index that is not an integer-valued number.
    #[error("line {line}, error: array index must be an integer, found {index}")]
    InvalidIndex {
        /// Rendering of the rejected index.
        index: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Tried to access an array element outside the allowed bounds.
    #[error("line {line}, error: index {index} out of bounds for array of length {length}")]
    IndexOutOfBounds {
        /// The index that was actually requested.
        index:  f64,
        /// Length of the array.
        length: usize,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Indexed into a value that is neither an array nor a map.
    #[error("line {line}, error: can't index into a value of type {found}")]
    NotIndexable {
        /// Type name of the indexed value.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Element assignment into a value that is neither an array nor a map.
    #[error("line {line}, error: can't assign an element into a value of type {found}")]
    NotAssignable {
        /// Type name of the target value.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An array or map used as a map key.
    #[error("line {line}, error: map keys can't be of type {found}")]
    InvalidMapKey {
        /// Type name of the rejected key.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("line {line}, error: function '{name}' expects {expected} arguments but got {found}")]
    ArgumentCountMismatch {
        /// The function called.
        name:     String,
        /// Accepted argument counts, rendered.
        expected: String,
        /// Number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Tried to pop from an array with no elements.
    #[error("line {line}, error: can't pop from an empty array")]
    EmptyArray {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The output sink rejected a write.
    #[error("line {line}, error: failed to write output: {message}")]
    Output {
        /// The underlying I/O error message.
        message: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl RuntimeError {
    /// Gets the line number the error was raised on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndefinedVariable { line, .. }
            | Self::UndefinedFunction { line, .. }
            | Self::TypeMismatch { line, .. }
            | Self::ExpectedBoolean { line, .. }
            | Self::DivisionByZero { line }
            | Self::ModuloByZero { line }
            | Self::InvalidIndex { line, .. }
            | Self::IndexOutOfBounds { line, .. }
            | Self::NotIndexable { line, .. }
            | Self::NotAssignable { line, .. }
            | Self::InvalidMapKey { line, .. }
            | Self::ArgumentCountMismatch { line, .. }
            | Self::EmptyArray { line }
            | Self::Output { line, .. } => *line,
        }
    }
}
