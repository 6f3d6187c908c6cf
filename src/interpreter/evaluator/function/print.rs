use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            function::core::arity_error,
        },
        value::core::Value,
    },
};

/// Writes a value followed by a newline to the interpreter's output.
///
/// The value is rendered by the interpreter's formatter, so top-level strings
/// appear without quotes and colors follow the run's configuration.
///
/// # Returns
/// `null`.
///
/// # Errors
/// - `Output` if the sink fails.
/// - `ArgumentCountMismatch` unless given exactly one argument.
///
/// # Example
/// ```
/// use quill::interpreter::{
///     evaluator::{core::Interpreter, function::print::print},
///     value::{core::Value, format::ValueFormatter},
/// };
///
/// let mut out = Vec::new();
/// let mut interpreter = Interpreter::new(&mut out, ValueFormatter::plain());
/// let result = print(&mut interpreter, &[Value::from("hi")], 1).unwrap();
///
/// assert_eq!(result, Value::Null);
/// drop(interpreter);
/// assert_eq!(out, b"hi\n");
/// ```
pub fn print(interpreter: &mut Interpreter<'_>, args: &[Value], line: usize) -> EvalResult<Value> {
    let [value] = args else {
        return Err(arity_error("print", args.len(), line));
    };
    let rendered = interpreter.formatter.format(value);
    writeln!(interpreter.output, "{rendered}").map_err(|err| RuntimeError::Output { message: err.to_string(),
                                                                                    line })?;
    Ok(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::format::ValueFormatter;

    #[test]
    fn print_without_an_argument_writes_nothing() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out, ValueFormatter::plain());
        let result = print(&mut interpreter, &[], 9);
        assert!(matches!(result,
                         Err(RuntimeError::ArgumentCountMismatch { found: 0, line: 9, .. })));
        drop(interpreter);
        assert!(out.is_empty());
    }
}
