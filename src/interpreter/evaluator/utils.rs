use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::Value, format::ValueFormatter},
    },
    util::num::{f64_to_usize_checked, is_integral},
};

/// Validates an array index.
///
/// The index must be an integer-valued number. It must lie in `[0, len)`, or
/// in `[0, len]` when `allow_end` is set (inserting at the end).
///
/// # Parameters
/// - `index`: The evaluated index.
/// - `len`: Current length of the array.
/// - `allow_end`: Whether `len` itself is a valid position.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// The index as a `usize`.
///
/// # Errors
/// - `InvalidIndex` for non-numbers and fractional or non-finite numbers.
/// - `IndexOutOfBounds` for integers outside the allowed range.
pub fn array_index(index: &Value, len: usize, allow_end: bool, line: usize) -> EvalResult<usize> {
    let Value::Number(n) = index else {
        return Err(invalid_index(index, line));
    };
    if !is_integral(*n) {
        return Err(invalid_index(index, line));
    }

    let limit = if allow_end { len + 1 } else { len };
    match f64_to_usize_checked(*n) {
        Some(i) if i < limit => Ok(i),
        _ => Err(RuntimeError::IndexOutOfBounds { index: *n,
                                                  length: len,
                                                  line }),
    }
}

fn invalid_index(index: &Value, line: usize) -> RuntimeError {
    RuntimeError::InvalidIndex { index: ValueFormatter::plain().format_nested(index),
                                 line }
}

/// Builds the error for a builtin argument of the wrong type.
pub fn argument_type_error(name: &str,
                           position: &str,
                           expected: &str,
                           found: &Value,
                           line: usize)
                           -> RuntimeError {
    RuntimeError::TypeMismatch { details: format!("{name} expects {expected} as its {position} \
                                                   argument, found {}",
                                                  found.type_name()),
                                 line }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_must_be_integral_numbers() {
        assert_eq!(array_index(&Value::Number(1.0), 2, false, 1), Ok(1));
        assert!(matches!(array_index(&Value::Number(0.5), 2, false, 1),
                         Err(RuntimeError::InvalidIndex { .. })));
        assert!(matches!(array_index(&Value::from("0"), 2, false, 1),
                         Err(RuntimeError::InvalidIndex { .. })));
    }

    #[test]
    fn bounds_depend_on_whether_the_end_is_allowed() {
        assert_eq!(array_index(&Value::Number(2.0), 2, true, 1), Ok(2));
        assert_eq!(array_index(&Value::Number(2.0), 2, false, 3),
                   Err(RuntimeError::IndexOutOfBounds { index:  2.0,
                                                        length: 2,
                                                        line:   3, }));
        assert!(matches!(array_index(&Value::Number(-1.0), 2, false, 1),
                         Err(RuntimeError::IndexOutOfBounds { .. })));
    }
}
