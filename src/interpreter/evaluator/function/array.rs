use std::{cell::RefCell, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            function::core::arity_error,
            utils::{argument_type_error, array_index},
        },
        value::core::Value,
    },
    util::num::usize_to_f64,
};

fn expect_array<'a>(name: &str,
                    value: &'a Value,
                    line: usize)
                    -> EvalResult<&'a Rc<RefCell<Vec<Value>>>> {
    match value {
        Value::Array(elements) => Ok(elements),
        other => Err(argument_type_error(name, "first", "an array", other, line)),
    }
}

/// `arr_push(arr, value[, index])`
///
/// Inserts `value` at `index`, shifting later elements right. Without an
/// index the value is appended. Valid indices are `0..=len`.
///
/// # Errors
/// - `TypeMismatch` if `arr` is not an array.
/// - `InvalidIndex` or `IndexOutOfBounds` for a bad index.
/// - `ArgumentCountMismatch` unless given two or three arguments.
pub fn arr_push(_: &mut Interpreter<'_>, args: &[Value], line: usize) -> EvalResult<Value> {
    let (target, value, index) = match args {
        [target, value] => (target, value, None),
        [target, value, index] => (target, value, Some(index)),
        _ => return Err(arity_error("arr_push", args.len(), line)),
    };
    let elements = expect_array("arr_push", target, line)?;
    let mut elements = elements.borrow_mut();

    let index = match index {
        Some(index) => array_index(index, elements.len(), true, line)?,
        None => elements.len(),
    };
    elements.insert(index, value.clone());
    Ok(Value::Null)
}

/// `arr_pop(arr[, index])`
///
/// Removes and returns the element at `index`, or the last element when no
/// index is given.
///
/// # Errors
/// - `TypeMismatch` if `arr` is not an array.
/// - `EmptyArray` if there is nothing to remove.
/// - `InvalidIndex` or `IndexOutOfBounds` for a bad index.
/// - `ArgumentCountMismatch` unless given one or two arguments.
pub fn arr_pop(_: &mut Interpreter<'_>, args: &[Value], line: usize) -> EvalResult<Value> {
    let (target, index) = match args {
        [target] => (target, None),
        [target, index] => (target, Some(index)),
        _ => return Err(arity_error("arr_pop", args.len(), line)),
    };
    let elements = expect_array("arr_pop", target, line)?;
    let mut elements = elements.borrow_mut();

    if elements.is_empty() {
        return Err(RuntimeError::EmptyArray { line });
    }
    let index = match index {
        Some(index) => array_index(index, elements.len(), false, line)?,
        None => elements.len() - 1,
    };
    Ok(elements.remove(index))
}

/// `arr_length(arr)`
///
/// # Errors
/// - `TypeMismatch` if `arr` is not an array.
/// - `ArgumentCountMismatch` unless given exactly one argument.
pub fn arr_length(_: &mut Interpreter<'_>, args: &[Value], line: usize) -> EvalResult<Value> {
    let [target] = args else {
        return Err(arity_error("arr_length", args.len(), line));
    };
    let elements = expect_array("arr_length", target, line)?;
    Ok(Value::Number(usize_to_f64(elements.borrow().len())))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::value::format::ValueFormatter;

    fn with_interpreter<T>(f: impl FnOnce(&mut Interpreter<'_>) -> T) -> T {
        let mut sink = Vec::new();
        let mut interpreter = Interpreter::new(&mut sink, ValueFormatter::plain());
        f(&mut interpreter)
    }

    fn numbers(values: &[f64]) -> Value {
        Value::array(values.iter().copied().map(Value::Number).collect())
    }

    #[test]
    fn push_appends_or_inserts() {
        let arr = numbers(&[1.0, 3.0]);
        with_interpreter(|i| {
            arr_push(i, &[arr.clone(), Value::Number(4.0)], 1).unwrap();
            arr_push(i, &[arr.clone(), Value::Number(2.0), Value::Number(1.0)], 1).unwrap();
        });
        assert_eq!(arr, numbers(&[1.0, 2.0, 3.0, 4.0]));
    }

    #[test]
    fn push_rejects_indices_past_the_end() {
        let arr = numbers(&[1.0]);
        let result = with_interpreter(|i| {
            arr_push(i, &[arr.clone(), Value::Null, Value::Number(2.0)], 5)
        });
        assert_eq!(result,
                   Err(RuntimeError::IndexOutOfBounds { index:  2.0,
                                                        length: 1,
                                                        line:   5, }));
    }

    #[test]
    fn pop_defaults_to_the_last_element() {
        let arr = numbers(&[1.0, 2.0, 3.0]);
        with_interpreter(|i| {
            assert_eq!(arr_pop(i, &[arr.clone()], 1), Ok(Value::Number(3.0)));
            assert_eq!(arr_pop(i, &[arr.clone(), Value::Number(0.0)], 1), Ok(Value::Number(1.0)));
            assert_eq!(arr_length(i, &[arr.clone()], 1), Ok(Value::Number(1.0)));
        });
    }

    #[test]
    fn pop_from_empty_array_fails() {
        let result = with_interpreter(|i| arr_pop(i, &[numbers(&[])], 7));
        assert_eq!(result, Err(RuntimeError::EmptyArray { line: 7 }));
    }

    #[test]
    fn wrong_argument_counts_are_errors() {
        let arr = numbers(&[1.0]);
        let result = with_interpreter(|i| arr_push(i, &[arr.clone()], 3));
        assert_eq!(result,
                   Err(RuntimeError::ArgumentCountMismatch { name:     "arr_push".to_string(),
                                                             expected: "2 or 3".to_string(),
                                                             found:    1,
                                                             line:     3, }));
        let result = with_interpreter(|i| arr_pop(i, &[], 3));
        assert_eq!(result.unwrap_err().to_string(),
                   "line 3, error: function 'arr_pop' expects 1 or 2 arguments but got 0");
        assert!(with_interpreter(|i| arr_length(i, &[arr.clone(), arr.clone()], 3)).is_err());
        assert_eq!(arr, numbers(&[1.0]));
    }

    #[test]
    fn non_arrays_are_rejected() {
        let result = with_interpreter(|i| arr_length(i, &[Value::from("abc")], 2));
        assert_eq!(result.unwrap_err().to_string(),
                   "line 2, error: arr_length expects an array as its first argument, found \
                    string");
    }
}
