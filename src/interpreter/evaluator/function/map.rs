use crate::interpreter::{
    evaluator::{
        core::{EvalResult, Interpreter},
        function::core::arity_error,
        utils::argument_type_error,
    },
    value::{core::Value, map_value::MapKey},
};

/// `map_keys(map)`
///
/// Returns a new array holding the keys of `map` in their current order.
///
/// # Errors
/// - `TypeMismatch` if the argument is not a map.
/// - `ArgumentCountMismatch` unless given exactly one argument.
pub fn map_keys(_: &mut Interpreter<'_>, args: &[Value], line: usize) -> EvalResult<Value> {
    let [target] = args else {
        return Err(arity_error("map_keys", args.len(), line));
    };
    let Value::Map(map) = target else {
        return Err(argument_type_error("map_keys", "first", "a map", target, line));
    };
    let keys = map.borrow().keys().map(Value::from).collect();
    Ok(Value::array(keys))
}

/// `map_del(map, key)`
///
/// Removes `key` from `map` if present. Deleting a missing key does nothing.
///
/// # Errors
/// - `TypeMismatch` if the first argument is not a map.
/// - `InvalidMapKey` if `key` is an array or a map.
/// - `ArgumentCountMismatch` unless given exactly two arguments.
pub fn map_del(_: &mut Interpreter<'_>, args: &[Value], line: usize) -> EvalResult<Value> {
    let [target, key] = args else {
        return Err(arity_error("map_del", args.len(), line));
    };
    let Value::Map(map) = target else {
        return Err(argument_type_error("map_del", "first", "a map", target, line));
    };
    let key = MapKey::from_value(key, line)?;
    map.borrow_mut().remove(&key);
    Ok(Value::Null)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::value::{format::ValueFormatter, map_value::MapValue};

    fn sample() -> Value {
        let mut map = MapValue::new();
        map.upsert(MapKey::from_value(&Value::from("a"), 1).unwrap(), Value::Number(1.0));
        map.upsert(MapKey::from_value(&Value::Number(2.0), 1).unwrap(), Value::Bool(true));
        map.upsert(MapKey::Null, Value::Null);
        Value::map(map)
    }

    #[test]
    fn keys_come_back_in_order() {
        let mut sink = Vec::new();
        let mut interpreter = Interpreter::new(&mut sink, ValueFormatter::plain());
        let keys = map_keys(&mut interpreter, &[sample()], 1).unwrap();
        assert_eq!(keys,
                   Value::array(vec![Value::from("a"), Value::Number(2.0), Value::Null]));
    }

    #[test]
    fn deleting_keeps_the_remaining_order() {
        let mut sink = Vec::new();
        let mut interpreter = Interpreter::new(&mut sink, ValueFormatter::plain());
        let map = sample();
        map_del(&mut interpreter, &[map.clone(), Value::Number(2.0)], 1).unwrap();
        map_del(&mut interpreter, &[map.clone(), Value::from("missing")], 1).unwrap();
        assert_eq!(map.to_string(), "{\"a\" : 1, null : null}");
    }

    #[test]
    fn missing_arguments_are_errors() {
        let mut sink = Vec::new();
        let mut interpreter = Interpreter::new(&mut sink, ValueFormatter::plain());
        let error = map_del(&mut interpreter, &[sample()], 4).unwrap_err();
        assert_eq!(error.to_string(),
                   "line 4, error: function 'map_del' expects 2 arguments but got 1");
        assert!(map_keys(&mut interpreter, &[], 4).is_err());
    }
}
