use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::array_index,
        },
        value::{core::Value, map_value::MapKey},
    },
};

impl Interpreter<'_> {
    /// Evaluates `name[k1][k2]...[kn]`.
    ///
    /// Starting from the variable's value, each key is evaluated in order and
    /// applied to the current container.
    ///
    /// # Errors
    /// - `UndefinedVariable` if `name` is unbound.
    /// - Any error of [`index_into`] at any step.
    pub(crate) fn eval_structure_accession(&mut self,
                                           name: &str,
                                           chain: &[Expr],
                                           line: usize,
                                           env: &Environment<'_>)
                                           -> EvalResult<Value> {
        let mut current = lookup(name, line, env)?;
        for key in chain {
            let key = self.eval(key, env)?;
            current = index_into(&current, &key, line)?;
        }
        Ok(current)
    }

    /// Executes `name[k1]...[kn] = value;`.
    ///
    /// The value is evaluated first, then the keys left to right. All keys but
    /// the last are resolved like an accession; the last one selects the slot
    /// written in the final container. Array slots must already exist; map
    /// keys are upserted and move to the end of the key order.
    ///
    /// # Errors
    /// - Any error of the accession walk.
    /// - `NotAssignable` when the final container is not an array or map.
    pub(crate) fn execute_element_assignment(&mut self,
                                             name: &str,
                                             chain: &[Expr],
                                             value: &Expr,
                                             line: usize,
                                             env: &Environment<'_>)
                                             -> EvalResult<()> {
        let value = self.eval(value, env)?;

        let Some((last, walk)) = chain.split_last() else {
            return Err(RuntimeError::NotAssignable { found: lookup(name, line, env)?.type_name(),
                                                     line });
        };

        let mut target = lookup(name, line, env)?;
        for key in walk {
            let key = self.eval(key, env)?;
            target = index_into(&target, &key, line)?;
        }
        let key = self.eval(last, env)?;

        match &target {
            Value::Array(elements) => {
                let mut elements = elements.borrow_mut();
                let index = array_index(&key, elements.len(), false, line)?;
                elements[index] = value;
                Ok(())
            },
            Value::Map(map) => {
                let key = MapKey::from_value(&key, line)?;
                map.borrow_mut().upsert(key, value);
                Ok(())
            },
            _ => Err(RuntimeError::NotAssignable { found: target.type_name(),
                                                   line }),
        }
    }
}

fn lookup(name: &str, line: usize, env: &Environment<'_>) -> EvalResult<Value> {
    env.get_variable(name)
       .cloned()
       .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                        line })
}

/// Applies one index or key to a container.
///
/// Arrays need an in-bounds integer index. Maps accept any scalar key and
/// yield `null` for missing keys.
///
/// # Errors
/// - `InvalidIndex` or `IndexOutOfBounds` for bad array indices.
/// - `InvalidMapKey` for array or map keys on a map.
/// - `NotIndexable` when `container` is a scalar.
pub fn index_into(container: &Value, key: &Value, line: usize) -> EvalResult<Value> {
    match container {
        Value::Array(elements) => {
            let elements = elements.borrow();
            let index = array_index(key, elements.len(), false, line)?;
            Ok(elements[index].clone())
        },
        Value::Map(map) => {
            let key = MapKey::from_value(key, line)?;
            Ok(map.borrow().get(&key).cloned().unwrap_or(Value::Null))
        },
        _ => Err(RuntimeError::NotIndexable { found: container.type_name(),
                                              line }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::value::map_value::MapValue;

    #[test]
    fn missing_map_keys_yield_null() {
        let map = Value::map(MapValue::new());
        assert_eq!(index_into(&map, &Value::from("x"), 1), Ok(Value::Null));
    }

    #[test]
    fn scalars_cannot_be_indexed() {
        assert_eq!(index_into(&Value::Number(3.0), &Value::Number(0.0), 2),
                   Err(RuntimeError::NotIndexable { found: "number",
                                                    line:  2, }));
    }

    #[test]
    fn composite_keys_are_rejected_on_maps() {
        let map = Value::map(MapValue::new());
        assert!(matches!(index_into(&map, &Value::array(vec![]), 1),
                         Err(RuntimeError::InvalidMapKey { .. })));
    }
}
