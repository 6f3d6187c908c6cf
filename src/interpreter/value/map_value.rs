use std::collections::HashMap;

use ordered_float::OrderedFloat;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Enum representing values allowed as map keys.
///
/// Keys are scalars compared by value. Numbers are wrapped in `OrderedFloat`
/// so they can be hashed; `0` and `-0` are the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MapKey {
    /// A number such as `3` or `0.5`.
    Number(OrderedFloat<f64>),
    /// A string such as `"name"`.
    String(String),
    /// `true` or `false`.
    Bool(bool),
    /// `null`.
    Null,
}

impl MapKey {
    /// Converts a value into a map key.
    ///
    /// # Errors
    /// `InvalidMapKey` for arrays and maps.
    pub fn from_value(value: &Value, line: usize) -> EvalResult<Self> {
        match value {
            Value::Number(n) => Ok(Self::Number(OrderedFloat(*n))),
            Value::String(s) => Ok(Self::String(s.clone())),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Null => Ok(Self::Null),
            Value::Array(_) | Value::Map(_) => {
                Err(RuntimeError::InvalidMapKey { found: value.type_name(),
                                                  line })
            },
        }
    }
}

impl From<&MapKey> for Value {
    fn from(key: &MapKey) -> Self {
        match key {
            MapKey::Number(n) => Self::Number(n.into_inner()),
            MapKey::String(s) => Self::String(s.clone()),
            MapKey::Bool(b) => Self::Bool(*b),
            MapKey::Null => Self::Null,
        }
    }
}

/// An insertion-ordered map from [`MapKey`] to [`Value`].
///
/// Inserting an existing key replaces its value and moves the key to the end
/// of the order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapValue {
    order:   Vec<MapKey>,
    entries: HashMap<MapKey, Value>,
}

impl MapValue {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks a key up.
    #[must_use]
    pub fn get(&self, key: &MapKey) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Inserts or replaces the value for `key`, moving `key` to the end of
    /// the order.
    pub fn upsert(&mut self, key: MapKey, value: Value) {
        if self.entries.insert(key.clone(), value).is_some() {
            self.order.retain(|existing| existing != &key);
        }
        self.order.push(key);
    }

    /// Removes `key` if present and returns its value.
    pub fn remove(&mut self, key: &MapKey) -> Option<Value> {
        let removed = self.entries.remove(key)?;
        self.order.retain(|existing| existing != key);
        Some(removed)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &MapKey> {
        self.order.iter()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&MapKey, &Value)> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).map(|value| (key, value)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(s: &str) -> MapKey {
        MapKey::String(s.to_string())
    }

    #[test]
    fn upsert_moves_key_to_end() {
        let mut map = MapValue::new();
        map.upsert(key("a"), Value::Number(1.0));
        map.upsert(key("b"), Value::Number(2.0));
        map.upsert(key("a"), Value::Number(3.0));

        assert_eq!(map.keys().cloned().collect::<Vec<_>>(), vec![key("b"), key("a")]);
        assert_eq!(map.get(&key("a")), Some(&Value::Number(3.0)));
        assert_eq!(map.iter().count(), 2);
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut map = MapValue::new();
        for (i, name) in ["x", "y", "z"].iter().enumerate() {
            map.upsert(key(name), Value::Number(i as f64));
        }
        assert_eq!(map.remove(&key("y")), Some(Value::Number(1.0)));
        assert_eq!(map.remove(&key("y")), None);
        assert_eq!(map.keys().cloned().collect::<Vec<_>>(), vec![key("x"), key("z")]);
    }

    #[test]
    fn zero_and_negative_zero_are_one_key() {
        assert_eq!(MapKey::from_value(&Value::Number(0.0), 1).unwrap(),
                   MapKey::from_value(&Value::Number(-0.0), 1).unwrap());
    }

    #[test]
    fn composites_are_not_keys() {
        let array = Value::array(vec![]);
        assert_eq!(MapKey::from_value(&array, 7),
                   Err(RuntimeError::InvalidMapKey { found: "array",
                                                     line:  7, }));
    }
}
