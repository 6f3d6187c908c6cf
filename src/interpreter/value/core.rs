use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{format::ValueFormatter, map_value::MapValue},
    },
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns, and conditional evaluations.
///
/// Arrays and maps are handles to shared, mutable storage: cloning a `Value`
/// clones the handle, so every alias observes mutations made through any
/// other. The derived `PartialEq` compares contents and exists for tests; the
/// language's `==` is [`Value::strict_equals`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A string value.
    String(String),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators and `!`. Conditions of `if`, `while`,
    /// `and` and `or` must evaluate to `Bool`.
    Bool(bool),
    /// The absence of a value. Also what functions return when they fall off
    /// their end.
    Null,
    /// An ordered, growable array of values.
    Array(Rc<RefCell<Vec<Self>>>),
    /// An insertion-ordered map from scalar keys to values.
    Map(Rc<RefCell<MapValue>>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl Value {
    /// Wraps elements in fresh array storage.
    #[must_use]
    pub fn array(elements: Vec<Self>) -> Self {
        Self::Array(Rc::new(RefCell::new(elements)))
    }

    /// Wraps entries in fresh map storage.
    #[must_use]
    pub fn map(entries: MapValue) -> Self {
        Self::Map(Rc::new(RefCell::new(entries)))
    }

    /// The type name used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Bool(_) => "bool",
            Self::Null => "null",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for conditions and logical operands.
    ///
    /// # Parameters
    /// - `context`: Names the construct requiring the boolean, for the error
    ///   message.
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(bool)`: The boolean value.
    /// - `Err(RuntimeError::ExpectedBoolean)`: If not a boolean.
    pub const fn as_bool(&self, context: &'static str, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ExpectedBoolean { context,
                                                     found: self.type_name(),
                                                     line }),
        }
    }

    /// Strict equality, as computed by `==`.
    ///
    /// Values of different types are never equal. Scalars compare by value
    /// (so `NaN` differs from itself). Arrays and maps are equal only when
    /// they are the same storage.
    ///
    /// # Example
    /// ```
    /// use quill::interpreter::value::core::Value;
    ///
    /// let a = Value::array(vec![Value::Number(1.0)]);
    /// let b = Value::array(vec![Value::Number(1.0)]);
    ///
    /// assert!(a.strict_equals(&a.clone()));
    /// assert!(!a.strict_equals(&b));
    /// assert!(!Value::Number(1.0).strict_equals(&Value::from("1")));
    /// ```
    #[must_use]
    pub fn strict_equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::Map(a), Self::Map(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ValueFormatter::plain().format(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_alias_the_same_array() {
        let a = Value::array(vec![Value::Number(1.0)]);
        let b = a.clone();
        if let Value::Array(storage) = &b {
            storage.borrow_mut().push(Value::Null);
        }
        assert_eq!(a, Value::array(vec![Value::Number(1.0), Value::Null]));
        assert!(a.strict_equals(&b));
    }

    #[test]
    fn strict_equality_never_coerces() {
        assert!(!Value::Null.strict_equals(&Value::Bool(false)));
        assert!(!Value::Number(0.0).strict_equals(&Value::Bool(false)));
        assert!(!Value::Number(f64::NAN).strict_equals(&Value::Number(f64::NAN)));
        assert!(Value::from("a").strict_equals(&Value::from("a")));
    }

    #[test]
    fn non_booleans_are_rejected_as_conditions() {
        assert_eq!(Value::Number(1.0).as_bool("if condition", 4),
                   Err(RuntimeError::ExpectedBoolean { context: "if condition",
                                                       found:   "number",
                                                       line:    4, }));
    }
}
