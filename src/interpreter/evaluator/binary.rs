use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Applies a binary operator to two evaluated operands.
    ///
    /// - `+` adds two numbers or concatenates two strings.
    /// - `-`, `*`, `/`, `%` need two numbers. `/` and `%` reject a zero divisor
    ///   before looking at the dividend's type.
    /// - `<`, `<=`, `>`, `>=` need two numbers and yield a boolean.
    /// - `==` and `!=` compare any two values strictly.
    ///
    /// # Parameters
    /// - `op`: Operator to apply.
    /// - `left`, `right`: Evaluated operands.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed value, or an error naming the operator and operand types.
    pub(crate) fn eval_binary(op: BinaryOperator,
                              left: &Value,
                              right: &Value,
                              line: usize)
                              -> EvalResult<Value> {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Sub,
        };

        match op {
            Add => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
                _ => Err(RuntimeError::TypeMismatch {
                    details: format!("operands of + must be two numbers or two strings, found {} \
                                      and {}",
                                     left.type_name(),
                                     right.type_name()),
                    line,
                }),
            },
            Div | Mod => {
                if matches!(right, Value::Number(n) if *n == 0.0) {
                    return Err(if op == Div {
                        RuntimeError::DivisionByZero { line }
                    } else {
                        RuntimeError::ModuloByZero { line }
                    });
                }
                let (a, b) = number_operands(op, left, right, line)?;
                Ok(Value::Number(if op == Div { a / b } else { a % b }))
            },
            Sub | Mul => {
                let (a, b) = number_operands(op, left, right, line)?;
                Ok(Value::Number(if op == Sub { a - b } else { a * b }))
            },
            Less | LessEqual | Greater | GreaterEqual => {
                let (a, b) = number_operands(op, left, right, line)?;
                Ok(Value::Bool(match op {
                                   Less => a < b,
                                   LessEqual => a <= b,
                                   Greater => a > b,
                                   _ => a >= b,
                               }))
            },
            Equal => Ok(Value::Bool(left.strict_equals(right))),
            NotEqual => Ok(Value::Bool(!left.strict_equals(right))),
        }
    }

    /// Evaluates `left and right`.
    ///
    /// The left operand must be a boolean. When it is `false` the right
    /// operand is not evaluated; otherwise it must be a boolean too.
    pub(crate) fn eval_and(&mut self,
                           left: &Expr,
                           right: &Expr,
                           line: usize,
                           env: &Environment<'_>)
                           -> EvalResult<Value> {
        if !self.eval(left, env)?.as_bool("left operand of and", line)? {
            return Ok(Value::Bool(false));
        }
        let right = self.eval(right, env)?.as_bool("right operand of and", line)?;
        Ok(Value::Bool(right))
    }

    /// Evaluates `left or right`.
    ///
    /// The left operand must be a boolean. When it is `true` the right operand
    /// is not evaluated; otherwise it must be a boolean too.
    pub(crate) fn eval_or(&mut self,
                          left: &Expr,
                          right: &Expr,
                          line: usize,
                          env: &Environment<'_>)
                          -> EvalResult<Value> {
        if self.eval(left, env)?.as_bool("left operand of or", line)? {
            return Ok(Value::Bool(true));
        }
        let right = self.eval(right, env)?.as_bool("right operand of or", line)?;
        Ok(Value::Bool(right))
    }
}

/// Extracts two numbers, or reports which operator rejected which types.
fn number_operands(op: BinaryOperator,
                   left: &Value,
                   right: &Value,
                   line: usize)
                   -> EvalResult<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::TypeMismatch { details: format!("operands of {op} must be two \
                                                                numbers, found {} and {}",
                                                               left.type_name(),
                                                               right.type_name()),
                                              line }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn apply(op: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
        Interpreter::eval_binary(op, &left, &right, 1)
    }

    #[test]
    fn plus_adds_numbers_and_concatenates_strings() {
        assert_eq!(apply(BinaryOperator::Add, 2.0.into(), 3.0.into()), Ok(Value::Number(5.0)));
        assert_eq!(apply(BinaryOperator::Add, "ab".into(), "cd".into()), Ok("abcd".into()));
        assert!(matches!(apply(BinaryOperator::Add, "a".into(), 1.0.into()),
                         Err(RuntimeError::TypeMismatch { .. })));
    }

    #[test]
    fn zero_divisor_is_checked_before_types() {
        assert_eq!(apply(BinaryOperator::Div, "a".into(), 0.0.into()),
                   Err(RuntimeError::DivisionByZero { line: 1 }));
        assert_eq!(apply(BinaryOperator::Mod, Value::Null, 0.0.into()),
                   Err(RuntimeError::ModuloByZero { line: 1 }));
    }

    #[test]
    fn modulo_keeps_the_dividend_sign() {
        assert_eq!(apply(BinaryOperator::Mod, (-7.0).into(), 3.0.into()),
                   Ok(Value::Number(-1.0)));
        assert_eq!(apply(BinaryOperator::Mod, 7.0.into(), (-3.0).into()), Ok(Value::Number(1.0)));
    }

    #[test]
    fn comparisons_need_numbers() {
        assert_eq!(apply(BinaryOperator::LessEqual, 2.0.into(), 2.0.into()), Ok(true.into()));
        let error = apply(BinaryOperator::Greater, "b".into(), "a".into()).unwrap_err();
        assert_eq!(error.to_string(),
                   "line 1, error: operands of > must be two numbers, found string and string");
    }

    #[test]
    fn equality_is_strict() {
        assert_eq!(apply(BinaryOperator::Equal, 1.0.into(), "1".into()), Ok(false.into()));
        assert_eq!(apply(BinaryOperator::NotEqual, Value::Null, Value::Null), Ok(false.into()));
    }
}
