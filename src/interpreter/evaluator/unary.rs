use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Applies a unary operator to an evaluated operand.
    ///
    /// `-` negates a number and `!` inverts a boolean; any other operand type
    /// is an error naming the operator.
    pub(crate) fn eval_unary(op: UnaryOperator, operand: &Value, line: usize) -> EvalResult<Value> {
        match (op, operand) {
            (UnaryOperator::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
            (UnaryOperator::Negate, _) => {
                Err(RuntimeError::TypeMismatch { details: format!("operand of - must be a \
                                                                   number, found {}",
                                                                  operand.type_name()),
                                                 line })
            },
            (UnaryOperator::Not, _) => Ok(Value::Bool(!operand.as_bool("operand of !", line)?)),
        }
    }
}
