use crate::{
    ast::{Expr, StmtBlock},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Completion, EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Executes an `if` statement. Exactly one of the two blocks runs.
    ///
    /// # Errors
    /// `ExpectedBoolean` if the condition is not a boolean.
    pub(crate) fn execute_if(&mut self,
                             condition: &Expr,
                             then_block: &StmtBlock,
                             else_block: &StmtBlock,
                             line: usize,
                             env: &mut Environment<'_>)
                             -> EvalResult<Completion> {
        if self.eval(condition, env)?.as_bool("if condition", line)? {
            self.execute_block(then_block, env)
        } else {
            self.execute_block(else_block, env)
        }
    }

    /// Executes a `while` loop, re-checking the condition before every
    /// iteration.
    ///
    /// # Errors
    /// `ExpectedBoolean` as soon as the condition is not a boolean.
    pub(crate) fn execute_while(&mut self,
                                condition: &Expr,
                                body: &StmtBlock,
                                line: usize,
                                env: &mut Environment<'_>)
                                -> EvalResult<Completion> {
        while self.eval(condition, env)?.as_bool("while condition", line)? {
            if let Completion::Return(value) = self.execute_block(body, env)? {
                return Ok(Completion::Return(value));
            }
        }
        Ok(Completion::Normal)
    }

    /// Executes a `for` loop over an array.
    ///
    /// Elements are visited by index against the array's current length, so
    /// elements pushed by the body are visited too. The loop variable is bound
    /// in `env` before each iteration. When an `else` block was written, it
    /// runs instead of the body for every `null` element.
    ///
    /// # Errors
    /// `TypeMismatch` if the iterable is not an array.
    pub(crate) fn execute_for(&mut self,
                              element: &str,
                              iterable: &Expr,
                              body: &StmtBlock,
                              else_block: Option<&StmtBlock>,
                              line: usize,
                              env: &mut Environment<'_>)
                              -> EvalResult<Completion> {
        let iterable = self.eval(iterable, env)?;
        let Value::Array(elements) = iterable else {
            return Err(RuntimeError::TypeMismatch { details: format!("for loop expects an array, found {}",
                                                                     iterable.type_name()),
                                                    line });
        };

        let mut index = 0;
        loop {
            let Some(current) = elements.borrow().get(index).cloned() else {
                break;
            };

            let block = match else_block {
                Some(else_block) if matches!(current, Value::Null) => else_block,
                _ => body,
            };
            env.define_variable(element, current);

            if let Completion::Return(value) = self.execute_block(block, env)? {
                return Ok(Completion::Return(value));
            }
            index += 1;
        }
        Ok(Completion::Normal)
    }
}
