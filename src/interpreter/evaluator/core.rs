use std::io::Write;

use crate::{
    ast::{Expr, Stmt, StmtBlock},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        value::{
            core::Value,
            format::ValueFormatter,
            map_value::{MapKey, MapValue},
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement finished.
///
/// `Return` carries the value of a `return` statement upwards through every
/// enclosing block and loop until the call boundary turns it into the call's
/// result.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Continue with the next statement.
    Normal,
    /// Unwind to the innermost function call with this value.
    Return(Value),
}

/// Executes programs.
///
/// The interpreter owns no scopes: a root [`Environment`] is created per
/// [`Interpreter::run`] and one child per function call. It holds what every
/// scope shares, namely where `print` writes and how values are rendered.
pub struct Interpreter<'w> {
    pub(crate) output:     &'w mut dyn Write,
    pub(crate) formatter:  ValueFormatter,
    pub(crate) call_depth: usize,
}

impl<'w> Interpreter<'w> {
    /// Creates an interpreter writing program output to `output`.
    pub fn new(output: &'w mut dyn Write, formatter: ValueFormatter) -> Self {
        Self { output,
               formatter,
               call_depth: 0 }
    }

    /// Runs a program against a fresh root environment.
    ///
    /// # Errors
    /// The first runtime error raised; execution stops there.
    pub fn run(&mut self, program: &StmtBlock) -> EvalResult<()> {
        let mut root = Environment::new();
        tracing::debug!(statements = program.statements.len(), "running program");
        self.execute_block(program, &mut root)?;
        tracing::debug!("program finished");
        Ok(())
    }

    /// Executes statements in order, stopping at the first `return`.
    ///
    /// Blocks do not open a scope; they run in the environment they are given.
    pub fn execute_block(&mut self,
                         block: &StmtBlock,
                         env: &mut Environment<'_>)
                         -> EvalResult<Completion> {
        for statement in &block.statements {
            if let Completion::Return(value) = self.execute(statement, env)? {
                return Ok(Completion::Return(value));
            }
        }
        Ok(Completion::Normal)
    }

    /// Executes a single statement.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    /// - `env`: The scope the statement runs in. Assignments and function
    ///   declarations write here.
    ///
    /// # Returns
    /// `Completion::Return` when a `return` was executed, `Completion::Normal`
    /// otherwise.
    pub fn execute(&mut self,
                   statement: &Stmt,
                   env: &mut Environment<'_>)
                   -> EvalResult<Completion> {
        match statement {
            Stmt::Expression { expr, .. } => {
                self.eval(expr, env)?;
                Ok(Completion::Normal)
            },
            Stmt::Assignment { name, value, .. } => {
                let value = self.eval(value, env)?;
                env.define_variable(name, value);
                Ok(Completion::Normal)
            },
            Stmt::ElementAssignment { name,
                                      chain,
                                      value,
                                      line, } => {
                self.execute_element_assignment(name, chain, value, *line, env)?;
                Ok(Completion::Normal)
            },
            Stmt::If { condition,
                       then_block,
                       else_block,
                       line, } => self.execute_if(condition, then_block, else_block, *line, env),
            Stmt::While { condition,
                          body,
                          line, } => self.execute_while(condition, body, *line, env),
            Stmt::For { element,
                        iterable,
                        body,
                        else_block,
                        line, } => {
                self.execute_for(element, iterable, body, else_block.as_ref(), *line, env)
            },
            Stmt::FunctionDeclaration(declaration) => {
                env.define_function(declaration.clone());
                Ok(Completion::Normal)
            },
            Stmt::Return { value, .. } => Ok(Completion::Return(self.eval(value, env)?)),
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Expressions
    /// only read their environment; calls they make get scopes of their own.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `env`: The scope names are resolved in.
    pub fn eval(&mut self, expr: &Expr, env: &Environment<'_>) -> EvalResult<Value> {
        match expr {
            Expr::Number { value, .. } => Ok(Value::Number(*value)),
            Expr::String { value, .. } => Ok(Value::String(value.clone())),
            Expr::Bool { value, .. } => Ok(Value::Bool(*value)),
            Expr::Null { .. } => Ok(Value::Null),
            Expr::Identifier { name, line } => {
                env.get_variable(name)
                   .cloned()
                   .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone(),
                                                                    line: *line, })
            },
            Expr::Grouping { expr, .. } => self.eval(expr, env),
            Expr::Unary { op, operand, line } => {
                let operand = self.eval(operand, env)?;
                Self::eval_unary(*op, &operand, *line)
            },
            Expr::Binary { left,
                           op,
                           right,
                           line, } => {
                let left = self.eval(left, env)?;
                let right = self.eval(right, env)?;
                Self::eval_binary(*op, &left, &right, *line)
            },
            Expr::LogicalAnd { left, right, line } => self.eval_and(left, right, *line, env),
            Expr::LogicalOr { left, right, line } => self.eval_or(left, right, *line, env),
            Expr::ArrayLiteral { elements, .. } => {
                let elements = elements.iter()
                                       .map(|element| self.eval(element, env))
                                       .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::array(elements))
            },
            Expr::MapLiteral { entries, line } => {
                let mut map = MapValue::new();
                for (key, value) in entries {
                    let key = self.eval(key, env)?;
                    let key = MapKey::from_value(&key, *line)?;
                    let value = self.eval(value, env)?;
                    map.upsert(key, value);
                }
                Ok(Value::map(map))
            },
            Expr::StructureAccession { name, chain, line } => {
                self.eval_structure_accession(name, chain, *line, env)
            },
            Expr::FunctionCall { name,
                                 arguments,
                                 line, } => self.eval_function_call(name, arguments, *line, env),
        }
    }
}
