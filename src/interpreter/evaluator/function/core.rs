use std::fmt;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{Completion, EvalResult, Interpreter},
            function::{array, map, print},
        },
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the interpreter (for output), a slice of evaluated
/// argument values and the line number of the call.
type BuiltinFn = fn(&mut Interpreter<'_>, &[Value], usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
#[derive(Debug, Clone, Copy)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of all builtin functions. None of them can be redefined.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print"      => { arity: Arity::Exact(1),         func: print::print },
    "arr_push"   => { arity: Arity::OneOf(&[2, 3]),   func: array::arr_push },
    "arr_pop"    => { arity: Arity::OneOf(&[1, 2]),   func: array::arr_pop },
    "arr_length" => { arity: Arity::Exact(1),         func: array::arr_length },
    "map_keys"   => { arity: Arity::Exact(1),         func: map::map_keys },
    "map_del"    => { arity: Arity::Exact(2),         func: map::map_del },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::OneOf(counts) => counts.contains(&n),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::OneOf(counts) => {
                for (i, n) in counts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" or ")?;
                    }
                    write!(f, "{n}")?;
                }
                Ok(())
            },
        }
    }
}

/// Returns `true` if `name` belongs to a builtin function.
///
/// # Example
/// ```
/// use quill::interpreter::evaluator::function::core::is_builtin;
///
/// assert!(is_builtin("arr_push"));
/// assert!(!is_builtin("push"));
/// ```
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}

/// The `ArgumentCountMismatch` raised when builtin `name` receives `found`
/// arguments.
pub(crate) fn arity_error(name: &str, found: usize, line: usize) -> RuntimeError {
    let expected = BUILTIN_TABLE.iter()
                                .find(|builtin| builtin.name == name)
                                .map(|builtin| builtin.arity.to_string())
                                .unwrap_or_default();
    RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                          expected,
                                          found,
                                          line }
}

impl Interpreter<'_> {
    /// Evaluates a function call.
    ///
    /// Builtins are resolved first. Otherwise the user function is looked up
    /// through the environment chain, its arguments are evaluated left to
    /// right in the caller's environment and its body runs in a fresh
    /// environment whose parent is the caller's.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arguments`: Unevaluated argument expressions.
    /// - `line`: Line number for error reporting.
    /// - `env`: The caller's environment.
    ///
    /// # Returns
    /// The value of the executed `return`, or `null` if the body finished
    /// without one.
    ///
    /// # Errors
    /// - `UndefinedFunction` if no builtin or user function has this name.
    /// - `ArgumentCountMismatch` on a wrong number of arguments.
    /// - Any error raised while evaluating arguments or running the body.
    pub(crate) fn eval_function_call(&mut self,
                                     name: &str,
                                     arguments: &[Expr],
                                     line: usize,
                                     env: &Environment<'_>)
                                     -> EvalResult<Value> {
        if let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == name) {
            let args = self.eval_arguments(arguments, env)?;
            if !builtin.arity.check(args.len()) {
                return Err(arity_error(name, args.len(), line));
            }
            tracing::trace!(function = name, "dispatching builtin");
            return (builtin.func)(self, &args, line);
        }

        self.call_user_defined_function(name, arguments, line, env)
    }

    fn call_user_defined_function(&mut self,
                                  name: &str,
                                  arguments: &[Expr],
                                  line: usize,
                                  env: &Environment<'_>)
                                  -> EvalResult<Value> {
        let func = env.get_function(name)
                      .ok_or_else(|| RuntimeError::UndefinedFunction { name: name.to_string(),
                                                                       line })?;

        let args = self.eval_arguments(arguments, env)?;
        if args.len() != func.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                             expected: func.params
                                                                           .len()
                                                                           .to_string(),
                                                             found: args.len(),
                                                             line });
        }

        let mut scope = Environment::with_parent(env);
        for (param, arg) in func.params.iter().zip(args) {
            scope.define_variable(param, arg);
        }

        self.call_depth += 1;
        tracing::trace!(function = name, depth = self.call_depth, "calling function");
        let completion = self.execute_block(&func.body, &mut scope);
        self.call_depth -= 1;

        match completion? {
            Completion::Return(value) => Ok(value),
            Completion::Normal => Ok(Value::Null),
        }
    }

    fn eval_arguments(&mut self, arguments: &[Expr], env: &Environment<'_>) -> EvalResult<Vec<Value>> {
        arguments.iter().map(|arg| self.eval(arg, env)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_descriptions_list_every_accepted_count() {
        assert_eq!(Arity::Exact(1).to_string(), "1");
        assert_eq!(Arity::OneOf(&[2, 3]).to_string(), "2 or 3");
    }

    #[test]
    fn arity_checks() {
        assert!(Arity::Exact(2).check(2));
        assert!(!Arity::Exact(2).check(1));
        assert!(Arity::OneOf(&[1, 2]).check(1));
        assert!(!Arity::OneOf(&[1, 2]).check(3));
    }

    #[test]
    fn every_builtin_is_reserved() {
        for name in ["print", "arr_push", "arr_pop", "arr_length", "map_keys", "map_del"] {
            assert!(is_builtin(name), "{name} should be a builtin");
        }
        assert!(!is_builtin("main"));
    }
}
