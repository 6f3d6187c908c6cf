/// Binary operator evaluation logic.
///
/// Arithmetic, concatenation, comparisons and strict equality, plus the
/// short-circuiting `and` and `or`.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the interpreter, statement execution, expression dispatch and
/// the completion type used to unwind `return`.
pub mod core;

/// Control-flow statements.
///
/// `if`, `while` and `for`, each threading completions through their blocks.
pub mod control;

/// Element accession and element assignment on arrays and maps.
pub mod structure;

/// Utility functions for evaluation.
///
/// Provides helpers and reusable routines shared by evaluation logic.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;
