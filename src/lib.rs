//! # quill
//!
//! quill is a small dynamically typed scripting language with a tree-walking
//! interpreter. Programs are scanned into tokens, parsed into a syntax tree
//! and executed statement by statement. Values are numbers, strings,
//! booleans, null, arrays and insertion-ordered maps; arrays and maps are
//! shared by reference.
//!
//! ```
//! use quill::{interpreter::value::format::ValueFormatter, run_with_output};
//!
//! let mut out = Vec::new();
//! run_with_output("func twice(x) { return x * 2; } print(twice(21));",
//!                 &mut out,
//!                 ValueFormatter::plain()).unwrap();
//! assert_eq!(out, b"42\n");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{
    ast::StmtBlock,
    error::{Error, LexError, ParseError, RuntimeError},
    interpreter::{
        evaluator::core::Interpreter, lexer::Token, parser::block::parse_program,
        value::format::ValueFormatter,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Stmt` enums that represent the
/// syntactic structure of a program as a tree. The AST is built by the parser
/// and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches line numbers to every node for error reporting.
/// - Renders nodes as deterministic text for debugging.
pub mod ast;
/// Provides unified error types for every stage of the pipeline.
///
/// Each stage has its own error enum; every variant carries the line it was
/// raised on and renders as `line <N>, error: <message>`.
pub mod error;
/// Lexer, parser, environments, values and the evaluator.
pub mod interpreter;
/// General utilities for safe numeric conversion and number formatting.
pub mod util;

/// Scans source text into tokens, ending with `EOF`.
///
/// # Errors
/// The first lexing error; no partial token stream is returned.
pub fn scan(source: &str) -> Result<Vec<Token>, LexError> {
    interpreter::lexer::scan(source)
}

/// Parses a token stream into the program's top-level block.
///
/// # Errors
/// The first grammar violation.
pub fn parse(tokens: &[Token]) -> Result<StmtBlock, ParseError> {
    parse_program(tokens)
}

/// Executes a parsed program, writing `print` output to `output`.
///
/// # Errors
/// The first runtime error; output written before it is kept.
pub fn run(program: &StmtBlock,
           output: &mut dyn Write,
           formatter: ValueFormatter)
           -> Result<(), RuntimeError> {
    Interpreter::new(output, formatter).run(program)
}

/// Scans, parses and runs `source`.
///
/// Stages run strictly in order and the first error of any stage ends the
/// run.
///
/// # Errors
/// Returns an error if lexing, parsing or execution fails.
///
/// # Examples
/// ```
/// use quill::{error::Error, interpreter::value::format::ValueFormatter, run_with_output};
///
/// let mut out = Vec::new();
/// let err = run_with_output("print(y);", &mut out, ValueFormatter::plain()).unwrap_err();
/// assert!(matches!(err, Error::Runtime(_)));
/// assert_eq!(err.to_string(), "line 1, error: undefined variable 'y'");
/// ```
pub fn run_with_output(source: &str,
                       output: &mut dyn Write,
                       formatter: ValueFormatter)
                       -> Result<(), Error> {
    let tokens = scan(source)?;
    let program = parse(&tokens)?;
    run(&program, output, formatter)?;
    Ok(())
}
