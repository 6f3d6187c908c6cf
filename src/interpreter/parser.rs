/// Token stream, shared result type and the expression entry point.
///
/// Holds the lookahead helpers every other parser module uses.
pub mod core;

/// Binary operator parsing.
///
/// One function per precedence level, from `or` down to `%`.
pub mod binary;

/// Unary operators and primary expressions.
///
/// Literals, grouping, identifiers, calls, element accession, array and map
/// literals.
pub mod unary;

/// Block and program parsing.
///
/// Sequences of statements, braced bodies and the top-level program.
pub mod block;

/// Utility functions for the parser.
pub mod utils;

/// Statement parsing.
///
/// Assignments, control flow, function declarations, `return` and expression
/// statements.
pub mod statement;
