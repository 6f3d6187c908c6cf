/// The evaluator module executes the syntax tree.
///
/// The evaluator walks statements and expressions, applies operators, calls
/// builtin and user functions and threads `return` through blocks as an
/// explicit completion value.
///
/// # Responsibilities
/// - Evaluates every expression and statement form of the language.
/// - Creates one environment per function call, parented on the caller.
/// - Reports runtime errors such as type mismatches or bad indices.
pub mod evaluator;
/// Variable and function scopes.
///
/// An `Environment` maps names to values and to function declarations, and
/// resolves misses through its parent chain.
pub mod environment;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a number, string, identifier, keyword, operator or
/// delimiter, and tagged with the line it started on. The stream always ends
/// with a single `EOF` token.
///
/// # Responsibilities
/// - Skips whitespace and `//` comments while counting lines.
/// - Handles numeric and string literals, identifiers and keywords.
/// - Reports unterminated strings and unexpected characters.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// A recursive descent parser turning the token stream into a block of
/// statements. Grammar violations, including `return` outside of a function,
/// are reported here rather than at runtime.
pub mod parser;
/// The value module defines the runtime data types.
///
/// Numbers, strings, booleans and null are plain values; arrays and maps are
/// shared handles, so assigning one never copies it.
///
/// # Responsibilities
/// - Defines the `Value` enum and the scalar `MapKey`.
/// - Provides type names, boolean checks and strict equality.
/// - Renders values for `print` through `ValueFormatter`.
pub mod value;
