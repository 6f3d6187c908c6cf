/// Array builtins: `arr_push`, `arr_pop` and `arr_length`.
pub mod array;
/// Builtin dispatch and user-defined function calls.
pub mod core;
/// Map builtins: `map_keys` and `map_del`.
pub mod map;
/// The `print` builtin.
///
/// Writes a formatted value to the interpreter's output sink.
pub mod print;
