/// Map storage.
///
/// Defines `MapKey`, the scalar values allowed as map keys, and `MapValue`, an
/// insertion-ordered table keyed by them.
pub mod map_value;

/// Value rendering.
///
/// `ValueFormatter` turns values into text for `print`, optionally with ANSI
/// colors. Color is chosen explicitly by whoever builds the formatter.
pub mod format;

pub mod core;
