/// Numeric conversion and rendering helpers.
///
/// Numbers in the language are `f64`. These helpers convert them to array
/// indices without silent truncation, convert lengths back, and render numbers
/// the same way everywhere they are shown.
pub mod num;
