/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Converts an `f64` to a `usize` if and only if it is a non-negative integer
/// that `f64` represents exactly.
///
/// ## Parameters
/// - `value`: The number to convert.
///
/// ## Returns
/// - `Some(usize)`: The converted value.
/// - `None`: If the value is fractional, negative, non-finite or too large.
///
/// ## Example
/// ```
/// use quill::util::num::f64_to_usize_checked;
///
/// assert_eq!(f64_to_usize_checked(3.0), Some(3));
/// assert_eq!(f64_to_usize_checked(1.5), None);
/// assert_eq!(f64_to_usize_checked(-1.0), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn f64_to_usize_checked(value: f64) -> Option<usize> {
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 || value > MAX_SAFE_INTEGER {
        return None;
    }
    usize::try_from(value as u64).ok()
}

/// Whether `value` is a finite number without a fractional part.
#[must_use]
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Converts a collection length to a language number.
///
/// Lengths never approach `2^53`, so the conversion is exact in practice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Renders a number the way the language prints it.
///
/// Integral values have no fractional part, negative zero prints as `0`, and
/// the non-finite values print as `Infinity`, `-Infinity` and `NaN`.
///
/// ## Example
/// ```
/// use quill::util::num::format_number;
///
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(2.5), "2.5");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_conversion_rejects_unsafe_values() {
        assert_eq!(f64_to_usize_checked(0.0), Some(0));
        assert_eq!(f64_to_usize_checked(f64::NAN), None);
        assert_eq!(f64_to_usize_checked(f64::INFINITY), None);
        assert_eq!(f64_to_usize_checked(MAX_SAFE_INTEGER + 2.0), None);
    }

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-7.25), "-7.25");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }
}
