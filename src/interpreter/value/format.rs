use nu_ansi_term::Color;

use crate::{interpreter::value::core::Value, util::num::format_number};

/// Renders values as text.
///
/// Arrays render as `[v1, v2]` and maps as `{k1 : v1, k2 : v2}` in key order.
/// A string printed on its own is bare; strings inside arrays and maps are
/// quoted. When colored, scalars are painted with ANSI escapes (numbers cyan,
/// strings yellow, booleans green, null red) and punctuation is left plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValueFormatter {
    colored: bool,
}

impl ValueFormatter {
    /// A formatter that emits ANSI colors when `colored` is set.
    #[must_use]
    pub const fn new(colored: bool) -> Self {
        Self { colored }
    }

    /// A formatter without colors.
    #[must_use]
    pub const fn plain() -> Self {
        Self::new(false)
    }

    /// Renders a value as `print` shows it.
    #[must_use]
    pub fn format(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_value(&mut out, value, false);
        out
    }

    /// Renders a value as it appears inside an array or map, with strings
    /// quoted.
    #[must_use]
    pub fn format_nested(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_value(&mut out, value, true);
        out
    }

    fn paint(&self, out: &mut String, color: Color, text: &str) {
        if self.colored {
            out.push_str(&color.paint(text).to_string());
        } else {
            out.push_str(text);
        }
    }

    fn write_value(&self, out: &mut String, value: &Value, nested: bool) {
        match value {
            Value::Number(n) => self.paint(out, Color::Cyan, &format_number(*n)),
            Value::String(s) if nested => self.paint(out, Color::Yellow, &format!("\"{s}\"")),
            Value::String(s) => self.paint(out, Color::Yellow, s),
            Value::Bool(b) => self.paint(out, Color::Green, if *b { "true" } else { "false" }),
            Value::Null => self.paint(out, Color::Red, "null"),
            Value::Array(elements) => {
                out.push('[');
                for (i, element) in elements.borrow().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_value(out, element, true);
                }
                out.push(']');
            },
            Value::Map(map) => {
                out.push('{');
                for (i, (key, entry)) in map.borrow().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_value(out, &Value::from(key), true);
                    out.push_str(" : ");
                    self.write_value(out, entry, true);
                }
                out.push('}');
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::value::map_value::{MapKey, MapValue};

    #[test]
    fn strings_are_quoted_only_when_nested() {
        let formatter = ValueFormatter::plain();
        assert_eq!(formatter.format(&Value::from("hi")), "hi");
        assert_eq!(formatter.format(&Value::array(vec![Value::from("hi"), Value::Null])),
                   "[\"hi\", null]");
    }

    #[test]
    fn maps_render_in_key_order() {
        let mut map = MapValue::new();
        map.upsert(MapKey::String("b".to_string()), Value::Number(2.0));
        map.upsert(MapKey::Number(1.0.into()), Value::array(vec![Value::Bool(true)]));
        assert_eq!(ValueFormatter::plain().format(&Value::map(map)),
                   "{\"b\" : 2, 1 : [true]}");
    }

    #[test]
    fn colored_output_wraps_scalars_in_escapes() {
        let rendered = ValueFormatter::new(true).format(&Value::array(vec![Value::Number(1.0)]));
        assert_eq!(rendered, format!("[{}]", Color::Cyan.paint("1")));
    }
}
