//! # Serialized Text
//!
//! Values are shown and hand-edited as pretty-printed JSON. Printing keeps
//! mapping insertion order (which for synthesized values is schema field
//! order) and a fixed indentation, so the same value always prints the same
//! text, and `from_text(&to_text(v)) == Ok(v)` for every value with finite
//! numbers.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use formkit_core::{ParseError, Value};

/// Formatting options for [`to_text_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOptions {
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

/// Pretty-print with the default two-space indentation.
pub fn to_text(value: &Value) -> String {
    to_text_with(value, &TextOptions::default())
}

/// Pretty-print with explicit options.
pub fn to_text_with(value: &Value, options: &TextOptions) -> String {
    let indent = " ".repeat(options.indent);
    let mut buf = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    // Writing into a Vec cannot fail and every key is a string.
    if let Err(err) = value.serialize(&mut serializer) {
        tracing::error!(error = %err, "value serialization failed");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Parse serialized text back into a value.
///
/// # Errors
///
/// Returns [`ParseError`] when `text` is not well-formed JSON. The caller's
/// current value is not touched; keep showing it next to the invalid text.
pub fn from_text(text: &str) -> Result<Value, ParseError> {
    serde_json::from_str(text).map_err(|err| {
        let err = ParseError::from(err);
        tracing::debug!(line = err.line, column = err.column, "text is not well-formed");
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prints_in_field_order_with_two_spaces() {
        let value = Value::from(json!({"b": 1, "a": {"c": [true, "x"]}}));
        assert_eq!(
            to_text(&value),
            "{\n  \"b\": 1,\n  \"a\": {\n    \"c\": [\n      true,\n      \"x\"\n    ]\n  }\n}"
        );
    }

    #[test]
    fn indentation_is_configurable() {
        let value = Value::from(json!({"a": 1}));
        assert_eq!(
            to_text_with(&value, &TextOptions { indent: 4 }),
            "{\n    \"a\": 1\n}"
        );
    }

    #[test]
    fn empty_containers_stay_compact() {
        let value = Value::from(json!({"hobbies": [], "address": {}}));
        assert_eq!(
            to_text(&value),
            "{\n  \"hobbies\": [],\n  \"address\": {}\n}"
        );
    }

    #[test]
    fn parses_back_to_equal_value() {
        let value = Value::from(json!({"n": 2.5, "s": "x", "l": [null, false]}));
        assert_eq!(from_text(&to_text(&value)), Ok(value));
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        let err = from_text("{invalid").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("key must be a string"));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(from_text("{} {}").is_err());
        assert!(from_text("").is_err());
    }
}
