//! Field access helpers shared by the recovered-object schemas.

use idealab_recovery::RecoveredObject;
use serde_json::Value;

use crate::validation::SpecIntegrityError;

/// Error type for schema decoding.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Integrity(#[from] SpecIntegrityError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A non-blank string field, if present.
pub(crate) fn text(obj: &RecoveredObject, key: &str) -> Option<String> {
    obj.get(key).and_then(non_blank)
}

/// A non-blank string field, or `fallback`.
pub(crate) fn text_or(obj: &RecoveredObject, key: &str, fallback: &str) -> String {
    text(obj, key).unwrap_or_else(|| fallback.to_string())
}

pub(crate) fn non_blank(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// A score in `1..=10`. Numbers and numeric strings are accepted; zero,
/// absent or unreadable values take `default`.
pub(crate) fn score_or(obj: &RecoveredObject, key: &str, default: u8) -> u8 {
    let raw = match obj.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(n) if n.is_finite() && n != 0.0 => n.round().clamp(1.0, 10.0) as u8,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> RecoveredObject {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn text_skips_blank_and_non_strings() {
        let o = obj(json!({"a": "hello", "b": "  ", "c": 5}));
        assert_eq!(text(&o, "a").as_deref(), Some("hello"));
        assert_eq!(text(&o, "b"), None);
        assert_eq!(text(&o, "c"), None);
        assert_eq!(text_or(&o, "missing", "fallback"), "fallback");
    }

    #[test]
    fn scores_are_clamped_and_defaulted() {
        let o = obj(json!({
            "high": 42, "low": -3, "zero": 0, "text": "7", "junk": "lots", "frac": 6.6
        }));
        assert_eq!(score_or(&o, "high", 6), 10);
        assert_eq!(score_or(&o, "low", 6), 1);
        assert_eq!(score_or(&o, "zero", 6), 6);
        assert_eq!(score_or(&o, "text", 6), 7);
        assert_eq!(score_or(&o, "junk", 5), 5);
        assert_eq!(score_or(&o, "frac", 5), 7);
        assert_eq!(score_or(&o, "missing", 5), 5);
    }
}
