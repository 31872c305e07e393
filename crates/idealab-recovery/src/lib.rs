//! Recovery of structured objects from generated text.
//!
//! Generative text services answer in near-valid JSON: sometimes wrapped in a
//! fenced code block, sometimes surrounded by commentary, and sometimes with
//! raw line breaks inside string values. [`recover`] runs a fixed pipeline of
//! strategies over the text and returns the first object that parses.
//!
//! The parser only enforces syntactic validity. Callers check the fields they
//! need on the returned [`RecoveredObject`].

pub mod repair;

use serde_json::Value;
use tracing::debug;

pub use repair::{escape_control_chars, extract_braced, strip_fences};

/// A JSON object recovered from generated text.
pub type RecoveredObject = serde_json::Map<String, Value>;

/// Default number of characters of the original text kept for diagnostics.
pub const DEFAULT_EXCERPT_LEN: usize = 200;

/// Errors raised once every recovery strategy has failed.
#[derive(Debug, thiserror::Error)]
pub enum RecoveryError {
    /// The text contains a candidate object but no strategy could parse it.
    #[error("could not parse JSON from response: {reason}. Response preview: {excerpt}")]
    Unparseable {
        /// The error from the first (direct) parse attempt.
        reason: String,
        /// The first characters of the original text.
        excerpt: String,
    },

    /// The text contains no `{ ... }` span at all.
    #[error("could not find a JSON object in response: {reason}. Response preview: {excerpt}")]
    NoObject {
        /// The error from the first (direct) parse attempt.
        reason: String,
        /// The first characters of the original text.
        excerpt: String,
    },
}

impl RecoveryError {
    /// The diagnostic excerpt of the original text.
    pub fn excerpt(&self) -> &str {
        match self {
            Self::Unparseable { excerpt, .. } | Self::NoObject { excerpt, .. } => excerpt,
        }
    }
}

/// Result alias for recovery operations.
pub type Result<T> = std::result::Result<T, RecoveryError>;

/// The strategy that produced a recovered object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The (fence-stripped) text parsed as-is.
    Direct,
    /// The text parsed after escaping raw control characters inside strings.
    Repaired,
    /// The span between the first `{` and the last `}` parsed, with or
    /// without control-character repair.
    Extracted,
}

impl Strategy {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Repaired => "repaired",
            Self::Extracted => "extracted",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recovered object together with the strategy that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovery {
    pub object: RecoveredObject,
    pub strategy: Strategy,
}

/// Tuning knobs for [`recover_with`].
#[derive(Debug, Clone)]
pub struct RecoveryOptions {
    /// How many characters of the original text to keep in a failure.
    pub excerpt_len: usize,
}

impl Default for RecoveryOptions {
    fn default() -> Self {
        Self {
            excerpt_len: DEFAULT_EXCERPT_LEN,
        }
    }
}

/// Recover a JSON object from raw generated text using default options.
pub fn recover(raw: &str) -> Result<RecoveredObject> {
    recover_with(raw, &RecoveryOptions::default()).map(|r| r.object)
}

/// Recover a JSON object from raw generated text.
///
/// Strategies, first success wins:
/// 1. strip a leading/trailing code fence,
/// 2. parse directly,
/// 3. escape raw control characters inside strings and parse again,
/// 4. parse the span from the first `{` to the last `}`, raw then repaired.
///
/// A top-level value that is not an object never counts as a success.
pub fn recover_with(raw: &str, options: &RecoveryOptions) -> Result<Recovery> {
    let text = strip_fences(raw);

    let first_error = match parse_object(text) {
        Ok(object) => return Ok(found(object, Strategy::Direct)),
        Err(e) => e,
    };
    debug!(error = %first_error, "direct parse failed, repairing control characters");

    match parse_object(&escape_control_chars(text)) {
        Ok(object) => return Ok(found(object, Strategy::Repaired)),
        Err(e) => debug!(error = %e, "repaired parse failed, extracting braced span"),
    }

    let Some(span) = extract_braced(text) else {
        return Err(RecoveryError::NoObject {
            reason: first_error,
            excerpt: excerpt(raw, options.excerpt_len),
        });
    };

    let extracted = parse_object(span).or_else(|_| parse_object(&escape_control_chars(span)));
    match extracted {
        Ok(object) => Ok(found(object, Strategy::Extracted)),
        Err(e) => {
            debug!(error = %e, "extracted span did not parse");
            Err(RecoveryError::Unparseable {
                reason: first_error,
                excerpt: excerpt(raw, options.excerpt_len),
            })
        }
    }
}

fn found(object: RecoveredObject, strategy: Strategy) -> Recovery {
    debug!(%strategy, keys = object.len(), "recovered object");
    Recovery { object, strategy }
}

/// Parse `text` and accept only a top-level object.
fn parse_object(text: &str) -> std::result::Result<RecoveredObject, String> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!("expected a JSON object, found {}", kind(&other))),
        Err(e) => Err(e.to_string()),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The first `len` characters of `text`, split on a character boundary.
fn excerpt(text: &str, len: usize) -> String {
    text.chars().take(len).collect()
}
