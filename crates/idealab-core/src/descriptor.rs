//! Input and output field descriptors for generated prototypes.

use std::fmt;

use idealab_calc::types::{CalculationSpec, deserialize_calculation};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Macro: a field kind with known string variants + an Other(String) fallback.
// ---------------------------------------------------------------------------
macro_rules! define_kind {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident,
        variants: [
            $( ($variant:ident, $str:literal) ),+ $(,)?
        ]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $str, )+
                    Self::Other(s) => s.as_str(),
                }
            }

            /// Returns `true` for one of the documented kinds.
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok(Self::from(s.as_str()))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                match s.trim().to_ascii_lowercase().as_str() {
                    $( $str => Self::$variant, )+
                    _ => Self::Other(s.to_owned()),
                }
            }
        }
    };
}

define_kind!(
    /// How an input is rendered and how raw edits to it are coerced.
    InputKind, default = Text,
    variants: [
        (Text, "text"),
        (Number, "number"),
        (Select, "select"),
        (Textarea, "textarea"),
    ]
);

define_kind!(
    /// Rendering hint for an output. The evaluator always yields a string.
    OutputKind, default = Text,
    variants: [
        (Text, "text"),
        (Number, "number"),
        (List, "list"),
        (Chart, "chart"),
    ]
);

/// One input field of a prototype form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDescriptor {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "type")]
    pub kind: InputKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Choices for `select` inputs, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl InputDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: InputKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            placeholder: None,
            options: None,
        }
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = Some(options.iter().map(|o| o.to_string()).collect());
        self
    }
}

/// One output field of a prototype form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDescriptor {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "type")]
    pub kind: OutputKind,
    /// Overrides the prototype's shared calculation for this output only.
    #[serde(
        default,
        deserialize_with = "deserialize_calculation",
        skip_serializing_if = "Option::is_none"
    )]
    pub calculation: Option<CalculationSpec>,
}

impl OutputDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: OutputKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            calculation: None,
        }
    }

    pub fn with_calculation(mut self, spec: CalculationSpec) -> Self {
        self.calculation = Some(spec);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!(InputKind::from("number"), InputKind::Number);
        assert_eq!(InputKind::from(" Select "), InputKind::Select);
        assert_eq!(OutputKind::from("CHART"), OutputKind::Chart);
    }

    #[test]
    fn unknown_kind_is_kept() {
        let kind = InputKind::from("date");
        assert_eq!(kind, InputKind::Other("date".into()));
        assert!(!kind.is_known());
        assert_eq!(kind.to_string(), "date");
    }

    #[test]
    fn input_descriptor_from_json() {
        let input: InputDescriptor = serde_json::from_str(
            r#"{"id": "level", "label": "Level", "type": "select", "options": ["Junior", "Senior"]}"#,
        )
        .unwrap();
        assert_eq!(
            input,
            InputDescriptor::new("level", "Level", InputKind::Select)
                .with_options(&["Junior", "Senior"])
        );
    }

    #[test]
    fn missing_type_defaults_to_text() {
        let output: OutputDescriptor =
            serde_json::from_str(r#"{"id": "summary", "label": "Summary"}"#).unwrap();
        assert_eq!(output.kind, OutputKind::Text);
        assert_eq!(output.calculation, None);
    }

    #[test]
    fn output_with_own_calculation() {
        let output: OutputDescriptor = serde_json::from_str(
            r#"{"id": "yearly", "label": "Yearly", "type": "number",
                "calculation": {"type": "formula", "formula": "monthly * 12"}}"#,
        )
        .unwrap();
        assert_eq!(
            output.calculation,
            Some(CalculationSpec::formula("monthly * 12"))
        );
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["type"], "number");
        assert_eq!(json["calculation"]["formula"], "monthly * 12");
    }
}
