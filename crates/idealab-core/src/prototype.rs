//! Prototype configurations and the generated-prototype envelope.

use std::path::Path;

use idealab_calc::types::{CalculationSpec, deserialize_calculation};
use idealab_recovery::RecoveredObject;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::descriptor::{InputDescriptor, OutputDescriptor};
use crate::schema::{SchemaError, text};
use crate::validation::{self, IntegrityWarning, SpecIntegrityError};

/// Everything needed to render and compute one prototype form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrototypeConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub inputs: Vec<InputDescriptor>,
    #[serde(default)]
    pub outputs: Vec<OutputDescriptor>,
    /// Shared by every output that has no calculation of its own.
    #[serde(
        default,
        deserialize_with = "deserialize_calculation",
        skip_serializing_if = "Option::is_none"
    )]
    pub calculation: Option<CalculationSpec>,
    #[serde(default)]
    pub upsell_message: String,
}

impl PrototypeConfig {
    /// Check descriptor integrity (unique ids, select options).
    pub fn validate(&self) -> Result<(), SpecIntegrityError> {
        validation::validate_config(self)
    }

    /// Non-fatal problems worth reporting to whoever wrote the config.
    pub fn warnings(&self) -> Vec<IntegrityWarning> {
        validation::config_warnings(self)
    }

    /// The calculation that applies to `output`, if any.
    pub fn calculation_for<'a>(&'a self, output: &'a OutputDescriptor) -> Option<&'a CalculationSpec> {
        output.calculation.as_ref().or(self.calculation.as_ref())
    }

    pub fn input(&self, id: &str) -> Option<&InputDescriptor> {
        self.inputs.iter().find(|i| i.id == id)
    }
}

/// A generated prototype: tab name, form config and optional source code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPrototype {
    pub tab_name: String,
    pub prototype_config: PrototypeConfig,
    #[serde(default)]
    pub prototype_code: String,
}

impl GeneratedPrototype {
    /// Decode a recovered object. `tabName` and `prototypeConfig` are
    /// required and the embedded config must pass integrity validation.
    pub fn from_recovered(obj: &RecoveredObject) -> Result<Self, SchemaError> {
        let tab_name = text(obj, "tabName").ok_or(SchemaError::MissingField("tabName"))?;
        let config = match obj.get("prototypeConfig") {
            Some(v @ Value::Object(_)) => v.clone(),
            _ => return Err(SchemaError::MissingField("prototypeConfig")),
        };
        let prototype_config: PrototypeConfig =
            serde_json::from_value(config).map_err(|e| SchemaError::InvalidField {
                field: "prototypeConfig",
                reason: e.to_string(),
            })?;
        prototype_config.validate()?;

        Ok(Self {
            tab_name,
            prototype_config,
            prototype_code: text(obj, "prototypeCode").unwrap_or_default(),
        })
    }
}

// ---------------------------------------------------------------------------
// Loading from files
// ---------------------------------------------------------------------------

/// Parse a prototype config from JSON.
///
/// Accepts either a bare config or a full generated prototype, in which case
/// its `prototypeConfig` is used.
pub fn parse_json(content: &str) -> Result<PrototypeConfig, SchemaError> {
    let value: Value = serde_json::from_str(content).map_err(|e| SchemaError::Parse(e.to_string()))?;
    from_document(value)
}

/// Parse a prototype config from TOML. Same shapes as [`parse_json`].
pub fn parse_toml(content: &str) -> Result<PrototypeConfig, SchemaError> {
    let value: Value = toml::from_str(content).map_err(|e| SchemaError::Parse(e.to_string()))?;
    from_document(value)
}

/// Load and validate a prototype config (auto-detect TOML vs JSON by extension).
pub fn load_prototype(path: &Path) -> Result<PrototypeConfig, SchemaError> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_toml(&content),
        Some("json") => parse_json(&content),
        _ => parse_json(&content).or_else(|_| parse_toml(&content)),
    }
}

fn from_document(value: Value) -> Result<PrototypeConfig, SchemaError> {
    let value = match value {
        Value::Object(mut map) => match map.remove("prototypeConfig") {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => {
            return Err(SchemaError::Parse(format!(
                "expected an object, found {}",
                json_type(&other)
            )));
        }
    };
    let config: PrototypeConfig =
        serde_json::from_value(value).map_err(|e| SchemaError::Parse(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{InputKind, OutputKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn salary_config() -> Value {
        json!({
            "title": "Salary Check",
            "description": "Annualize a monthly offer",
            "inputs": [
                {"id": "monthly", "label": "Monthly pay", "type": "number", "placeholder": "4000"},
                {"id": "level", "label": "Level", "type": "select", "options": ["Junior", "Senior"]}
            ],
            "outputs": [
                {"id": "yearly", "label": "Yearly", "type": "number"}
            ],
            "calculation": {"type": "formula", "formula": "monthly * 12", "description": "Times twelve"},
            "upsellMessage": "Sign up to compare offers"
        })
    }

    #[test]
    fn from_recovered_full() {
        let obj = json!({
            "tabName": "💰 Salary Check",
            "prototypeConfig": salary_config(),
            "prototypeCode": "export default function SalaryCheck() {}"
        });
        let proto = GeneratedPrototype::from_recovered(obj.as_object().unwrap()).unwrap();
        assert_eq!(proto.tab_name, "💰 Salary Check");
        let config = &proto.prototype_config;
        assert_eq!(config.inputs[0].kind, InputKind::Number);
        assert_eq!(config.outputs[0].kind, OutputKind::Number);
        assert_eq!(config.upsell_message, "Sign up to compare offers");
        assert_eq!(
            config.calculation,
            Some(CalculationSpec::Formula {
                expression: "monthly * 12".into(),
                description: Some("Times twelve".into()),
            })
        );
    }

    #[test]
    fn prototype_code_is_optional() {
        let obj = json!({"tabName": "Tab", "prototypeConfig": salary_config()});
        let proto = GeneratedPrototype::from_recovered(obj.as_object().unwrap()).unwrap();
        assert_eq!(proto.prototype_code, "");
    }

    #[test]
    fn missing_required_fields() {
        let obj = json!({"prototypeConfig": salary_config()});
        let err = GeneratedPrototype::from_recovered(obj.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingField("tabName")));

        let obj = json!({"tabName": "Tab", "prototypeConfig": "not an object"});
        let err = GeneratedPrototype::from_recovered(obj.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingField("prototypeConfig")));
    }

    #[test]
    fn integrity_errors_surface() {
        let mut config = salary_config();
        config["inputs"][1]["options"] = json!([]);
        let obj = json!({"tabName": "Tab", "prototypeConfig": config});
        let err = GeneratedPrototype::from_recovered(obj.as_object().unwrap()).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Integrity(SpecIntegrityError::MissingOptions(ref id)) if id == "level"
        ));
    }

    #[test]
    fn calculation_override_wins() {
        let mut config: PrototypeConfig = serde_json::from_value(salary_config()).unwrap();
        config.outputs.push(
            OutputDescriptor::new("weekly", "Weekly", OutputKind::Number)
                .with_calculation(CalculationSpec::formula("monthly * 12 / 52")),
        );
        assert_eq!(
            config.calculation_for(&config.outputs[0]),
            config.calculation.as_ref()
        );
        assert_eq!(
            config.calculation_for(&config.outputs[1]),
            Some(&CalculationSpec::formula("monthly * 12 / 52"))
        );
    }

    #[test]
    fn calculation_without_logic_still_decodes() {
        let mut config = salary_config();
        config["calculation"] = json!({"type": "formula", "formula": ""});
        config["outputs"][0]["calculation"] = json!({"type": "lookup"});
        let obj = json!({"tabName": "Tab", "prototypeConfig": config});

        let proto = GeneratedPrototype::from_recovered(obj.as_object().unwrap()).unwrap();
        let config = &proto.prototype_config;
        assert_eq!(
            config.calculation,
            Some(CalculationSpec::Unusable {
                kind: Some("formula".into())
            })
        );
        assert_eq!(
            config.calculation_for(&config.outputs[0]).map(|c| c.kind()),
            Some("unusable")
        );
    }

    #[test]
    fn parse_json_accepts_envelope_or_bare_config() {
        let bare = parse_json(&salary_config().to_string()).unwrap();
        let envelope = json!({"tabName": "Tab", "prototypeConfig": salary_config()});
        let wrapped = parse_json(&envelope.to_string()).unwrap();
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn parse_json_rejects_non_objects() {
        let err = parse_json("[1, 2]").unwrap_err();
        assert_eq!(err.to_string(), "parse error: expected an object, found an array");
    }

    #[test]
    fn load_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proto.toml");
        std::fs::write(
            &path,
            r#"
title = "Split the rent"

[[inputs]]
id = "rent"
label = "Rent"
type = "number"

[[inputs]]
id = "people"
label = "Roommates"
type = "number"

[[outputs]]
id = "share"
label = "Your share"
type = "number"

[calculation]
type = "formula"
formula = "rent / people"
"#,
        )
        .unwrap();
        let config = load_prototype(&path).unwrap();
        assert_eq!(config.title, "Split the rent");
        assert_eq!(config.inputs.len(), 2);
        assert_eq!(config.calculation, Some(CalculationSpec::formula("rent / people")));
        assert_eq!(config.upsell_message, "");
    }

    #[test]
    fn load_rejects_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.json");
        let mut config = salary_config();
        config["inputs"][1]["id"] = json!("monthly");
        std::fs::write(&path, config.to_string()).unwrap();
        let err = load_prototype(&path).unwrap_err();
        assert_eq!(err.to_string(), "duplicate input id: monthly");
    }
}
