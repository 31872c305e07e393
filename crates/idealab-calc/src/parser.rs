//! Load calculation specs from JSON or TOML.

use std::path::Path;

use crate::types::{CalculationSpec, SpecError};

/// Parse a calculation spec from a JSON string.
pub fn parse_json(content: &str) -> Result<CalculationSpec, SpecError> {
    serde_json::from_str(content).map_err(|e| SpecError::Parse(e.to_string()))
}

/// Parse a calculation spec from a TOML string.
pub fn parse_toml(content: &str) -> Result<CalculationSpec, SpecError> {
    toml::from_str(content).map_err(|e| SpecError::Parse(e.to_string()))
}

/// Load a spec from a file, picking the format by extension.
pub fn load_spec(path: &Path) -> Result<CalculationSpec, SpecError> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_toml(&content),
        Some("json") => parse_json(&content),
        // Unknown extension: JSON first, then TOML
        _ => parse_json(&content).or_else(|_| parse_toml(&content)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Condition;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_json_formula() {
        let spec = parse_json(r#"{"type": "formula", "formula": "a * b"}"#).unwrap();
        assert_eq!(spec, CalculationSpec::formula("a * b"));
    }

    #[test]
    fn parse_json_bare_description() {
        let spec = parse_json(r#""Multiply salary by 12""#).unwrap();
        assert_eq!(spec, CalculationSpec::descriptive("Multiply salary by 12"));
    }

    #[test]
    fn parse_json_without_logic_fails() {
        let err = parse_json(r#"{"type": "formula"}"#).unwrap_err();
        assert!(matches!(err, SpecError::Parse(_)));
        assert!(err.to_string().contains("no usable logic"));
    }

    #[test]
    fn parse_toml_conditional() {
        let toml_str = r#"
type = "conditional"

[[conditions]]
if = "score >= 80"
then = "'Strong'"

[[conditions]]
if = "true"
then = "'Keep going'"
"#;
        let spec = parse_toml(toml_str).unwrap();
        assert_eq!(
            spec,
            CalculationSpec::conditional(vec![
                Condition::new("score >= 80", "'Strong'"),
                Condition::new("true", "'Keep going'"),
            ])
        );
    }

    #[test]
    fn load_spec_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("calc.json");
        std::fs::write(&json_path, r#"{"type": "formula", "formula": "x + 1"}"#).unwrap();
        assert_eq!(load_spec(&json_path).unwrap(), CalculationSpec::formula("x + 1"));

        let toml_path = dir.path().join("calc.toml");
        std::fs::write(&toml_path, "type = \"formula\"\nformula = \"x - 1\"\n").unwrap();
        assert_eq!(load_spec(&toml_path).unwrap(), CalculationSpec::formula("x - 1"));

        let other = dir.path().join("calc.spec");
        std::fs::write(&other, "description = \"Add them up\"\n").unwrap();
        assert_eq!(load_spec(&other).unwrap(), CalculationSpec::descriptive("Add them up"));
    }

    #[test]
    fn load_spec_missing_file() {
        let err = load_spec(Path::new("/nonexistent/calc.json")).unwrap_err();
        assert!(matches!(err, SpecError::Io(_)));
    }
}
