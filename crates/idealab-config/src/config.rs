//! Configuration types and loading for idealab.
//!
//! The main entry point is [`LabConfig`], the contents of
//! `.idealab/config.yaml`. [`load_config`] layers, lowest to highest:
//! built-in defaults, the YAML file, then `IDEALAB_*` environment variables
//! (`__` separates sections, so `IDEALAB_AI__MODEL` sets `ai.model`).
//! [`save_config`] writes the YAML file back.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use thiserror::Error;

/// File name of the config inside `.idealab/`.
pub const CONFIG_FILE: &str = "config.yaml";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "IDEALAB_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration file contained invalid YAML.
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Merging the file and environment layers failed.
    #[error("invalid configuration: {0}")]
    Layered(#[from] Box<figment::Error>),

    /// The `.idealab/` directory was not found.
    #[error("no .idealab directory found (run 'idealab init' first)")]
    LabDirNotFound,

    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Generative text provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AiConfig {
    /// Model identifier sent with every request.
    #[serde(default = "default_ai_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the environment variable holding the API key. The key itself
    /// is never stored in the config file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_anthropic_version")]
    pub anthropic_version: String,

    /// Whole-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub max_tokens: MaxTokens,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: default_ai_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            anthropic_version: default_anthropic_version(),
            timeout_secs: default_timeout_secs(),
            max_tokens: MaxTokens::default(),
        }
    }
}

fn default_ai_model() -> String {
    "claude-haiku-4-5-20251001".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

fn default_anthropic_version() -> String {
    "2023-06-01".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

/// Response token limits per generation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxTokens {
    #[serde(default = "default_idea_tokens")]
    pub idea: u32,
    #[serde(default = "default_prototype_tokens")]
    pub prototype: u32,
    #[serde(default = "default_roast_tokens")]
    pub roast: u32,
}

impl Default for MaxTokens {
    fn default() -> Self {
        Self {
            idea: default_idea_tokens(),
            prototype: default_prototype_tokens(),
            roast: default_roast_tokens(),
        }
    }
}

fn default_idea_tokens() -> u32 {
    2000
}

fn default_prototype_tokens() -> u32 {
    4000
}

fn default_roast_tokens() -> u32 {
    3000
}

/// Recovery parser settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RecoveryConfig {
    /// Characters of the raw text kept in a recovery failure.
    #[serde(default = "default_excerpt_len")]
    pub excerpt_len: usize,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            excerpt_len: default_excerpt_len(),
        }
    }
}

fn default_excerpt_len() -> usize {
    200
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full idealab configuration, corresponding to `.idealab/config.yaml`.
///
/// All fields use `serde` defaults so a partial file fills in the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LabConfig {
    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub recovery: RecoveryConfig,
}

impl LabConfig {
    /// Reject values that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        let checks: [(&str, bool); 7] = [
            ("ai.model", !self.ai.model.trim().is_empty()),
            ("ai.base-url", self.ai.base_url.starts_with("http")),
            ("ai.timeout-secs", self.ai.timeout_secs > 0),
            ("ai.max-tokens.idea", self.ai.max_tokens.idea > 0),
            ("ai.max-tokens.prototype", self.ai.max_tokens.prototype > 0),
            ("ai.max-tokens.roast", self.ai.max_tokens.roast > 0),
            ("recovery.excerpt-len", self.recovery.excerpt_len > 0),
        ];
        match checks.iter().find(|(_, ok)| !ok) {
            Some((key, _)) => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                reason: "must be non-empty and positive (base-url must be an http(s) URL)"
                    .to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Every leaf setting as a dotted key and its string form, in file order.
    pub fn entries(&self) -> Result<Vec<(String, String)>> {
        let value = serde_yaml::to_value(self)?;
        let mut out = Vec::new();
        flatten("", &value, &mut out);
        Ok(out)
    }

    /// Look up one dotted key, e.g. `ai.max-tokens.idea`.
    pub fn get(&self, key: &str) -> Result<String> {
        self.entries()?
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))
    }

    /// Set one dotted key from its string form.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<()> {
        let mut tree = serde_yaml::to_value(&*self)?;
        let slot = key
            .split('.')
            .try_fold(&mut tree, |node, part| node.get_mut(part))
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let replacement = match slot {
            Value::Mapping(_) => {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: "is a section; set one of its keys".to_string(),
                });
            }
            Value::String(_) => Value::String(raw.to_string()),
            _ => serde_yaml::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
        };
        *slot = replacement;

        let updated: LabConfig =
            serde_yaml::from_value(tree).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Mapping(map) => {
            for (k, v) in map {
                let Some(k) = k.as_str() else { continue };
                let key = if prefix.is_empty() {
                    k.to_string()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten(&key, v, out);
            }
        }
        Value::String(s) => out.push((prefix.to_string(), s.clone())),
        Value::Number(n) => out.push((prefix.to_string(), n.to_string())),
        Value::Bool(b) => out.push((prefix.to_string(), b.to_string())),
        Value::Null => out.push((prefix.to_string(), String::new())),
        other => {
            let text = serde_yaml::to_string(other).unwrap_or_default();
            out.push((prefix.to_string(), text.trim().to_string()));
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load the layered configuration.
///
/// `lab_dir` is the `.idealab/` directory, if one was found; without it only
/// defaults and environment variables apply. A missing or empty config file
/// is not an error.
pub fn load_config(lab_dir: Option<&Path>) -> Result<LabConfig> {
    let mut figment = Figment::from(Serialized::defaults(LabConfig::default()));

    if let Some(dir) = lab_dir {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() && !std::fs::read_to_string(&path)?.trim().is_empty() {
            figment = figment.merge(Yaml::file(path));
        }
    }

    let env = Env::prefixed(ENV_PREFIX)
        .ignore(&["dir"])
        .split("__")
        .map(|key| key.as_str().replace('_', "-").into());

    let config: LabConfig = figment.merge(env).extract().map_err(Box::new)?;
    config.validate()?;
    Ok(config)
}

/// Read only the config file, without environment overrides.
///
/// Used by `config set`, which rewrites the file and must not bake the
/// current environment into it.
pub fn load_file_config(lab_dir: &Path) -> Result<LabConfig> {
    let path = lab_dir.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(LabConfig::default());
    }
    let content = std::fs::read_to_string(&path)?;
    if content.trim().is_empty() {
        return Ok(LabConfig::default());
    }
    let config: LabConfig = serde_yaml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Save configuration to `config.yaml` inside the given `.idealab/` directory.
///
/// The directory is created if it does not exist.
pub fn save_config(lab_dir: &Path, config: &LabConfig) -> Result<()> {
    std::fs::create_dir_all(lab_dir)?;

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(lab_dir.join(CONFIG_FILE), yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let cfg = LabConfig::default();
        assert_eq!(cfg.ai.model, "claude-haiku-4-5-20251001");
        assert_eq!(cfg.ai.base_url, "https://api.anthropic.com");
        assert_eq!(cfg.ai.api_key_env, "ANTHROPIC_API_KEY");
        assert_eq!(cfg.ai.max_tokens.idea, 2000);
        assert_eq!(cfg.ai.max_tokens.prototype, 4000);
        assert_eq!(cfg.ai.max_tokens.roast, 3000);
        assert_eq!(cfg.recovery.excerpt_len, 200);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_yaml() {
        let yaml = "ai:\n  model: claude-sonnet-4-5\n  max-tokens:\n    roast: 1500\n";
        let cfg: LabConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.ai.model, "claude-sonnet-4-5");
        assert_eq!(cfg.ai.max_tokens.roast, 1500);
        assert_eq!(cfg.ai.max_tokens.idea, 2000);
        assert_eq!(cfg.ai.timeout_secs, 120);
    }

    #[test]
    fn test_roundtrip_config() {
        let dir = tempfile::tempdir().unwrap();
        let lab_dir = dir.path().join(".idealab");

        let mut cfg = LabConfig::default();
        cfg.ai.timeout_secs = 30;
        cfg.recovery.excerpt_len = 500;

        save_config(&lab_dir, &cfg).unwrap();
        let content = std::fs::read_to_string(lab_dir.join(CONFIG_FILE)).unwrap();
        assert!(content.contains("timeout-secs: 30"));
        let loaded: LabConfig = serde_yaml::from_str(&content).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_load_layers_file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "ai:\n  model: from-file\n  timeout-secs: 45\n")?;
            jail.set_env("IDEALAB_AI__MODEL", "from-env");
            jail.set_env("IDEALAB_AI__MAX_TOKENS__IDEA", "1234");
            jail.set_env("IDEALAB_DIR", "/somewhere/else");

            let cfg = load_config(Some(jail.directory())).unwrap();
            assert_eq!(cfg.ai.model, "from-env");
            assert_eq!(cfg.ai.timeout_secs, 45);
            assert_eq!(cfg.ai.max_tokens.idea, 1234);
            assert_eq!(cfg.ai.max_tokens.prototype, 4000);
            Ok(())
        });
    }

    #[test]
    fn test_load_without_dir_or_file() {
        Jail::expect_with(|jail| {
            assert_eq!(load_config(None).unwrap(), LabConfig::default());
            jail.create_file(CONFIG_FILE, "\n")?;
            assert_eq!(load_config(Some(jail.directory())).unwrap(), LabConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_file_config_ignores_env() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "ai:\n  model: from-file\n")?;
            jail.set_env("IDEALAB_AI__MODEL", "from-env");

            let cfg = load_file_config(jail.directory()).unwrap();
            assert_eq!(cfg.ai.model, "from-file");
            assert_eq!(cfg.recovery.excerpt_len, 200);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_bad_values() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "ai:\n  timeout-secs: soon\n")?;
            assert!(matches!(
                load_config(Some(jail.directory())),
                Err(ConfigError::Layered(_))
            ));

            jail.create_file(CONFIG_FILE, "recovery:\n  excerpt-len: 0\n")?;
            match load_config(Some(jail.directory())) {
                Err(ConfigError::InvalidValue { key, .. }) => {
                    assert_eq!(key, "recovery.excerpt-len")
                }
                other => panic!("expected InvalidValue, got {:?}", other),
            }
            Ok(())
        });
    }

    #[test]
    fn test_entries_and_get() {
        let cfg = LabConfig::default();
        let keys: Vec<String> = cfg.entries().unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "ai.model",
                "ai.base-url",
                "ai.api-key-env",
                "ai.anthropic-version",
                "ai.timeout-secs",
                "ai.max-tokens.idea",
                "ai.max-tokens.prototype",
                "ai.max-tokens.roast",
                "recovery.excerpt-len",
            ]
        );
        assert_eq!(cfg.get("ai.max-tokens.roast").unwrap(), "3000");
        assert!(matches!(cfg.get("ai.nope"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn test_set_values() {
        let mut cfg = LabConfig::default();
        cfg.set("ai.timeout-secs", "30").unwrap();
        assert_eq!(cfg.ai.timeout_secs, 30);

        // Strings stay strings even when they look like numbers.
        cfg.set("ai.model", "2024").unwrap();
        assert_eq!(cfg.ai.model, "2024");

        assert!(matches!(
            cfg.set("ai.timeout-secs", "soon"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set("ai.max-tokens", "10"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set("ai.colour", "red"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(cfg.set("recovery.excerpt-len", "0").is_err());
        assert_eq!(cfg.recovery.excerpt_len, 200);
        assert_eq!(cfg.ai.timeout_secs, 30);
    }
}
