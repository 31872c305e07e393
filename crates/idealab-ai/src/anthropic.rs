//! Anthropic Messages API client.

use std::time::Duration;

use idealab_config::config::AiConfig;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};
use ureq::Agent;

use crate::provider::{CompletionRequest, ProviderError, TextProvider};

const MESSAGES_PATH: &str = "/v1/messages";

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

/// Blocking client for the Messages API, built once and passed to whoever
/// needs it.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    agent: Agent,
    url: String,
    api_key: String,
    api_key_env: String,
    model: String,
    version: String,
}

impl AnthropicClient {
    pub fn new(config: &AiConfig, api_key: impl Into<String>) -> Self {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build();

        Self {
            agent: Agent::new_with_config(agent_config),
            url: format!("{}{}", config.base_url.trim_end_matches('/'), MESSAGES_PATH),
            api_key: api_key.into(),
            api_key_env: config.api_key_env.clone(),
            model: config.model.clone(),
            version: config.anthropic_version.clone(),
        }
    }

    /// Build a client reading the key from the variable named by
    /// `config.api_key_env`.
    pub fn from_env(config: &AiConfig) -> Result<Self, ProviderError> {
        match std::env::var(&config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(config, key.trim())),
            _ => Err(ProviderError::MissingApiKey(config.api_key_env.clone())),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn payload(&self, request: &CompletionRequest) -> Value {
        let mut payload = json!({
            "model": self.model,
            "max_tokens": request.max_tokens,
            "messages": [
                {"role": "user", "content": request.prompt}
            ],
        });
        if let Some(system) = request.system.as_deref().filter(|s| !s.trim().is_empty()) {
            payload["system"] = json!(system);
        }
        payload
    }
}

impl TextProvider for AnthropicClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        info!(model = %self.model, max_tokens = request.max_tokens, "sending completion request");

        let mut response = self
            .agent
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.version)
            .send_json(self.payload(request))
            .map_err(|e| {
                warn!(error = %e, "completion request failed");
                ProviderError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.body_mut().read_to_string().unwrap_or_default();
            warn!(status = status.as_u16(), "provider returned an error status");
            return Err(classify_status(status.as_u16(), &body, &self.api_key_env));
        }

        let body: MessagesResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        extract_text(body)
    }
}

/// Map an error status and body to a provider error.
fn classify_status(status: u16, body: &str, api_key_env: &str) -> ProviderError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| truncate(body.trim(), 320));

    match status {
        401 => ProviderError::InvalidApiKey(api_key_env.to_string()),
        429 => ProviderError::RateLimited,
        404 => ProviderError::ModelNotFound(message),
        _ if message.contains("model") => ProviderError::ModelNotFound(message),
        _ => ProviderError::Status { status, message },
    }
}

/// Join the text blocks of a response.
fn extract_text(body: MessagesResponse) -> Result<String, ProviderError> {
    let text = body
        .content
        .iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text.as_deref())
        .collect::<Vec<_>>()
        .join("\n");

    if text.trim().is_empty() {
        Err(ProviderError::NoText)
    } else {
        Ok(text)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
