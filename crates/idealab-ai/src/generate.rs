//! Generation pipelines: prompt, provider, recovery, schema.

use idealab_config::config::{LabConfig, MaxTokens};
use idealab_core::idea::GeneratedIdea;
use idealab_core::prototype::GeneratedPrototype;
use idealab_core::roast::ResumeRoast;
use idealab_core::schema::SchemaError;
use idealab_recovery::{RecoveredObject, RecoveryError, RecoveryOptions, recover_with};
use tracing::debug;

use crate::prompts;
use crate::provider::{CompletionRequest, ProviderError, TextProvider};

/// Errors from a generation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("{0} is required")]
    MissingInput(&'static str),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("could not read the generated response: {0}")]
    Recovery(#[from] RecoveryError),

    #[error("generated response is incomplete: {0}")]
    Schema(#[from] SchemaError),
}

pub type Result<T> = std::result::Result<T, GenerateError>;

/// Input for [`Generator::generate_idea`].
#[derive(Debug, Clone, Default)]
pub struct IdeaRequest {
    pub title: String,
    pub user_need: Option<String>,
}

/// Input for [`Generator::generate_prototype`].
#[derive(Debug, Clone, Default)]
pub struct PrototypeRequest {
    pub user_need: String,
    pub title: Option<String>,
    pub upsell: Option<String>,
}

/// Runs the pipelines against an injected provider.
pub struct Generator<P> {
    provider: P,
    max_tokens: MaxTokens,
    recovery: RecoveryOptions,
}

impl<P: TextProvider> Generator<P> {
    pub fn new(provider: P, config: &LabConfig) -> Self {
        Self {
            provider,
            max_tokens: config.ai.max_tokens.clone(),
            recovery: RecoveryOptions {
                excerpt_len: config.recovery.excerpt_len,
            },
        }
    }

    /// Flesh out an idea from its title and optional user need.
    pub fn generate_idea(&self, request: &IdeaRequest) -> Result<GeneratedIdea> {
        let title = required(&request.title, "title")?;
        let user_need = request.user_need.as_deref();
        let obj = self.run(prompts::idea_prompt(title, user_need), self.max_tokens.idea)?;
        Ok(GeneratedIdea::from_recovered(&obj, title, user_need))
    }

    /// Generate a prototype config for a user need.
    pub fn generate_prototype(&self, request: &PrototypeRequest) -> Result<GeneratedPrototype> {
        let need = required(&request.user_need, "user need")?;
        let prompt =
            prompts::prototype_prompt(need, request.title.as_deref(), request.upsell.as_deref());
        let obj = self.run(prompt, self.max_tokens.prototype)?;
        Ok(GeneratedPrototype::from_recovered(&obj)?)
    }

    /// Review resume text.
    pub fn roast_resume(&self, resume: &str) -> Result<ResumeRoast> {
        let resume = required(resume, "resume text")?;
        let obj = self.run(prompts::roast_prompt(resume), self.max_tokens.roast)?;
        Ok(ResumeRoast::from_recovered(&obj))
    }

    fn run(&self, prompt: String, max_tokens: u32) -> Result<RecoveredObject> {
        let raw = self
            .provider
            .complete(&CompletionRequest::new(prompt, max_tokens))?;
        let recovery = recover_with(&raw, &self.recovery)?;
        debug!(strategy = %recovery.strategy, "recovered generated object");
        Ok(recovery.object)
    }
}

fn required<'a>(value: &'a str, name: &'static str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(GenerateError::MissingInput(name))
    } else {
        Ok(value)
    }
}
