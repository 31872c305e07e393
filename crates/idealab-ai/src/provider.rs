//! The generative text provider interface.

/// One prompt/response exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub system: Option<String>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
            system: None,
        }
    }
}

/// Errors returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("API key is not configured (set the {0} environment variable)")]
    MissingApiKey(String),

    #[error("invalid API key (check the {0} environment variable)")]
    InvalidApiKey(String),

    #[error("rate limit exceeded, try again later")]
    RateLimited,

    #[error("model not found or not available to this API key: {0}")]
    ModelNotFound(String),

    #[error("provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("provider response contained no text")]
    NoText,
}

/// Anything that turns a prompt into free-form text.
///
/// Implementations make exactly one attempt per call.
pub trait TextProvider {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}

impl<T: TextProvider + ?Sized> TextProvider for &T {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        (**self).complete(request)
    }
}

impl<T: TextProvider + ?Sized> TextProvider for Box<T> {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        (**self).complete(request)
    }
}
