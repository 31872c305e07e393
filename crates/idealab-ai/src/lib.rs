//! Generative text provider seam and the generation pipelines built on it.
//!
//! Nothing here holds global state: a [`TextProvider`] is constructed by the
//! caller and handed to a [`Generator`], which builds the prompt, sends it,
//! recovers a JSON object from the reply and decodes the target schema.

pub mod anthropic;
pub mod generate;
pub mod prompts;
pub mod provider;

pub use anthropic::AnthropicClient;
pub use generate::{GenerateError, Generator, IdeaRequest, PrototypeRequest};
pub use provider::{CompletionRequest, ProviderError, TextProvider};
