//! Text-generation provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for text-generation backends
///
/// Implementations send a prompt to a model service (a hosted completions
/// API, a local OpenAI-compatible server, ...) and hand back the generated
/// text already extracted from whatever response layout the service uses.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a completion
    ///
    /// # Arguments
    ///
    /// * `request` - The completion request with prompt and sampling parameters
    ///
    /// # Returns
    ///
    /// The generated text and metadata, or an error describing why no text
    /// could be extracted
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider name (e.g., "together", "openai")
    fn name(&self) -> &str;
}
