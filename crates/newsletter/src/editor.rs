//! Final editing pass over the assembled newsletter

use async_trait::async_trait;
use newsletter_llm::{CompletionRequest, LLMProvider};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::prompts;

/// Post-processes the assembled newsletter text
///
/// Implementations return the input unchanged whenever they cannot produce
/// an edited version.
#[async_trait]
pub trait NewsletterEditor: Send + Sync {
    /// Edit the full newsletter text
    async fn edit(&self, text: &str) -> String;
}

/// Editor that removes paragraphs duplicating a section's news summary
pub struct LlmNewsletterEditor {
    provider: Arc<dyn LLMProvider>,
    model: String,
    max_tokens: usize,
    temperature: f32,
}

impl LlmNewsletterEditor {
    /// Create an editor with the default bounds (2000 tokens, temperature 0.7)
    pub fn new(provider: Arc<dyn LLMProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens: 2000,
            temperature: 0.7,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl NewsletterEditor for LlmNewsletterEditor {
    #[instrument(skip(self, text), fields(provider = self.provider.name(), chars = text.len()))]
    async fn edit(&self, text: &str) -> String {
        let prompt = match prompts::editor_prompt(text) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!("Failed to render editor prompt: {}", e);
                return text.to_string();
            }
        };

        let request = CompletionRequest::builder(&self.model)
            .system(prompts::EDITOR_PERSONA)
            .prompt(prompt)
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build();

        match self.provider.complete(request).await {
            Ok(response) if response.text.trim().is_empty() => {
                warn!("Editor returned empty text, keeping original newsletter");
                text.to_string()
            }
            Ok(response) => {
                info!("Newsletter edited");
                response.text.trim().to_string()
            }
            Err(e) if e.is_unrecognized_shape() => {
                warn!("Unable to clean newsletter due to unexpected API response format: {}", e);
                text.to_string()
            }
            Err(e) => {
                warn!("Error cleaning newsletter: {}", e);
                text.to_string()
            }
        }
    }
}

/// Editor that leaves the text untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughEditor;

#[async_trait]
impl NewsletterEditor for PassThroughEditor {
    async fn edit(&self, text: &str) -> String {
        text.to_string()
    }
}
