//! Headline summaries through a text-generation backend

use async_trait::async_trait;
use newsletter_llm::{CompletionRequest, LLMProvider};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::news::Headline;
use crate::prompts;

/// Summary used when there are no headlines
pub const NO_NEWS_SUMMARY: &str = "No significant news to summarize.";

/// Summary used when the backend call fails
pub const SUMMARY_UNAVAILABLE: &str = "Unable to generate summary at this time.";

/// Summary used when the backend answers with an unknown response layout
pub const SUMMARY_UNEXPECTED_FORMAT: &str =
    "Unable to generate summary due to unexpected API response format.";

/// Turns headlines into a short prose summary
///
/// Never fails: every error path maps to one of the fixed fallback strings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `headlines` about `subject` (a display name)
    async fn summarize(&self, headlines: &[Headline], subject: &str) -> String;
}

/// Summarizer backed by any [`LLMProvider`]
pub struct LlmSummarizer {
    provider: Arc<dyn LLMProvider>,
    model: String,
    max_tokens: usize,
    temperature: f32,
}

impl LlmSummarizer {
    /// Create a summarizer with the default bounds (300 tokens, temperature 0.7)
    pub fn new(provider: Arc<dyn LLMProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens: 300,
            temperature: 0.7,
        }
    }

    /// Set the token cap for one summary
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    #[instrument(skip(self, headlines), fields(provider = self.provider.name(), headlines = headlines.len()))]
    async fn summarize(&self, headlines: &[Headline], subject: &str) -> String {
        if headlines.is_empty() {
            return NO_NEWS_SUMMARY.to_string();
        }

        let prompt = match prompts::summary_prompt(subject, headlines) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!("Failed to render summary prompt for {}: {}", subject, e);
                return SUMMARY_UNAVAILABLE.to_string();
            }
        };

        let request = CompletionRequest::builder(&self.model)
            .system(prompts::SUMMARY_PERSONA)
            .prompt(prompt)
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build();

        match self.provider.complete(request).await {
            Ok(response) => {
                debug!("Summary for {} used {:?}", subject, response.usage);
                response.text.trim().to_string()
            }
            Err(e) if e.is_unrecognized_shape() => {
                warn!("Unexpected summary response for {}: {}", subject, e);
                SUMMARY_UNEXPECTED_FORMAT.to_string()
            }
            Err(e) => {
                warn!("Error generating summary for {}: {}", subject, e);
                SUMMARY_UNAVAILABLE.to_string()
            }
        }
    }
}
