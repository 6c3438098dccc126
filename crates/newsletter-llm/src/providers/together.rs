//! Hosted completions provider
//!
//! Talks to a Together-style `/completions` endpoint: one prompt in, one
//! text continuation out. Responses come back either flat
//! (`{"choices": [...]}`) or wrapped in an `output` object depending on the
//! API version; both are handled by [`crate::shape`].
//!
//! # Example
//!
//! ```no_run
//! use newsletter_llm::{CompletionRequest, LLMProvider};
//! use newsletter_llm::providers::TogetherProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = TogetherProvider::from_env()?;
//!
//!     let request = CompletionRequest::builder("meta-llama/Llama-3.3-70B-Instruct-Turbo-Free")
//!         .prompt("Summarize today's Apple headlines")
//!         .max_tokens(300)
//!         .temperature(0.7)
//!         .build();
//!
//!     let response = provider.complete(request).await?;
//!     println!("{}", response.text);
//!     Ok(())
//! }
//! ```

use crate::shape::decode_completion;
use crate::{CompletionRequest, CompletionResponse, LLMError, LLMProvider, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_TOGETHER_API_BASE: &str = "https://api.together.xyz/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the hosted completions provider
#[derive(Debug, Clone)]
pub struct TogetherConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL of the API (default: "https://api.together.xyz/v1")
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl TogetherConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the API key from `TOGETHER_API_KEY` and optionally the base URL
    /// from `TOGETHER_API_BASE`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("TOGETHER_API_KEY").map_err(|_| {
            LLMError::ConfigurationError("TOGETHER_API_KEY environment variable not set".to_string())
        })?;

        let api_base = std::env::var("TOGETHER_API_BASE")
            .unwrap_or_else(|_| DEFAULT_TOGETHER_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Set custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for TogetherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_TOGETHER_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Hosted completions provider
pub struct TogetherProvider {
    client: Client,
    config: TogetherConfig,
}

impl TogetherProvider {
    /// Create a provider with custom configuration
    pub fn with_config(config: TogetherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a provider with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(TogetherConfig::new(api_key))
    }

    /// Create a provider from environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(TogetherConfig::from_env()?)
    }

    /// Get the current configuration
    pub fn config(&self) -> &TogetherConfig {
        &self.config
    }
}

#[async_trait]
impl LLMProvider for TogetherProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!(
            "Sending completion request ({} prompt chars, max_tokens {})",
            request.prompt.len(),
            request.max_tokens
        );

        let body = TogetherRequest {
            model: &request.model,
            prompt: request.full_prompt(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{}/completions", self.config.api_base))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(LLMError::from_status(status, text, &request.model));
        }

        let completion = decode_completion(&text)?;

        if let Some(usage) = completion.usage {
            debug!(
                "Received completion - tokens: {}/{}",
                usage.input_tokens, usage.output_tokens
            );
        }

        Ok(completion)
    }

    fn name(&self) -> &'static str {
        "together"
    }
}

#[derive(Debug, Serialize)]
struct TogetherRequest<'a> {
    model: &'a str,
    prompt: String,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}
