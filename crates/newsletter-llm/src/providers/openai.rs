//! OpenAI-compatible chat provider
//!
//! This module implements the LLMProvider trait for any server speaking the
//! OpenAI chat-completions protocol. The newsletter uses it as its local
//! backend (LM Studio, llama.cpp server, vLLM, Ollama), but it works against
//! the OpenAI API itself as well.
//! See: https://platform.openai.com/docs/api-reference/chat
//!
//! # Examples
//!
//! ```no_run
//! use newsletter_llm::{CompletionRequest, LLMProvider};
//! use newsletter_llm::providers::{OpenAIConfig, OpenAIProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Local deployments usually ignore the key
//!     let config = OpenAIConfig::new("not-needed")
//!         .with_api_base("http://localhost:1234/v1")
//!         .with_timeout(180);
//!
//!     let provider = OpenAIProvider::with_config(config)?;
//!
//!     let request = CompletionRequest::builder("llama-3-8b-instruct")
//!         .prompt("Hello!")
//!         .max_tokens(100)
//!         .build();
//!
//!     let response = provider.complete(request).await?;
//!     println!("{}", response.text);
//!     Ok(())
//! }
//! ```

use crate::shape::decode_completion;
use crate::{CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_LOCAL_API_BASE: &str = "http://localhost:1234/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const PLACEHOLDER_API_KEY: &str = "not-needed";

/// Configuration for OpenAI-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the API (default: "http://localhost:1234/v1")
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl OpenAIConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the base URL from `LOCAL_LLM_API_BASE` and the key from
    /// `LOCAL_LLM_API_KEY`. Both are optional since local servers rarely
    /// check credentials.
    pub fn from_env() -> Self {
        let api_base = std::env::var("LOCAL_LLM_API_BASE")
            .unwrap_or_else(|_| DEFAULT_LOCAL_API_BASE.to_string());
        let api_key = std::env::var("LOCAL_LLM_API_KEY")
            .unwrap_or_else(|_| PLACEHOLDER_API_KEY.to_string());

        Self {
            api_key,
            api_base,
            ..Self::default()
        }
    }

    /// Set custom API base URL
    ///
    /// - LM Studio: "http://localhost:1234/v1"
    /// - llama.cpp: "http://localhost:8080/v1"
    /// - Ollama: "http://localhost:11434/v1"
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

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: PLACEHOLDER_API_KEY.to_string(),
            api_base: DEFAULT_LOCAL_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// OpenAI-compatible chat provider
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    /// Create a new provider with custom configuration
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a provider from environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(OpenAIConfig::from_env())
    }

    /// Get the current configuration
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!("Sending request to chat API at {}", self.config.api_base);

        let openai_request = OpenAIRequest {
            model: &request.model,
            messages: Message::transcript(&request),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LLMError::from_status(status, body, &request.model));
        }

        let completion = decode_completion(&body)?;

        debug!("Received response - stop_reason: {:?}", completion.stop_reason);

        Ok(completion)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::POST;
    use httpmock::MockServer;

    #[test]
    fn test_provider_defaults() {
        let provider = OpenAIProvider::with_config(OpenAIConfig::default()).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.config().api_key, "not-needed");
        assert_eq!(provider.config().api_base, "http://localhost:1234/v1");
    }

    #[test]
    fn test_request_carries_system_and_user() {
        let request = CompletionRequest::builder("m")
            .system("You are a financial expert.")
            .prompt("Summarize")
            .build();

        let body = OpenAIRequest {
            model: &request.model,
            messages: Message::transcript(&request),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "Summarize");
    }

    #[tokio::test]
    async fn test_chat_completion_roundtrip() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"{
                        "choices": [{
                            "index": 0,
                            "message": {"role": "assistant", "content": "Meta shares rose."},
                            "finish_reason": "stop"
                        }],
                        "usage": {"prompt_tokens": 12, "completion_tokens": 4}
                    }"#,
                );
        });

        let config = OpenAIConfig::default().with_api_base(server.base_url());
        let provider = OpenAIProvider::with_config(config).unwrap();
        let request = CompletionRequest::builder("local-model").prompt("hi").build();

        let response = provider.complete(request).await.unwrap();
        mock.assert();
        assert_eq!(response.text, "Meta shares rose.");
        assert_eq!(response.usage.map(|u| u.output_tokens), Some(4));
    }

    #[tokio::test]
    async fn test_server_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(500).body("model crashed");
        });

        let config = OpenAIConfig::default().with_api_base(server.base_url());
        let provider = OpenAIProvider::with_config(config).unwrap();
        let request = CompletionRequest::builder("local-model").prompt("hi").build();

        let err = provider.complete(request).await.unwrap_err();
        assert!(matches!(err, LLMError::RequestFailed(ref msg) if msg.contains("model crashed")));
    }
}
