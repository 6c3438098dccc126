//! Completion request and response types

use serde::{Deserialize, Serialize};

/// Request for a single prompt completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier (provider-specific)
    pub model: String,

    /// Prompt text
    pub prompt: String,

    /// Optional system prompt
    ///
    /// Chat backends send it as a system message; prompt-only backends
    /// prepend it to the prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Maximum tokens to generate
    pub max_tokens: usize,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Response from a completion call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text, trimmed
    pub text: String,

    /// Stop reason, when the backend reports one
    pub stop_reason: Option<StopReason>,

    /// Token usage statistics, when the backend reports them
    pub usage: Option<TokenUsage>,
}

/// Reason the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural completion
    EndTurn,

    /// Hit max tokens limit
    MaxTokens,

    /// Stop sequence encountered
    StopSequence,
}

impl StopReason {
    /// Map a backend `finish_reason` string
    pub fn from_finish_reason(reason: &str) -> Self {
        match reason {
            "length" => Self::MaxTokens,
            "stop_sequence" => Self::StopSequence,
            "stop" | "eos" => Self::EndTurn,
            other => {
                tracing::debug!("Unknown finish reason: {}", other);
                Self::EndTurn
            }
        }
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of input tokens
    pub input_tokens: usize,

    /// Number of output tokens
    pub output_tokens: usize,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

impl CompletionRequest {
    /// Create a builder for completion requests
    pub fn builder(model: impl Into<String>) -> CompletionRequestBuilder {
        CompletionRequestBuilder::new(model)
    }

    /// Prompt text with the system prompt, if any, prepended
    pub fn full_prompt(&self) -> String {
        match &self.system {
            Some(system) => format!("{system}\n\n{}", self.prompt),
            None => self.prompt.clone(),
        }
    }
}

/// Builder for CompletionRequest
pub struct CompletionRequestBuilder {
    model: String,
    prompt: String,
    system: Option<String>,
    max_tokens: usize,
    temperature: Option<f32>,
}

impl CompletionRequestBuilder {
    /// Create a new builder
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: String::new(),
            system: None,
            max_tokens: 300,
            temperature: None,
        }
    }

    /// Set the prompt text
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the maximum tokens
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build the completion request
    pub fn build(self) -> CompletionRequest {
        CompletionRequest {
            model: self.model,
            prompt: self.prompt,
            system: self.system,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}
