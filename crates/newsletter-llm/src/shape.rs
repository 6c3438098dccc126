//! Decoding of completion response bodies
//!
//! Completion endpoints answer in one of two known layouts:
//!
//! - nested: `{"output": {"choices": [{"text": "..."}]}}`
//! - flat: `{"choices": [{"text": "..."}]}`, where chat servers put the text
//!   under `choices[].message.content` instead
//!
//! Anything else decodes into [`CompletionShape::Unrecognized`] and surfaces
//! as [`LLMError::UnrecognizedShape`]; nothing is coerced silently.

use crate::{CompletionResponse, LLMError, Result, StopReason, TokenUsage};
use serde::Deserialize;

/// A completion response body, by layout
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CompletionShape {
    /// Choices wrapped in an `output` object
    Nested {
        /// The wrapped choice list
        output: ChoiceList,
    },

    /// Choices at the top level
    Flat(ChoiceList),

    /// Any other JSON value
    Unrecognized(serde_json::Value),
}

/// List of generated choices plus optional usage
#[derive(Debug, Deserialize)]
pub struct ChoiceList {
    /// Generated choices; only the first is used
    pub choices: Vec<Choice>,

    /// Token usage, if reported
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One generated choice
#[derive(Debug, Deserialize)]
pub struct Choice {
    /// Completion-style text
    #[serde(default)]
    pub text: Option<String>,

    /// Chat-style message
    #[serde(default)]
    pub message: Option<ChoiceMessage>,

    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Chat-style message inside a choice
#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    /// Message text
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage as reported by the backend
#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: usize,
    #[serde(default)]
    pub completion_tokens: usize,
}

impl CompletionShape {
    /// Parse a raw response body
    ///
    /// A body that is not JSON at all is a serialization error, not an
    /// unrecognized shape.
    pub fn parse(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Short name of the layout, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Nested { .. } => "nested",
            Self::Flat(_) => "flat",
            Self::Unrecognized(_) => "unrecognized",
        }
    }

    /// Extract the generated text of the first choice
    pub fn into_response(self) -> Result<CompletionResponse> {
        let list = match self {
            Self::Nested { output } => output,
            Self::Flat(list) => list,
            Self::Unrecognized(value) => {
                let preview: String = value.to_string().chars().take(200).collect();
                return Err(LLMError::UnrecognizedShape(preview));
            }
        };

        let usage = list.usage.map(|u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        });

        let choice = list.choices.into_iter().next().ok_or_else(|| {
            LLMError::UnexpectedResponse("No choices in response".to_string())
        })?;

        let stop_reason = choice
            .finish_reason
            .as_deref()
            .map(StopReason::from_finish_reason);

        let text = choice
            .text
            .or_else(|| choice.message.and_then(|m| m.content))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                LLMError::UnexpectedResponse("First choice carries no text".to_string())
            })?;

        Ok(CompletionResponse {
            text,
            stop_reason,
            usage,
        })
    }
}

/// Decode a response body straight into a [`CompletionResponse`]
pub fn decode_completion(body: &str) -> Result<CompletionResponse> {
    let shape = CompletionShape::parse(body)?;
    tracing::debug!(shape = shape.kind(), "Decoded completion response");
    shape.into_response()
}
