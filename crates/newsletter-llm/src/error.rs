//! Error types for text-generation operations

use thiserror::Error;

/// Result type for text-generation operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// Errors that can occur while requesting a completion
#[derive(Error, Debug)]
pub enum LLMError {
    /// API request failed
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Invalid API key or authentication failed
    #[error("Invalid API key or authentication failed")]
    AuthenticationFailed,

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Response matched a known shape but carried no usable text
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Response JSON matched none of the known completion shapes
    #[error("Unrecognized response shape: {0}")]
    UnrecognizedShape(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl LLMError {
    /// Whether the backend answered with a body of an unknown shape
    pub fn is_unrecognized_shape(&self) -> bool {
        matches!(self, Self::UnrecognizedShape(_))
    }

    /// Map a non-success HTTP status to an error
    pub(crate) fn from_status(status: reqwest::StatusCode, body: String, model: &str) -> Self {
        match status.as_u16() {
            401 | 403 => Self::AuthenticationFailed,
            429 => Self::RateLimitExceeded(body),
            400 => Self::InvalidRequest(body),
            404 => Self::ModelNotFound(model.to_string()),
            _ => Self::RequestFailed(format!("HTTP {status}: {body}")),
        }
    }
}
