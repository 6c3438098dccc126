//! Error types for newsletter operations

use thiserror::Error;

/// Newsletter specific errors
///
/// These never escape the report-assembly boundary: quote, news, summary
/// and edit steps turn them into their documented fallbacks. They exist so
/// the clients underneath can use `?` and so the fallbacks can be logged
/// with a useful reason.
#[derive(Debug, Error)]
pub enum NewsletterError {
    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable {
        symbol: String,
        reason: String,
    },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// SerpAPI error
    #[error("SerpAPI error: {0}")]
    SerpApiError(String),

    /// Text-generation backend error
    #[error("LLM error: {0}")]
    LlmError(#[from] newsletter_llm::LLMError),

    /// Prompt template error
    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for newsletter operations
pub type Result<T> = std::result::Result<T, NewsletterError>;
