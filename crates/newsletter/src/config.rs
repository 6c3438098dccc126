//! Configuration for a newsletter run
//!
//! Everything the providers need (keys, endpoints, model parameters) lives in
//! [`NewsletterConfig`] and is handed to each component at construction.

use crate::error::{NewsletterError, Result};
use newsletter_llm::providers::{OpenAIConfig, TogetherConfig};
use newsletter_utils::{env_flag, env_or};
use std::str::FromStr;
use std::time::Duration;

/// Default model identifier for both summaries and editing
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free";

/// Default SerpAPI endpoint
pub const DEFAULT_SERPAPI_BASE: &str = "https://serpapi.com";

/// Which text-generation backend writes summaries and edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmBackend {
    /// Hosted completions API
    #[default]
    Hosted,
    /// Local OpenAI-compatible model server
    Local,
}

impl FromStr for LlmBackend {
    type Err = NewsletterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hosted" | "together" => Ok(Self::Hosted),
            "local" | "openai" => Ok(Self::Local),
            other => Err(NewsletterError::ConfigError(format!(
                "Unknown LLM backend '{other}', expected 'hosted' or 'local'"
            ))),
        }
    }
}

/// Configuration for one newsletter run
#[derive(Debug, Clone)]
pub struct NewsletterConfig {
    /// SerpAPI key; news lookups return nothing without it
    pub serpapi_key: Option<String>,

    /// SerpAPI base URL
    pub serpapi_base: String,

    /// Request budget for the news search
    pub news_rate_limit_per_minute: u32,

    /// Backend used for summaries and editing
    pub backend: LlmBackend,

    /// Model identifier sent with every completion request
    pub model: String,

    /// Hosted backend settings
    pub hosted: TogetherConfig,

    /// Local backend settings
    pub local: OpenAIConfig,

    /// Token cap for one summary
    pub summary_max_tokens: usize,

    /// Token cap for the editing pass
    pub editor_max_tokens: usize,

    /// Sampling temperature
    pub temperature: f32,

    /// Headlines per company passed to the summarizer
    pub headline_limit: usize,

    /// Timeout for market-data and news requests
    pub request_timeout: Duration,

    /// Assemble company sections concurrently
    pub parallel_subjects: bool,

    /// Run the duplicate-removal pass
    pub edit_newsletter: bool,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            serpapi_key: None,
            serpapi_base: DEFAULT_SERPAPI_BASE.to_string(),
            news_rate_limit_per_minute: 60,
            backend: LlmBackend::Hosted,
            model: DEFAULT_MODEL.to_string(),
            hosted: TogetherConfig::default(),
            local: OpenAIConfig::default(),
            summary_max_tokens: 300,
            editor_max_tokens: 2000,
            temperature: 0.7,
            headline_limit: 5,
            request_timeout: Duration::from_secs(30),
            parallel_subjects: false,
            edit_newsletter: true,
        }
    }
}

impl NewsletterConfig {
    /// Create a new configuration builder
    pub fn builder() -> NewsletterConfigBuilder {
        NewsletterConfigBuilder::default()
    }

    /// Read configuration from the process environment
    ///
    /// Missing keys are not errors: the affected calls fail later and the
    /// newsletter degrades to its fallback text.
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.headline_limit == 0 {
            return Err(NewsletterError::ConfigError(
                "headline_limit must be greater than 0".to_string(),
            ));
        }

        if self.summary_max_tokens == 0 || self.editor_max_tokens == 0 {
            return Err(NewsletterError::ConfigError(
                "token limits must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(NewsletterError::ConfigError(format!(
                "temperature must be within 0.0..=2.0, got {}",
                self.temperature
            )));
        }

        if self.news_rate_limit_per_minute == 0 {
            return Err(NewsletterError::ConfigError(
                "news_rate_limit_per_minute must be greater than 0".to_string(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(NewsletterError::ConfigError("model must not be empty".to_string()));
        }

        Ok(())
    }
}

/// Builder for NewsletterConfig
#[derive(Debug, Default)]
pub struct NewsletterConfigBuilder {
    serpapi_key: Option<String>,
    serpapi_base: Option<String>,
    news_rate_limit_per_minute: Option<u32>,
    backend: Option<LlmBackend>,
    model: Option<String>,
    hosted: Option<TogetherConfig>,
    local: Option<OpenAIConfig>,
    summary_max_tokens: Option<usize>,
    editor_max_tokens: Option<usize>,
    temperature: Option<f32>,
    headline_limit: Option<usize>,
    request_timeout: Option<Duration>,
    parallel_subjects: Option<bool>,
    edit_newsletter: Option<bool>,
}

impl NewsletterConfigBuilder {
    /// Set the SerpAPI key
    pub fn serpapi_key(mut self, key: impl Into<String>) -> Self {
        self.serpapi_key = Some(key.into());
        self
    }

    /// Set the SerpAPI base URL
    pub fn serpapi_base(mut self, base: impl Into<String>) -> Self {
        self.serpapi_base = Some(base.into());
        self
    }

    /// Set the news search request budget
    pub fn news_rate_limit_per_minute(mut self, limit: u32) -> Self {
        self.news_rate_limit_per_minute = Some(limit);
        self
    }

    /// Set the text-generation backend
    pub fn backend(mut self, backend: LlmBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set hosted backend settings
    pub fn hosted(mut self, config: TogetherConfig) -> Self {
        self.hosted = Some(config);
        self
    }

    /// Set local backend settings
    pub fn local(mut self, config: OpenAIConfig) -> Self {
        self.local = Some(config);
        self
    }

    /// Set the summary token cap
    pub fn summary_max_tokens(mut self, tokens: usize) -> Self {
        self.summary_max_tokens = Some(tokens);
        self
    }

    /// Set the editor token cap
    pub fn editor_max_tokens(mut self, tokens: usize) -> Self {
        self.editor_max_tokens = Some(tokens);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set how many headlines per company reach the summarizer
    pub fn headline_limit(mut self, limit: usize) -> Self {
        self.headline_limit = Some(limit);
        self
    }

    /// Set the data-source request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Assemble company sections concurrently
    pub fn parallel_subjects(mut self, parallel: bool) -> Self {
        self.parallel_subjects = Some(parallel);
        self
    }

    /// Enable or disable the editing pass
    pub fn edit_newsletter(mut self, edit: bool) -> Self {
        self.edit_newsletter = Some(edit);
        self
    }

    /// Fill unset fields from the environment
    ///
    /// Reads `SERPAPI_KEY`, `SERPAPI_BASE`, `NEWSLETTER_LLM_BACKEND`,
    /// `NEWSLETTER_MODEL`, `NEWSLETTER_PARALLEL`, `TOGETHER_API_KEY`,
    /// `TOGETHER_API_BASE`, `LOCAL_LLM_API_BASE` and `LOCAL_LLM_API_KEY`.
    /// Values already set on the builder take precedence.
    pub fn with_env(mut self) -> Self {
        if self.serpapi_key.is_none() {
            self.serpapi_key = std::env::var("SERPAPI_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty());
        }

        if self.serpapi_base.is_none() {
            self.serpapi_base = Some(env_or("SERPAPI_BASE", DEFAULT_SERPAPI_BASE));
        }

        if self.backend.is_none() {
            if let Ok(raw) = std::env::var("NEWSLETTER_LLM_BACKEND") {
                match raw.parse() {
                    Ok(backend) => self.backend = Some(backend),
                    Err(e) => tracing::warn!("Ignoring NEWSLETTER_LLM_BACKEND: {}", e),
                }
            }
        }

        if self.model.is_none() {
            self.model = Some(env_or("NEWSLETTER_MODEL", DEFAULT_MODEL));
        }

        if self.parallel_subjects.is_none() {
            self.parallel_subjects = env_flag("NEWSLETTER_PARALLEL");
        }

        if self.hosted.is_none() {
            self.hosted = Some(TogetherConfig::from_env().unwrap_or_else(|e| {
                tracing::debug!("Hosted backend not configured: {}", e);
                TogetherConfig::default()
            }));
        }

        if self.local.is_none() {
            self.local = Some(OpenAIConfig::from_env());
        }

        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<NewsletterConfig> {
        let defaults = NewsletterConfig::default();

        let config = NewsletterConfig {
            serpapi_key: self.serpapi_key,
            serpapi_base: self.serpapi_base.unwrap_or(defaults.serpapi_base),
            news_rate_limit_per_minute: self
                .news_rate_limit_per_minute
                .unwrap_or(defaults.news_rate_limit_per_minute),
            backend: self.backend.unwrap_or(defaults.backend),
            model: self.model.unwrap_or(defaults.model),
            hosted: self.hosted.unwrap_or(defaults.hosted),
            local: self.local.unwrap_or(defaults.local),
            summary_max_tokens: self.summary_max_tokens.unwrap_or(defaults.summary_max_tokens),
            editor_max_tokens: self.editor_max_tokens.unwrap_or(defaults.editor_max_tokens),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            headline_limit: self.headline_limit.unwrap_or(defaults.headline_limit),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            parallel_subjects: self.parallel_subjects.unwrap_or(defaults.parallel_subjects),
            edit_newsletter: self.edit_newsletter.unwrap_or(defaults.edit_newsletter),
        };

        config.validate()?;
        Ok(config)
    }
}
