//! SerpAPI client for Google News search results

use crate::error::{NewsletterError, Result};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// One entry of `news_results`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerpNewsResult {
    /// Headline; a few aggregate entries (story clusters) have none
    #[serde(default)]
    pub title: Option<String>,
    /// Short description of the article
    #[serde(default)]
    pub snippet: Option<String>,
    /// Article URL
    #[serde(default)]
    pub link: Option<String>,
    /// Human-readable publish date
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SerpSearchResponse {
    #[serde(default)]
    news_results: Vec<SerpNewsResult>,
    #[serde(default)]
    error: Option<String>,
}

/// SerpAPI client
#[derive(Clone)]
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    rate_limiter: SharedRateLimiter,
}

impl SerpApiClient {
    /// Create a new SerpAPI client with rate limiting
    ///
    /// # Arguments
    /// * `api_key` - SerpAPI key
    /// * `base_url` - API root, normally "https://serpapi.com"
    /// * `rate_limit` - Requests per minute
    /// * `timeout` - Per-request timeout
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        rate_limit: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let per_minute = NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            rate_limiter,
        })
    }

    /// Run one Google News search and return the first page of results
    ///
    /// # Arguments
    /// * `query` - Free-text search query
    pub async fn search_news(&self, query: &str) -> Result<Vec<SerpNewsResult>> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}/search.json", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("api_key", self.api_key.as_str()),
                ("engine", "google_news"),
                ("tbm", "nws"),
            ])
            .send()
            .await
            .map_err(|e| NewsletterError::SerpApiError(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NewsletterError::SerpApiError(format!(
                "HTTP {status}: {body}"
            )));
        }

        let body = response.text().await?;
        let parsed: SerpSearchResponse = serde_json::from_str(&body)?;

        if let Some(error) = parsed.error {
            return Err(NewsletterError::SerpApiError(error));
        }

        tracing::debug!(
            "SerpAPI returned {} results for '{}'",
            parsed.news_results.len(),
            query
        );

        Ok(parsed.news_results)
    }
}
