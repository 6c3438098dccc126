//! Recent headlines for a subject

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::api::{SerpApiClient, SerpNewsResult};

/// Placeholder used when a headline comes without a snippet
pub const MISSING_SNIPPET: &str = "No summary available";

/// A news headline with its optional snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub snippet: Option<String>,
}

impl Headline {
    pub fn new(title: impl Into<String>, snippet: Option<String>) -> Self {
        Self {
            title: title.into(),
            snippet,
        }
    }

    /// Snippet text, or the fixed placeholder
    pub fn snippet_or_placeholder(&self) -> &str {
        self.snippet
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(MISSING_SNIPPET)
    }

    fn from_search_result(result: SerpNewsResult) -> Option<Self> {
        let title = result.title.filter(|t| !t.trim().is_empty())?;
        Some(Self::new(title, result.snippet))
    }
}

/// Source of headlines
///
/// One request, one page of results, in the order the source returns them.
/// Failures produce an empty list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Search headlines for a free-text query
    async fn fetch_headlines(&self, query: &str) -> Vec<Headline>;
}

/// News provider backed by SerpAPI's Google News engine
pub struct SerpApiNewsProvider {
    client: Option<SerpApiClient>,
}

impl SerpApiNewsProvider {
    /// Create a provider over an existing client
    pub fn new(client: SerpApiClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// A provider with no API key; every search comes back empty
    pub fn disabled() -> Self {
        Self { client: None }
    }
}

#[async_trait]
impl NewsProvider for SerpApiNewsProvider {
    #[instrument(skip(self))]
    async fn fetch_headlines(&self, query: &str) -> Vec<Headline> {
        let Some(client) = &self.client else {
            warn!("SERPAPI_KEY not configured, skipping news search for '{}'", query);
            return Vec::new();
        };

        match client.search_news(query).await {
            Ok(results) => results
                .into_iter()
                .filter_map(Headline::from_search_result)
                .collect(),
            Err(e) => {
                warn!("Error fetching news for '{}': {}", query, e);
                Vec::new()
            }
        }
    }
}
