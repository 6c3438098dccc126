//! Closing price and day-over-day change for one ticker

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::api::{DAILY_HISTORY_RANGE, YahooFinanceClient};
use crate::error::{NewsletterError, Result};

/// Latest close and percent change against the previous close
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub closing_price: f64,
    pub change_percent: f64,
}

impl Quote {
    /// Build a quote from closes ordered oldest first
    ///
    /// Returns `None` for an empty history. With a single close the change
    /// is exactly 0; a zero previous close is treated the same way.
    pub fn from_closes(closes: &[f64]) -> Option<Self> {
        let (&latest, earlier) = closes.split_last()?;

        let change_percent = match earlier.last() {
            Some(&previous) if previous != 0.0 => (latest - previous) / previous * 100.0,
            _ => 0.0,
        };

        Some(Self {
            closing_price: latest,
            change_percent,
        })
    }
}

/// Source of quotes
///
/// Absence (`None`) covers every failure: unknown symbol, empty history,
/// transport errors. Callers omit the price lines and carry on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketQuoteProvider: Send + Sync {
    /// Fetch the latest quote for `symbol`
    async fn fetch_quote(&self, symbol: &str) -> Option<Quote>;
}

/// Quote provider backed by Yahoo Finance daily history
pub struct YahooQuoteProvider {
    client: YahooFinanceClient,
}

impl YahooQuoteProvider {
    /// Create a provider over an existing client
    pub fn new(client: YahooFinanceClient) -> Self {
        Self { client }
    }

    async fn latest_quote(&self, symbol: &str) -> Result<Quote> {
        let history = self
            .client
            .get_daily_closes(symbol, DAILY_HISTORY_RANGE)
            .await?;

        let closes: Vec<f64> = history.iter().map(|c| c.close).collect();

        Quote::from_closes(&closes).ok_or_else(|| NewsletterError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "no price history".to_string(),
        })
    }
}

#[async_trait]
impl MarketQuoteProvider for YahooQuoteProvider {
    #[instrument(skip(self))]
    async fn fetch_quote(&self, symbol: &str) -> Option<Quote> {
        match self.latest_quote(symbol).await {
            Ok(quote) => {
                info!(
                    "{} closed at {:.2} ({:.2}%)",
                    symbol, quote.closing_price, quote.change_percent
                );
                Some(quote)
            }
            Err(e) => {
                warn!("Error fetching stock data for {}: {}", symbol, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_day_change() {
        let quote = Quote::from_closes(&[200.0, 210.0]).unwrap();
        assert_eq!(quote.closing_price, 210.0);
        assert!((quote.change_percent - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_uses_last_two_closes() {
        let quote = Quote::from_closes(&[50.0, 100.0, 90.0]).unwrap();
        assert_eq!(quote.closing_price, 90.0);
        assert!((quote.change_percent + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_day_has_zero_change() {
        let quote = Quote::from_closes(&[187.42]).unwrap();
        assert_eq!(quote.closing_price, 187.42);
        assert_eq!(quote.change_percent, 0.0);
    }

    #[test]
    fn test_zero_previous_close() {
        let quote = Quote::from_closes(&[0.0, 12.0]).unwrap();
        assert_eq!(quote.change_percent, 0.0);
    }

    #[test]
    fn test_empty_history_is_absent() {
        assert_eq!(Quote::from_closes(&[]), None);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_yahoo_provider_live() {
        let provider = YahooQuoteProvider::new(YahooFinanceClient::default());
        let quote = provider.fetch_quote("MAGS").await;
        assert!(quote.is_some_and(|q| q.closing_price > 0.0));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_yahoo_provider_unknown_symbol() {
        let provider = YahooQuoteProvider::new(YahooFinanceClient::default());
        assert!(provider.fetch_quote("INVALID_SYMBOL_12345").await.is_none());
    }
}
