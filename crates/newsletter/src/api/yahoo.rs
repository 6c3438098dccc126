//! Yahoo Finance API client

use crate::error::{NewsletterError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use yahoo_finance_api as yahoo;

/// Range requested for daily history
///
/// Five calendar days always spans at least two trading sessions outside of
/// long market holidays.
pub const DAILY_HISTORY_RANGE: &str = "5d";

/// Yahoo Finance API client
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    timeout: Duration,
}

/// One daily bar reduced to what the newsletter needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyClose {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Get recent daily closes for a symbol, oldest first
    ///
    /// Bars without a usable close (zero, NaN) are dropped.
    pub async fn get_daily_closes(&self, symbol: &str, range: &str) -> Result<Vec<DailyClose>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| NewsletterError::YahooFinanceError(e.to_string()))?;

        let response = tokio::time::timeout(
            self.timeout,
            provider.get_quote_range(symbol, "1d", range),
        )
        .await
        .map_err(|_| {
            NewsletterError::YahooFinanceError(format!(
                "Request for {symbol} timed out after {:?}",
                self.timeout
            ))
        })?
        .map_err(|e| NewsletterError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| NewsletterError::YahooFinanceError(e.to_string()))?;

        let mut closes: Vec<DailyClose> = quotes
            .iter()
            .filter(|q| q.close.is_finite() && q.close > 0.0)
            .map(|q| DailyClose {
                timestamp: DateTime::from_timestamp(q.timestamp as i64, 0)
                    .unwrap_or_else(Utc::now),
                close: q.close,
            })
            .collect();

        closes.sort_by_key(|c| c.timestamp);

        tracing::debug!("Fetched {} daily closes for {}", closes.len(), symbol);

        Ok(closes)
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}
