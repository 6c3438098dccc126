//! API clients for market data and news search

pub mod serpapi;
pub mod yahoo;

pub use serpapi::{SerpApiClient, SerpNewsResult};
pub use yahoo::{DAILY_HISTORY_RANGE, DailyClose, YahooFinanceClient};
