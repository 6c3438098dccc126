//! Daily "Magnificent Seven" stock newsletter
//!
//! This crate assembles a short market newsletter covering Apple, Microsoft,
//! Amazon, Alphabet, Meta, Nvidia and Tesla, plus the group as a whole via
//! the Roundhill Magnificent Seven ETF (MAGS). For each subject it gathers:
//!
//! - Latest close and day-over-day change (Yahoo Finance)
//! - Recent headlines (SerpAPI Google News)
//! - A short summary of those headlines from a text-generation backend
//!
//! The sections are concatenated between a fixed header and footer and a
//! final editing pass removes paragraphs that duplicate a summary.
//!
//! # Architecture
//!
//! Each data source sits behind a trait so a failing source only degrades
//! its own section:
//! - [`MarketQuoteProvider`]: absent quote renders the fallback line
//! - [`NewsProvider`]: failures yield no headlines
//! - [`Summarizer`]: failures yield a fixed fallback summary
//! - [`NewsletterEditor`]: failures return the draft unchanged
//!
//! # Example
//!
//! ```rust,ignore
//! use newsletter::{NewsletterBuilder, NewsletterConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = NewsletterConfig::from_env()?;
//!     let newsletter = NewsletterBuilder::from_config(&config)?.build().await;
//!     println!("{newsletter}");
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod editor;
pub mod error;
pub mod news;
pub mod newsletter;
pub mod prompts;
pub mod quote;
pub mod report;
pub mod subject;
pub mod summarizer;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use config::{LlmBackend, NewsletterConfig, NewsletterConfigBuilder};
pub use editor::{LlmNewsletterEditor, NewsletterEditor, PassThroughEditor};
pub use error::{NewsletterError, Result};
pub use news::{Headline, NewsProvider, SerpApiNewsProvider};
pub use newsletter::NewsletterBuilder;
pub use quote::{MarketQuoteProvider, Quote, YahooQuoteProvider};
pub use report::{ReportAssembler, parse_figures};
pub use subject::{Subject, SubjectKind};
pub use summarizer::{LlmSummarizer, Summarizer};
