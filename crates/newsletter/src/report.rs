//! Rendering of one subject's section

use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{info, instrument, warn};

use crate::news::NewsProvider;
use crate::quote::{MarketQuoteProvider, Quote};
use crate::subject::{Subject, SubjectKind};
use crate::summarizer::Summarizer;

static CLOSING_PRICE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Today's Closing Price: \$(\S+)$").expect("closing price pattern is valid")
});

static CHANGE_PERCENT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Change Percent: (\S+)%$").expect("change percent pattern is valid")
});

/// Builds the section for one subject from quote, news and summary
pub struct ReportAssembler {
    quotes: Arc<dyn MarketQuoteProvider>,
    news: Arc<dyn NewsProvider>,
    summarizer: Arc<dyn Summarizer>,
    headline_limit: usize,
}

impl ReportAssembler {
    pub fn new(
        quotes: Arc<dyn MarketQuoteProvider>,
        news: Arc<dyn NewsProvider>,
        summarizer: Arc<dyn Summarizer>,
        headline_limit: usize,
    ) -> Self {
        Self {
            quotes,
            news,
            summarizer,
            headline_limit,
        }
    }

    /// Assemble the section for `subject`
    ///
    /// Without a quote neither news nor summary is requested. A company
    /// section becomes the single fallback line; the aggregate section is
    /// left out entirely.
    #[instrument(skip(self, subject), fields(subject = %subject))]
    pub async fn assemble(&self, subject: &Subject) -> String {
        info!("Processing {}", subject);

        let Some(quote) = self.quotes.fetch_quote(&subject.ticker).await else {
            warn!("No quote for {}, omitting its figures", subject);
            return match subject.kind {
                SubjectKind::Company => render_unavailable(subject),
                SubjectKind::Aggregate => String::new(),
            };
        };

        let mut headlines = self.news.fetch_headlines(&subject.news_query()).await;
        if let Some(cap) = subject.headline_cap(self.headline_limit) {
            headlines.truncate(cap);
        }

        let summary = self.summarizer.summarize(&headlines, &subject.name).await;

        render_section(subject, quote, &summary)
    }
}

/// Full section with price lines and summary
pub fn render_section(subject: &Subject, quote: Quote, summary: &str) -> String {
    format!(
        "**{}**\nToday's Closing Price: ${:.2}\nChange Percent: {:.2}%\nNews Summary: {}\n\n",
        subject.heading(),
        quote.closing_price,
        quote.change_percent,
        summary
    )
}

/// Section for a subject whose quote could not be fetched
pub fn render_unavailable(subject: &Subject) -> String {
    format!("Could not retrieve data for {subject}\n\n")
}

/// Recover `(closing_price, change_percent)` from a rendered section
pub fn parse_figures(section: &str) -> Option<(f64, f64)> {
    let close: f64 = CLOSING_PRICE_LINE.captures(section)?[1].parse().ok()?;
    let change: f64 = CHANGE_PERCENT_LINE.captures(section)?[1].parse().ok()?;

    Some((close, change))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::{Headline, MockNewsProvider};
    use crate::quote::MockMarketQuoteProvider;
    use crate::summarizer::MockSummarizer;

    fn quote(closing_price: f64, change_percent: f64) -> Quote {
        Quote {
            closing_price,
            change_percent,
        }
    }

    fn headlines(n: usize) -> Vec<Headline> {
        (1..=n)
            .map(|i| Headline::new(format!("Headline {i}"), Some(format!("Snippet {i}"))))
            .collect()
    }

    fn assembler(
        quotes: MockMarketQuoteProvider,
        news: MockNewsProvider,
        summarizer: MockSummarizer,
    ) -> ReportAssembler {
        ReportAssembler::new(Arc::new(quotes), Arc::new(news), Arc::new(summarizer), 5)
    }

    #[test]
    fn test_render_company_section() {
        let apple = Subject::company("Apple", "AAPL");
        assert_eq!(
            render_section(&apple, quote(210.0, 5.0), "Strong quarter."),
            "**Apple (AAPL):**\nToday's Closing Price: $210.00\nChange Percent: 5.00%\nNews Summary: Strong quarter.\n\n"
        );
    }

    #[test]
    fn test_render_aggregate_section() {
        let section = render_section(&Subject::aggregate(), quote(51.237, -1.456), "Mixed day.");
        assert!(section.starts_with("**Roundhill Magnificent Seven ETF (BATS: MAGS)**\n"));
        assert!(section.contains("Change Percent: -1.46%\n"));
    }

    #[test]
    fn test_positive_change_has_no_plus_sign() {
        let section = render_section(&Subject::company("Apple", "AAPL"), quote(187.0, 1.5), "Up.");
        assert!(section.contains("\nChange Percent: 1.50%\n"));
        assert!(!section.contains('+'));
    }

    #[test]
    fn test_render_unavailable() {
        assert_eq!(
            render_unavailable(&Subject::company("Amazon", "AMZN")),
            "Could not retrieve data for Amazon (AMZN)\n\n"
        );
    }

    #[test]
    fn test_parse_figures_round_trip() {
        let meta = Subject::company("Meta", "META");
        for (close, change) in [(612.345, 0.0), (98.7, -3.219), (1234.5, 12.0)] {
            let section = render_section(&meta, quote(close, change), "Summary.");
            let (parsed_close, parsed_change) = parse_figures(&section).unwrap();
            assert!((parsed_close - close).abs() <= 0.005 + 1e-9);
            assert!((parsed_change - change).abs() <= 0.005 + 1e-9);
        }
    }

    #[test]
    fn test_parse_figures_on_fallback() {
        assert_eq!(parse_figures("Could not retrieve data for Tesla (TSLA)\n\n"), None);
    }

    #[tokio::test]
    async fn test_missing_quote_short_circuits() {
        let mut quotes = MockMarketQuoteProvider::new();
        quotes.expect_fetch_quote().times(1).returning(|_| None);
        let mut news = MockNewsProvider::new();
        news.expect_fetch_headlines().never();
        let mut summarizer = MockSummarizer::new();
        summarizer.expect_summarize().never();

        let section = assembler(quotes, news, summarizer)
            .assemble(&Subject::company("Microsoft", "MSFT"))
            .await;

        assert_eq!(section, "Could not retrieve data for Microsoft (MSFT)\n\n");
    }

    #[tokio::test]
    async fn test_missing_aggregate_quote_renders_nothing() {
        let mut quotes = MockMarketQuoteProvider::new();
        quotes.expect_fetch_quote().times(1).returning(|_| None);
        let mut news = MockNewsProvider::new();
        news.expect_fetch_headlines().never();
        let mut summarizer = MockSummarizer::new();
        summarizer.expect_summarize().never();

        let section = assembler(quotes, news, summarizer)
            .assemble(&Subject::aggregate())
            .await;

        assert_eq!(section, "");
    }

    #[tokio::test]
    async fn test_company_headlines_capped_at_five() {
        let mut quotes = MockMarketQuoteProvider::new();
        quotes
            .expect_fetch_quote()
            .returning(|_| Some(quote(400.0, 1.0)));
        let mut news = MockNewsProvider::new();
        news.expect_fetch_headlines()
            .withf(|query| query.to_string() == "Microsoft stock news")
            .returning(|_| headlines(8));
        let mut summarizer = MockSummarizer::new();
        summarizer
            .expect_summarize()
            .withf(|h, name| h.len() == 5 && h[4].title == "Headline 5" && name.to_string() == "Microsoft")
            .times(1)
            .returning(|_, _| "Cloud growth continues.".to_string());

        let section = assembler(quotes, news, summarizer)
            .assemble(&Subject::company("Microsoft", "MSFT"))
            .await;

        assert!(section.ends_with("News Summary: Cloud growth continues.\n\n"));
    }

    #[tokio::test]
    async fn test_aggregate_headlines_uncapped() {
        let mut quotes = MockMarketQuoteProvider::new();
        quotes
            .expect_fetch_quote()
            .withf(|symbol| symbol.to_string() == "MAGS")
            .returning(|_| Some(quote(52.1, 0.4)));
        let mut news = MockNewsProvider::new();
        news.expect_fetch_headlines()
            .withf(|query| query.to_string() == "Magnificent Seven stock news")
            .returning(|_| headlines(9));
        let mut summarizer = MockSummarizer::new();
        summarizer
            .expect_summarize()
            .withf(|h, name| h.len() == 9 && name.to_string() == "Magnificent Seven")
            .returning(|_, _| "Group drifted higher.".to_string());

        let section = assembler(quotes, news, summarizer)
            .assemble(&Subject::aggregate())
            .await;

        assert!(section.starts_with("**Roundhill Magnificent Seven ETF (BATS: MAGS)**\nToday's Closing Price: $52.10\nChange Percent: 0.40%\n"));
    }
}
