//! Newsletter assembly
//!
//! [`NewsletterBuilder`] renders the aggregate section followed by one
//! section per company, wraps them in the fixed header and footer, and runs
//! the result through a [`NewsletterEditor`].

use chrono::{DateTime, Local};
use futures::future::join_all;
use newsletter_llm::LLMProvider;
use newsletter_llm::providers::{OpenAIProvider, TogetherProvider};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::api::{SerpApiClient, YahooFinanceClient};
use crate::config::{LlmBackend, NewsletterConfig};
use crate::editor::{LlmNewsletterEditor, NewsletterEditor, PassThroughEditor};
use crate::error::Result;
use crate::news::SerpApiNewsProvider;
use crate::quote::YahooQuoteProvider;
use crate::report::ReportAssembler;
use crate::subject::Subject;
use crate::summarizer::LlmSummarizer;

/// Sign-off appended after the last section
pub const FOOTER: &str = "Stay tuned for more updates.\n\n- **The Magnificent Seven Insider**\n";

/// Header for a newsletter generated at `now`, up to the aggregate section
pub fn header(now: DateTime<Local>) -> String {
    format!(
        "**Today's ({}) Stock Market Update: The Magnificent Seven (MAGS)**\n\n\
         Hello Investors,\n\n\
         Here's the latest market movement of the Magnificent Seven stocks:\n\n\
         **Magnificent Seven (Overall):**\n\n",
        now.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Builds the complete newsletter
pub struct NewsletterBuilder {
    assembler: ReportAssembler,
    editor: Arc<dyn NewsletterEditor>,
    companies: Vec<Subject>,
    parallel: bool,
}

impl NewsletterBuilder {
    /// Create a builder covering the Magnificent Seven
    pub fn new(assembler: ReportAssembler, editor: Arc<dyn NewsletterEditor>) -> Self {
        Self {
            assembler,
            editor,
            companies: Subject::magnificent_seven(),
            parallel: false,
        }
    }

    /// Wire Yahoo Finance, SerpAPI and the configured text-generation backend
    pub fn from_config(config: &NewsletterConfig) -> Result<Self> {
        config.validate()?;

        let provider: Arc<dyn LLMProvider> = match config.backend {
            LlmBackend::Hosted => Arc::new(TogetherProvider::with_config(config.hosted.clone())?),
            LlmBackend::Local => Arc::new(OpenAIProvider::with_config(config.local.clone())?),
        };
        info!("Using {} backend with model {}", provider.name(), config.model);

        let quotes = Arc::new(YahooQuoteProvider::new(YahooFinanceClient::new(
            config.request_timeout,
        )));

        let news = match &config.serpapi_key {
            Some(key) => SerpApiNewsProvider::new(SerpApiClient::new(
                key.clone(),
                config.serpapi_base.clone(),
                config.news_rate_limit_per_minute,
                config.request_timeout,
            )?),
            None => {
                warn!("SERPAPI_KEY is not set, news summaries will be empty");
                SerpApiNewsProvider::disabled()
            }
        };

        let summarizer = LlmSummarizer::new(provider.clone(), config.model.clone())
            .with_max_tokens(config.summary_max_tokens)
            .with_temperature(config.temperature);

        let editor: Arc<dyn NewsletterEditor> = if config.edit_newsletter {
            Arc::new(
                LlmNewsletterEditor::new(provider, config.model.clone())
                    .with_max_tokens(config.editor_max_tokens)
                    .with_temperature(config.temperature),
            )
        } else {
            Arc::new(PassThroughEditor)
        };

        let assembler = ReportAssembler::new(
            quotes,
            Arc::new(news),
            Arc::new(summarizer),
            config.headline_limit,
        );

        Ok(Self::new(assembler, editor).with_parallel(config.parallel_subjects))
    }

    /// Assemble company sections concurrently
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Replace the company list
    pub fn with_companies(mut self, companies: Vec<Subject>) -> Self {
        self.companies = companies;
        self
    }

    /// Build the newsletter stamped with the current local time
    pub async fn build(&self) -> String {
        self.build_at(Local::now()).await
    }

    /// Build the newsletter stamped with `now`
    #[instrument(skip(self), fields(companies = self.companies.len(), parallel = self.parallel))]
    pub async fn build_at(&self, now: DateTime<Local>) -> String {
        let mut draft = header(now);

        draft.push_str(&self.assembler.assemble(&Subject::aggregate()).await);

        for section in self.company_sections().await {
            draft.push_str(&section);
        }

        draft.push_str(FOOTER);

        info!("Draft assembled, {} chars", draft.len());
        self.editor.edit(&draft).await
    }

    async fn company_sections(&self) -> Vec<String> {
        if self.parallel {
            join_all(self.companies.iter().map(|s| self.assembler.assemble(s))).await
        } else {
            let mut sections = Vec::with_capacity(self.companies.len());
            for subject in &self.companies {
                sections.push(self.assembler.assemble(subject).await);
            }
            sections
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::{Headline, MockNewsProvider};
    use crate::quote::{MockMarketQuoteProvider, Quote};
    use crate::report::parse_figures;
    use crate::summarizer::MockSummarizer;
    use crate::testing::{Reply, ScriptedProvider};
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 16, 30, 5).unwrap()
    }

    /// Quotes for every ticker except AMZN (third company)
    fn assembler() -> ReportAssembler {
        let mut quotes = MockMarketQuoteProvider::new();
        quotes.expect_fetch_quote().returning(|symbol| match symbol {
            "AMZN" => None,
            "MAGS" => Some(Quote {
                closing_price: 52.0,
                change_percent: 0.5,
            }),
            _ => Some(Quote {
                closing_price: 100.0,
                change_percent: -1.25,
            }),
        });

        let mut news = MockNewsProvider::new();
        news.expect_fetch_headlines()
            .returning(|query| vec![Headline::new(format!("{query} today"), None)]);

        let mut summarizer = MockSummarizer::new();
        summarizer
            .expect_summarize()
            .returning(|_, name| format!("{name} summary."));

        ReportAssembler::new(Arc::new(quotes), Arc::new(news), Arc::new(summarizer), 5)
    }

    fn company_positions(text: &str) -> Vec<usize> {
        Subject::magnificent_seven()
            .iter()
            .map(|s| text.find(&s.to_string()).unwrap())
            .collect()
    }

    #[test]
    fn test_header_layout() {
        assert_eq!(
            header(fixed_time()),
            "**Today's (2025-03-14 16:30:05) Stock Market Update: The Magnificent Seven (MAGS)**\n\n\
             Hello Investors,\n\n\
             Here's the latest market movement of the Magnificent Seven stocks:\n\n\
             **Magnificent Seven (Overall):**\n\n"
        );
    }

    #[tokio::test]
    async fn test_one_failed_subject_degrades_one_section() {
        let builder = NewsletterBuilder::new(assembler(), Arc::new(PassThroughEditor));
        let text = builder.build_at(fixed_time()).await;

        assert!(text.starts_with(&header(fixed_time())));
        assert!(text.ends_with(FOOTER));

        let body = &text[header(fixed_time()).len()..text.len() - FOOTER.len()];
        let sections: Vec<&str> = body.split_inclusive("\n\n").collect();
        assert_eq!(sections.len(), 8);

        assert!(sections[0].starts_with("**Roundhill Magnificent Seven ETF (BATS: MAGS)**"));
        assert_eq!(parse_figures(sections[0]), Some((52.0, 0.5)));

        let companies = Subject::magnificent_seven();
        for (subject, section) in companies.iter().zip(&sections[1..]) {
            if subject.ticker == "AMZN" {
                assert_eq!(*section, "Could not retrieve data for Amazon (AMZN)\n\n");
            } else {
                assert!(section.starts_with(&format!("**{}**\n", subject.heading())));
                assert_eq!(parse_figures(section), Some((100.0, -1.25)));
                assert!(section.ends_with(&format!("News Summary: {} summary.\n\n", subject.name)));
            }
        }

        let positions = company_positions(&text);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_missing_aggregate_quote_leaves_overview_empty() {
        let mut quotes = MockMarketQuoteProvider::new();
        quotes.expect_fetch_quote().returning(|symbol| match symbol {
            "MAGS" => None,
            _ => Some(Quote {
                closing_price: 187.0,
                change_percent: 1.5,
            }),
        });
        let mut news = MockNewsProvider::new();
        news.expect_fetch_headlines().returning(|_| Vec::new());
        let mut summarizer = MockSummarizer::new();
        summarizer
            .expect_summarize()
            .returning(|_, _| "No significant news to summarize.".to_string());
        let assembler =
            ReportAssembler::new(Arc::new(quotes), Arc::new(news), Arc::new(summarizer), 5);

        let text = NewsletterBuilder::new(assembler, Arc::new(PassThroughEditor))
            .build_at(fixed_time())
            .await;

        let after_header = &text[header(fixed_time()).len()..];
        assert!(after_header.starts_with(
            "**Apple (AAPL):**\nToday's Closing Price: $187.00\nChange Percent: 1.50%\n"
        ));
        assert!(!text.contains("Magnificent Seven (MAGS)\n\n"));
        assert!(!text.contains("Could not retrieve data"));
    }

    #[tokio::test]
    async fn test_parallel_matches_sequential() {
        let sequential = NewsletterBuilder::new(assembler(), Arc::new(PassThroughEditor))
            .build_at(fixed_time())
            .await;
        let parallel = NewsletterBuilder::new(assembler(), Arc::new(PassThroughEditor))
            .with_parallel(true)
            .build_at(fixed_time())
            .await;

        assert_eq!(sequential, parallel);
    }

    #[tokio::test]
    async fn test_editor_output_is_returned() {
        let provider = Arc::new(ScriptedProvider::text("edited newsletter"));
        let editor = Arc::new(LlmNewsletterEditor::new(provider.clone(), "model"));

        let text = NewsletterBuilder::new(assembler(), editor)
            .build_at(fixed_time())
            .await;

        assert_eq!(text, "edited newsletter");
        assert_eq!(provider.calls(), 1);
        assert!(provider.requests()[0].prompt.contains("Could not retrieve data for Amazon (AMZN)"));
    }

    #[tokio::test]
    async fn test_editor_failure_keeps_draft() {
        let editor = Arc::new(LlmNewsletterEditor::new(
            Arc::new(ScriptedProvider::new(Reply::Fail)),
            "model",
        ));

        let edited = NewsletterBuilder::new(assembler(), editor)
            .build_at(fixed_time())
            .await;
        let draft = NewsletterBuilder::new(assembler(), Arc::new(PassThroughEditor))
            .build_at(fixed_time())
            .await;

        assert_eq!(edited, draft);
    }

    #[tokio::test]
    async fn test_custom_company_list() {
        let text = NewsletterBuilder::new(assembler(), Arc::new(PassThroughEditor))
            .with_companies(vec![Subject::company("Tesla", "TSLA")])
            .build_at(fixed_time())
            .await;

        assert!(text.contains("**Tesla (TSLA):**"));
        assert!(!text.contains("Apple"));
    }

    #[test]
    fn test_from_config_without_keys() {
        let config = NewsletterConfig::builder()
            .backend(LlmBackend::Local)
            .edit_newsletter(false)
            .build()
            .unwrap();

        let builder = NewsletterBuilder::from_config(&config).unwrap();
        assert_eq!(builder.companies.len(), 7);
        assert!(!builder.parallel);
    }
}
