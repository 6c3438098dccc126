//! Subjects covered by the newsletter

use std::fmt;

/// The seven companies, in the order they appear in the newsletter
pub const MAGNIFICENT_SEVEN: [(&str, &str); 7] = [
    ("Apple", "AAPL"),
    ("Microsoft", "MSFT"),
    ("Amazon", "AMZN"),
    ("Alphabet", "GOOGL"),
    ("Meta", "META"),
    ("Nvidia", "NVDA"),
    ("Tesla", "TSLA"),
];

/// Display name of the aggregate subject
pub const AGGREGATE_NAME: &str = "Magnificent Seven";

/// Ticker of the ETF standing in for the aggregate
pub const AGGREGATE_TICKER: &str = "MAGS";

/// Heading of the aggregate section
pub const AGGREGATE_HEADING: &str = "Roundhill Magnificent Seven ETF (BATS: MAGS)";

/// Search query for aggregate news
pub const AGGREGATE_NEWS_QUERY: &str = "Magnificent Seven stock news";

/// What a subject stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
    /// A single listed company
    Company,
    /// The group as a whole, priced through its ETF
    Aggregate,
}

/// One reportable entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    /// Display name, e.g. "Apple"
    pub name: String,
    /// Ticker symbol used for the quote lookup
    pub ticker: String,
    /// Company or aggregate
    pub kind: SubjectKind,
}

impl Subject {
    /// A company subject
    pub fn company(name: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
            kind: SubjectKind::Company,
        }
    }

    /// The synthetic "Magnificent Seven" subject backed by the MAGS ETF
    pub fn aggregate() -> Self {
        Self {
            name: AGGREGATE_NAME.to_string(),
            ticker: AGGREGATE_TICKER.to_string(),
            kind: SubjectKind::Aggregate,
        }
    }

    /// The fixed company list, in declared order
    pub fn magnificent_seven() -> Vec<Self> {
        MAGNIFICENT_SEVEN
            .iter()
            .map(|(name, ticker)| Self::company(*name, *ticker))
            .collect()
    }

    /// Free-text query for the news search
    pub fn news_query(&self) -> String {
        match self.kind {
            SubjectKind::Company => format!("{} stock news", self.name),
            SubjectKind::Aggregate => AGGREGATE_NEWS_QUERY.to_string(),
        }
    }

    /// Bold heading line content of a full section
    pub fn heading(&self) -> String {
        match self.kind {
            SubjectKind::Company => format!("{} ({}):", self.name, self.ticker),
            SubjectKind::Aggregate => AGGREGATE_HEADING.to_string(),
        }
    }

    /// How many headlines go into the summary, `None` for all of them
    pub fn headline_cap(&self, limit: usize) -> Option<usize> {
        match self.kind {
            SubjectKind::Company => Some(limit),
            SubjectKind::Aggregate => None,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.ticker)
    }
}
