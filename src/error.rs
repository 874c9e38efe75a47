use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Failure taxonomy for the collection pipeline.
///
/// `Fetch` and `ScrapeStructure` separate "could not reach the site" from
/// "reached it but the layout changed". `EmptyResult` covers the narrower
/// case where the listing columns are present but hold no city links.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("expected structure missing at {url} (selector: {pattern})")]
    ScrapeStructure { url: String, pattern: String },

    #[error("malformed reference table: {0}")]
    MalformedReference(String),

    #[error("failed to read reference table: {0}")]
    Reference(String),

    #[error("unknown state identifier(s): {}", .0.join(", "))]
    UnknownState(Vec<String>),

    #[error("no cities listed for {state} at {url}")]
    EmptyResult { state: String, url: String },
}

impl ScrapeError {
    pub fn fetch(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        ScrapeError::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn structure(url: impl Into<String>, pattern: impl Into<String>) -> Self {
        ScrapeError::ScrapeStructure {
            url: url.into(),
            pattern: pattern.into(),
        }
    }
}
