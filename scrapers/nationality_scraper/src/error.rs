use std::path::PathBuf;

use scraper::error::SelectorErrorKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Everything that can abort a scrape. None of these are retried.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// GET failed before a body could be read (DNS, TLS, connection, timeout).
    #[error("request failed for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    /// The saved page does not have the layout the extractor expects.
    #[error("expected element not found: {context}")]
    Structure { context: &'static str },

    #[error("filesystem operation failed on {}: {}", .path.display(), .source)]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid reference pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid CSS selector: {0}")]
    Selector(String),

    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("a fetch worker panicked")]
    WorkerPanicked,
}

impl ScrapeError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScrapeError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

impl<'a> From<SelectorErrorKind<'a>> for ScrapeError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        ScrapeError::Selector(err.to_string())
    }
}
