use std::time::Duration;

pub mod catalog;
pub mod categories;
pub mod citation;
pub mod filter;
pub mod paper;
pub mod route;
pub mod stats;

pub use catalog::{Catalog, RefreshOutcome, SnapshotOrigin};
pub use categories::{Category, CategorySelector, ALL_CATEGORY_ID};
pub use citation::{to_bibtex, to_inline_citation, CitationFormat};
pub use filter::{distinct_dates, filter, Selection};
pub use paper::{find_paper, CatalogPayload, Paper};
pub use route::Route;
pub use stats::CatalogStats;

/// Client-side bound on a single catalog refresh.
pub const DEFAULT_REFRESH_TIMEOUT_MS: u64 = 3_000;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("catalog endpoint responded with HTTP {0}")]
    Status(u16),
    #[error("refresh timed out after {0} ms")]
    Timeout(u64),
    #[error("malformed catalog payload: {0}")]
    Payload(String),
    #[error("catalog payload contains no papers")]
    EmptyCatalog,
    #[error("dataset error: {0}")]
    Dataset(String),
    #[error("category not found: {0}")]
    CategoryNotFound(String),
    #[error("paper not found: {0}")]
    PaperNotFound(String),
    #[error("paper {0} has no authors")]
    MissingAuthor(String),
    #[error("invalid route: {0}")]
    InvalidRoute(String),
}

impl Error {
    /// Failures that a refresh swallows: the current snapshot stays authoritative.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::InvalidUrl(_)
                | Error::Fetch(_)
                | Error::Status(_)
                | Error::Timeout(_)
                | Error::Payload(_)
                | Error::EmptyCatalog
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::CategoryNotFound(_) | Error::PaperNotFound(_))
    }

    /// Stable snake_case code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidUrl(_) => "invalid_url",
            Error::Fetch(_) => "fetch_failed",
            Error::Status(_) => "http_status",
            Error::Timeout(_) => "timeout",
            Error::Payload(_) => "malformed_payload",
            Error::EmptyCatalog => "empty_catalog",
            Error::Dataset(_) => "dataset_error",
            Error::CategoryNotFound(_) => "category_not_found",
            Error::PaperNotFound(_) => "paper_not_found",
            Error::MissingAuthor(_) => "missing_author",
            Error::InvalidRoute(_) => "invalid_route",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn default_refresh_timeout() -> Duration {
    Duration::from_millis(DEFAULT_REFRESH_TIMEOUT_MS)
}

/// Anything that can hand back a full catalog snapshot.
///
/// Implementations return the whole list or an error; callers decide whether the
/// result replaces what they already hold.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch(&self) -> Result<Vec<Paper>>;
}
