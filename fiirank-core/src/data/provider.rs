//! Markup fetcher trait and structured fetch errors.
//!
//! The `MarkupFetcher` trait abstracts over where the ranking page comes from
//! (live site, saved snapshot) so the pipeline can be driven from tests
//! without a network.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::markup::MarkupError;

/// Structured error types for fetch operations.
///
/// These are designed to be displayable in CLI contexts.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out after {secs}s: {url}")]
    Timeout { url: String, secs: u64 },

    #[error("network unreachable: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("ranking table not present after {attempts} attempts: {url}")]
    TableNotReady { url: String, attempts: u32 },

    #[error("read snapshot {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("markup error: {0}")]
    Markup(#[from] MarkupError),
}

/// Where a page of markup came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkupSource {
    Http,
    File,
    Fixture,
}

/// Supplies the rendered ranking page.
///
/// Implementations make sure the table is present before returning; a page
/// that never becomes ready is a `FetchError`, not an empty success.
pub trait MarkupFetcher: Send + Sync {
    /// Human-readable name of this fetcher.
    fn name(&self) -> &str;

    /// Provenance tag recorded on snapshots built from this fetcher.
    fn source(&self) -> MarkupSource;

    /// Fetch the full page markup.
    fn fetch_markup(&self) -> Result<String, FetchError>;
}

/// Fetcher returning fixed markup. Useful for tests and demos.
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    markup: String,
}

impl StaticFetcher {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }
}

impl MarkupFetcher for StaticFetcher {
    fn name(&self) -> &str {
        "static"
    }

    fn source(&self) -> MarkupSource {
        MarkupSource::Fixture
    }

    fn fetch_markup(&self) -> Result<String, FetchError> {
        Ok(self.markup.clone())
    }
}
