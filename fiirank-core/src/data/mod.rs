//! Page acquisition: live HTTP, saved snapshots, fixed fixtures

pub mod file;
pub mod http;
pub mod provider;

pub use file::FileFetcher;
pub use http::{HttpFetcher, HttpSettings, DEFAULT_URL};
pub use provider::{FetchError, MarkupFetcher, MarkupSource, StaticFetcher};
