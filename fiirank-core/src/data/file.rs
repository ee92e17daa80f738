//! Snapshot fetcher — reads a saved copy of the ranking page from disk.
//!
//! This is the offline path: save the rendered page once (browser "save as",
//! or any headless renderer) and rank from it without touching the network.

use std::path::{Path, PathBuf};

use super::provider::{FetchError, MarkupFetcher, MarkupSource};

pub struct FileFetcher {
    path: PathBuf,
    name: String,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MarkupFetcher for FileFetcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn source(&self) -> MarkupSource {
        MarkupSource::File
    }

    fn fetch_markup(&self) -> Result<String, FetchError> {
        std::fs::read_to_string(&self.path).map_err(|source| FetchError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.html");
        std::fs::write(&path, "<html>ok</html>").unwrap();

        let fetcher = FileFetcher::new(&path);
        assert_eq!(fetcher.fetch_markup().unwrap(), "<html>ok</html>");
        assert_eq!(fetcher.source(), MarkupSource::File);
        assert!(fetcher.name().ends_with("ranking.html"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let fetcher = FileFetcher::new("/nonexistent/ranking.html");
        let err = fetcher.fetch_markup().unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/ranking.html"));
    }
}
