//! HTTP fetcher for the live ranking page.
//!
//! Fetches the page, then checks that the ranking table is actually populated
//! before handing it back. A response without rows (skeleton page, bot wall,
//! layout change) is retried with exponential backoff and finally reported as
//! `FetchError::TableNotReady`, never as an empty success.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::provider::{FetchError, MarkupFetcher, MarkupSource};
use crate::markup::{has_populated_table, TableSelectors};

/// Default ranking page.
pub const DEFAULT_URL: &str = "https://www.fundsexplorer.com.br/ranking";

/// Connection settings for [`HttpFetcher`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout_secs: 30,
            max_retries: 3,
            retry_delay_ms: 500,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into(),
        }
    }
}

/// Outcome of a single attempt, before retry policy is applied.
enum Attempt {
    Ready(String),
    Retry(FetchError),
}

/// Blocking HTTP fetcher with readiness check and retry.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    settings: HttpSettings,
    selectors: TableSelectors,
}

impl HttpFetcher {
    pub fn new(settings: HttpSettings, selectors: TableSelectors) -> Result<Self, FetchError> {
        selectors.validate()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            settings,
            selectors,
        })
    }

    pub fn settings(&self) -> &HttpSettings {
        &self.settings
    }

    fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.settings.retry_delay_ms) * 2u32.pow(attempt.saturating_sub(1))
    }

    fn attempt(&self) -> Result<Attempt, FetchError> {
        let url = &self.settings.url;
        let resp = match self.client.get(url).send() {
            Ok(resp) => resp,
            Err(e) if e.is_timeout() => {
                return Ok(Attempt::Retry(FetchError::Timeout {
                    url: url.clone(),
                    secs: self.settings.timeout_secs,
                }))
            }
            Err(e) if e.is_connect() => {
                return Ok(Attempt::Retry(FetchError::Network(e.to_string())))
            }
            Err(e) => return Err(FetchError::Network(e.to_string())),
        };

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Ok(Attempt::Retry(FetchError::HttpStatus {
                url: url.clone(),
                status: status.as_u16(),
            }));
        }
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .map_err(|e| FetchError::Network(format!("failed to read body from {url}: {e}")))?;

        if has_populated_table(&body, &self.selectors)? {
            Ok(Attempt::Ready(body))
        } else {
            Ok(Attempt::Retry(FetchError::TableNotReady {
                url: url.clone(),
                attempts: 0,
            }))
        }
    }
}

impl MarkupFetcher for HttpFetcher {
    fn name(&self) -> &str {
        &self.settings.url
    }

    fn source(&self) -> MarkupSource {
        MarkupSource::Http
    }

    fn fetch_markup(&self) -> Result<String, FetchError> {
        let attempts = self.settings.max_retries + 1;
        let mut last_error = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = self.backoff(attempt);
                tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying fetch");
                std::thread::sleep(delay);
            }

            tracing::info!(url = %self.settings.url, attempt, "fetching ranking page");
            match self.attempt()? {
                Attempt::Ready(body) => {
                    tracing::info!(bytes = body.len(), "ranking page ready");
                    return Ok(body);
                }
                Attempt::Retry(err) => {
                    tracing::warn!(error = %err, attempt, "fetch attempt failed");
                    last_error = Some(err);
                }
            }
        }

        Err(match last_error {
            Some(FetchError::TableNotReady { url, .. }) => FetchError::TableNotReady { url, attempts },
            Some(other) => other,
            None => FetchError::TableNotReady {
                url: self.settings.url.clone(),
                attempts,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_point_at_ranking_page() {
        let s = HttpSettings::default();
        assert_eq!(s.url, DEFAULT_URL);
        assert_eq!(s.timeout_secs, 30);
        assert_eq!(s.max_retries, 3);
    }

    #[test]
    fn backoff_doubles() {
        let fetcher = HttpFetcher::new(
            HttpSettings {
                retry_delay_ms: 100,
                ..HttpSettings::default()
            },
            TableSelectors::default(),
        )
        .unwrap();
        assert_eq!(fetcher.backoff(1), Duration::from_millis(100));
        assert_eq!(fetcher.backoff(2), Duration::from_millis(200));
        assert_eq!(fetcher.backoff(3), Duration::from_millis(400));
    }

    #[test]
    fn invalid_selector_rejected_at_construction() {
        let selectors = TableSelectors {
            row: "tr[".into(),
            ..TableSelectors::default()
        };
        assert!(matches!(
            HttpFetcher::new(HttpSettings::default(), selectors),
            Err(FetchError::Markup(_))
        ));
    }

    #[test]
    fn unreachable_host_is_network_error() {
        let fetcher = HttpFetcher::new(
            HttpSettings {
                url: "http://127.0.0.1:9/ranking".into(),
                timeout_secs: 2,
                max_retries: 0,
                retry_delay_ms: 1,
                ..HttpSettings::default()
            },
            TableSelectors::default(),
        )
        .unwrap();
        let err = fetcher.fetch_markup().unwrap_err();
        assert!(matches!(
            err,
            FetchError::Network(_) | FetchError::Timeout { .. }
        ));
    }
}
