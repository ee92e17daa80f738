//! Application configuration — one TOML file for source, cache, filter and
//! sector-table settings.
//!
//! Every section is optional; missing keys fall back to [`AppConfig::default`].

use std::path::{Path, PathBuf};

use fiirank_core::data::HttpSettings;
use fiirank_core::markup::{MarkupError, TableSelectors};
use fiirank_core::sector::SectorTableError;
use fiirank_core::{FilterCriteria, SectorTable};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("sector table: {0}")]
    Sectors(#[from] SectorTableError),
    #[error("table selectors: {0}")]
    Selectors(#[from] MarkupError),
}

/// Snapshot cache settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// How long a fetched snapshot stays fresh.
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_secs: 600 }
    }
}

/// Where extra sector data comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectorSettings {
    /// TOML sector table merged over the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<PathBuf>,
    /// Skip the built-in table entirely and use only `table`.
    pub replace_builtin: bool,
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: HttpSettings,
    pub table: TableSelectors,
    pub cache: CacheSettings,
    pub filter: FilterCriteria,
    pub sectors: SectorSettings,
}

impl AppConfig {
    /// Load and validate a config file.
    ///
    /// A relative `sectors.table` path is resolved against the config file's
    /// directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;

        if let (Some(table), Some(dir)) = (config.sectors.table.as_mut(), path.parent()) {
            if table.is_relative() {
                *table = dir.join(&*table);
            }
        }

        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Parse and validate a config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::Invalid("source.timeout_secs must be > 0".into()));
        }
        if self.source.url.trim().is_empty() {
            return Err(ConfigError::Invalid("source.url is empty".into()));
        }
        let f = &self.filter;
        if [f.min_yield_pct, f.min_liquidity, f.min_valuation, f.max_valuation]
            .iter()
            .any(|v| v.is_nan())
        {
            return Err(ConfigError::Invalid("filter thresholds must be numbers".into()));
        }
        if f.min_valuation > f.max_valuation {
            return Err(ConfigError::Invalid(format!(
                "filter.min_valuation ({}) is greater than filter.max_valuation ({})",
                f.min_valuation, f.max_valuation
            )));
        }
        self.table.validate()?;
        Ok(())
    }

    /// The effective sector table: built-in, optionally merged with or
    /// replaced by the configured file.
    pub fn sector_table(&self) -> Result<SectorTable, ConfigError> {
        let builtin = SectorTable::default_b3();
        let Some(path) = &self.sectors.table else {
            return Ok(builtin);
        };
        let extra = SectorTable::from_file(path)?;
        if self.sectors.replace_builtin {
            Ok(extra)
        } else {
            Ok(builtin.merge(extra))
        }
    }
}
