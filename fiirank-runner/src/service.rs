//! Ranking service — fetch, build, cache, rank, filter.
//!
//! The core pipeline is pure; this is where it meets the outside world. A
//! service owns one fetcher and one snapshot cache, so repeated rankings with
//! different thresholds reuse the same page until the TTL runs out.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use fiirank_core::data::{FetchError, FileFetcher, HttpFetcher, MarkupFetcher, MarkupSource};
use fiirank_core::markup::{MarkupError, TableSelectors};
use fiirank_core::{dataset_from_markup, rank_two_in_one, FilterCriteria, RankedFund, SectorTable};
use serde::Serialize;
use thiserror::Error;

use crate::cache::{Snapshot, SnapshotCache};
use crate::config::{AppConfig, ConfigError};

/// Errors from the ranking service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),
    #[error("markup error: {0}")]
    Markup(#[from] MarkupError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// A filtered ranking together with the snapshot it came from.
#[derive(Debug, Clone, Serialize)]
pub struct Ranking {
    pub funds: Vec<RankedFund>,
    /// Funds in the dataset before filtering.
    pub total: usize,
    pub fetched_at: DateTime<Utc>,
    pub source: MarkupSource,
}

pub struct RankingService {
    fetcher: Box<dyn MarkupFetcher>,
    sectors: SectorTable,
    selectors: TableSelectors,
    cache: SnapshotCache,
}

impl RankingService {
    pub fn new(
        fetcher: Box<dyn MarkupFetcher>,
        sectors: SectorTable,
        selectors: TableSelectors,
        ttl: Duration,
    ) -> Self {
        Self {
            fetcher,
            sectors,
            selectors,
            cache: SnapshotCache::new(ttl),
        }
    }

    /// Build a service from configuration. `snapshot_file` replaces the live
    /// page with a saved copy.
    pub fn from_config(config: &AppConfig, snapshot_file: Option<PathBuf>) -> Result<Self, ServiceError> {
        let fetcher: Box<dyn MarkupFetcher> = match snapshot_file {
            Some(path) => Box::new(FileFetcher::new(path)),
            None => Box::new(HttpFetcher::new(config.source.clone(), config.table.clone())?),
        };
        Ok(Self::new(
            fetcher,
            config.sector_table()?,
            config.table.clone(),
            Duration::from_secs(config.cache.ttl_secs),
        ))
    }

    pub fn sectors(&self) -> &SectorTable {
        &self.sectors
    }

    pub fn fetcher_name(&self) -> &str {
        self.fetcher.name()
    }

    /// The cleaned dataset, from cache when fresh.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>, ServiceError> {
        self.cache.get_or_refresh(|| self.load())
    }

    /// Discard the cached dataset and fetch again.
    pub fn refresh(&self) -> Result<Arc<Snapshot>, ServiceError> {
        self.cache.invalidate();
        self.snapshot()
    }

    /// Rank the current snapshot and apply `criteria`.
    ///
    /// Sector names in `criteria` are canonicalized through the service's
    /// sector table first, so `"logistica"` selects `"Logística"`.
    pub fn ranked(&self, criteria: &FilterCriteria) -> Result<Ranking, ServiceError> {
        let snapshot = self.snapshot()?;
        let ranked = rank_two_in_one(snapshot.records.clone());
        let total = ranked.len();
        let funds = self.canonical_criteria(criteria).apply(&ranked);

        tracing::info!(total, kept = funds.len(), "ranking ready");
        Ok(Ranking {
            funds,
            total,
            fetched_at: snapshot.fetched_at,
            source: snapshot.source,
        })
    }

    /// `criteria` with its sector list mapped onto the canonical vocabulary.
    ///
    /// A label the table excludes is kept verbatim: it matches nothing,
    /// which is what a user asking for an excluded sector should see.
    pub fn canonical_criteria(&self, criteria: &FilterCriteria) -> FilterCriteria {
        let sectors = criteria
            .sectors
            .iter()
            .map(|s| self.sectors.canonicalize(s).unwrap_or_else(|| s.clone()))
            .collect();
        FilterCriteria {
            sectors,
            ..criteria.clone()
        }
    }

    fn load(&self) -> Result<Snapshot, ServiceError> {
        let markup = self.fetcher.fetch_markup()?;
        let outcome = dataset_from_markup(&markup, &self.selectors, &self.sectors)?;
        let stats = outcome.stats;

        tracing::info!(
            origin = self.fetcher.name(),
            rows = stats.rows_seen,
            accepted = stats.accepted,
            too_few_cells = stats.too_few_cells,
            zero_fields = stats.zero_fields,
            excluded_sector = stats.excluded_sector,
            "dataset built"
        );

        Ok(Snapshot {
            records: outcome.records,
            stats,
            fetched_at: Utc::now(),
            source: self.fetcher.source(),
            origin: self.fetcher.name().to_string(),
        })
    }
}
