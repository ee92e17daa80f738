//! fiirank runner — configuration, snapshot caching and output around the
//! core ranking pipeline.
//!
//! This crate builds on `fiirank-core` to provide:
//! - TOML application config (source, cache TTL, filter defaults, sector table)
//! - A TTL snapshot cache that never stores a failed fetch
//! - `RankingService`: fetch → build → cache → rank → filter
//! - Polars `DataFrame` view and per-sector summary
//! - CSV / JSON export
//! - `tracing` subscriber setup

pub mod cache;
pub mod config;
pub mod export;
pub mod frame;
pub mod logging;
pub mod service;

pub use cache::{Snapshot, SnapshotCache};
pub use config::{AppConfig, CacheSettings, ConfigError, SectorSettings};
pub use export::{to_csv, to_json, write_csv, ExportError};
pub use frame::{sector_summary, to_frame};
pub use service::{Ranking, RankingService, ServiceError};
