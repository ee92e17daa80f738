//! In-memory TTL cache for the fetched-and-built dataset.
//!
//! Holds at most one [`Snapshot`]. A refresh runs under the lock, so
//! concurrent callers that find the snapshot stale trigger a single fetch.
//! Only successful refreshes are stored: a failed fetch leaves the previous
//! state untouched and the error goes back to the caller.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use fiirank_core::data::MarkupSource;
use fiirank_core::{BuildStats, FundRecord};
use serde::{Deserialize, Serialize};

/// The cleaned, unranked dataset from one fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub records: Vec<FundRecord>,
    pub stats: BuildStats,
    pub fetched_at: DateTime<Utc>,
    pub source: MarkupSource,
    /// Name of the fetcher that produced the page.
    pub origin: String,
}

struct Entry {
    snapshot: Arc<Snapshot>,
    stored_at: Instant,
}

pub struct SnapshotCache {
    ttl: Duration,
    slot: Mutex<Option<Entry>>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, Option<Entry>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The cached snapshot if it is still fresh.
    pub fn get(&self) -> Option<Arc<Snapshot>> {
        self.lock()
            .as_ref()
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| Arc::clone(&entry.snapshot))
    }

    /// Return the fresh snapshot, or run `refresh` and store its result.
    pub fn get_or_refresh<E, F>(&self, refresh: F) -> Result<Arc<Snapshot>, E>
    where
        F: FnOnce() -> Result<Snapshot, E>,
    {
        let mut slot = self.lock();
        if let Some(entry) = slot.as_ref() {
            if entry.stored_at.elapsed() < self.ttl {
                tracing::debug!(age_ms = entry.stored_at.elapsed().as_millis() as u64, "snapshot cache hit");
                return Ok(Arc::clone(&entry.snapshot));
            }
        }

        tracing::debug!("snapshot cache miss");
        let snapshot = Arc::new(refresh()?);
        *slot = Some(Entry {
            snapshot: Arc::clone(&snapshot),
            stored_at: Instant::now(),
        });
        Ok(snapshot)
    }

    /// Drop the stored snapshot; the next lookup refreshes.
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    /// Time since the stored snapshot was taken, fresh or not.
    pub fn age(&self) -> Option<Duration> {
        self.lock().as_ref().map(|entry| entry.stored_at.elapsed())
    }
}
