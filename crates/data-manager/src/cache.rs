//! TTL cache for the computed series

use dashboard_chart_shared::SeriesPoint;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cached series with the moment it was computed
#[derive(Clone)]
struct CacheEntry {
    series: Arc<Vec<SeriesPoint>>,
    stored_at: Instant,
}

/// Single-slot cache holding the latest series for `ttl`.
///
/// An entry is stale once its age reaches `ttl`, so a zero TTL never serves.
pub struct SeriesCache {
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl SeriesCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self) -> Option<Arc<Vec<SeriesPoint>>> {
        let mut slot = self.entry.lock();
        match slot.as_ref() {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.series.clone()),
            Some(_) => {
                // Entry expired
                *slot = None;
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, series: Arc<Vec<SeriesPoint>>) {
        *self.entry.lock() = Some(CacheEntry {
            series,
            stored_at: Instant::now(),
        });
    }

    pub fn clear(&self) {
        *self.entry.lock() = None;
    }
}
