//! Time-to-live cache for loaded datasets
//!
//! Datasets are read-only once loaded, so the cache only has to decide when
//! to reload. Two callers missing at the same time both fetch; the last
//! insert wins and either copy is equally valid.

use super::{Dataset, LeagueSpec, MatchSource, SourceError};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(start.timestamp_millis()),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst)).unwrap_or_default()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

struct CacheEntry {
    dataset: Arc<Dataset>,
    loaded_at: DateTime<Utc>,
}

/// Per-league dataset cache with a fixed time-to-live
pub struct DatasetCache<C: Clock = SystemClock> {
    ttl: Duration,
    clock: C,
    entries: RwLock<HashMap<LeagueSpec, CacheEntry>>,
}

impl DatasetCache<SystemClock> {
    /// Create a cache on the wall clock
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<C: Clock> DatasetCache<C> {
    /// Create a cache with an injected clock
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            ttl,
            clock,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Cached dataset if still within the TTL
    pub async fn get(&self, league: &LeagueSpec) -> Option<Arc<Dataset>> {
        let now = self.clock.now();
        let entries = self.entries.read().await;
        entries
            .get(league)
            .filter(|e| now - e.loaded_at < self.ttl)
            .map(|e| e.dataset.clone())
    }

    /// Return the cached dataset or load it from `source`
    ///
    /// Failed loads are not cached.
    pub async fn get_or_load(
        &self,
        league: &LeagueSpec,
        source: &dyn MatchSource,
    ) -> Result<Arc<Dataset>, SourceError> {
        if let Some(dataset) = self.get(league).await {
            metrics::counter!("formsignals_cache_hits_total").increment(1);
            return Ok(dataset);
        }

        metrics::counter!("formsignals_cache_misses_total").increment(1);
        tracing::debug!(league = %league.name, "Dataset cache miss");

        let dataset = Arc::new(source.fetch(league).await?);
        let mut entries = self.entries.write().await;
        entries.insert(
            league.clone(),
            CacheEntry {
                dataset: dataset.clone(),
                loaded_at: self.clock.now(),
            },
        );
        Ok(dataset)
    }

    /// Drop a league so the next request reloads it
    pub async fn invalidate(&self, league: &LeagueSpec) {
        self.entries.write().await.remove(league);
    }
}
