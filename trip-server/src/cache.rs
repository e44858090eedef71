//! In-memory cache for nearby-station results.
//!
//! Keys are the exact query tuple (latitude, longitude, radius, rows), so
//! a repeated query for the same point returns without touching the
//! station source. Entries are evicted least-recently-used once the
//! capacity is reached, and nothing survives a restart.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use moka::policy::EvictionPolicy;

use crate::domain::{Station, StationQuery};

/// Default number of cached queries.
pub const DEFAULT_CAPACITY: u64 = 128;

/// Cached result of one query.
pub type StationEntry = Arc<Vec<Station>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached queries.
    pub max_capacity: u64,

    /// Optional TTL for cached entries. `None` keeps entries until evicted.
    pub ttl: Option<Duration>,
}

impl CacheConfig {
    /// Create a config with the given capacity and no TTL.
    pub fn new(max_capacity: u64) -> Self {
        Self {
            max_capacity,
            ttl: None,
        }
    }

    /// Set a TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Bounded LRU cache of station query results.
///
/// Safe to share between tasks: lookup, insert and eviction are
/// synchronized inside the cache. Two concurrent identical misses may both
/// fetch and both insert; the second insert simply replaces the first.
#[derive(Clone)]
pub struct ProximityCache {
    entries: MokaCache<StationQuery, StationEntry>,
}

impl ProximityCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let mut builder = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .eviction_policy(EvictionPolicy::lru());

        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            entries: builder.build(),
        }
    }

    /// Get a cached result.
    pub async fn get(&self, query: &StationQuery) -> Option<StationEntry> {
        self.entries.get(query).await
    }

    /// Insert a result, evicting the least recently used entry if full.
    pub async fn insert(&self, query: StationQuery, entry: StationEntry) {
        self.entries.insert(query, entry).await;
    }

    /// Number of cached entries (approximate until pending tasks run).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Apply pending evictions and bookkeeping now.
    pub async fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks().await;
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}
