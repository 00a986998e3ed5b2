//! Cache Statistics
//!
//! Counters the engine updates under its lock and the `/stats` route reports.

use serde::Serialize;

// == Cache Stats ==
/// Lookup and eviction counters, plus the live entry count at snapshot time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of lookups answered from the cache
    pub hits: u64,
    /// Number of lookups that found nothing usable (absent or expired)
    pub misses: u64,
    /// Number of entries evicted to make room for a new key
    pub evictions: u64,
    /// Number of entries dropped because they were found expired
    pub expirations: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of lookups answered without going to the backing store.
    /// Zero before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    /// Only meaningful on a snapshot; the engine fills it in from its index.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
