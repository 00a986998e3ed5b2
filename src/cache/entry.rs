//! Cache Entry Module
//!
//! Defines a single cache entry and the engine's immutable configuration.

#[cfg(test)]
use mock_instant::thread_local::Instant;
#[cfg(not(test))]
use std::time::Instant;

use std::time::Duration;

// == Cache Config ==
/// Immutable engine settings, supplied at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Age (since last access) at which an entry is considered stale
    pub expiry: Duration,
    /// Maximum number of live entries, always at least 1
    pub max_entries: usize,
}

impl CacheConfig {
    /// Creates a new config. A capacity of 0 is raised to 1.
    pub fn new(expiry: Duration, max_entries: usize) -> Self {
        Self {
            expiry,
            max_entries: max_entries.max(1),
        }
    }
}

// == Cache Entry ==
/// Represents a single cached value and its recency metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached payload
    pub value: String,
    /// Refreshed on every hit and every write
    pub last_access: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry accessed just now.
    pub fn new(value: String) -> Self {
        Self {
            value,
            last_access: Instant::now(),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is stale at `now`.
    ///
    /// Boundary condition: an entry whose age equals `expiry` is already expired.
    pub fn is_expired_at(&self, now: Instant, expiry: Duration) -> bool {
        now >= self.last_access + expiry
    }

    // == Touch ==
    /// Marks the entry as accessed at `now`.
    pub fn touch(&mut self, now: Instant) {
        self.last_access = now;
    }

    // == Replace ==
    /// Swaps in a new value and marks the entry as accessed at `now`.
    pub fn replace(&mut self, value: String, now: Instant) {
        self.value = value;
        self.last_access = now;
    }
}

/// Current time as seen by the cache engine.
pub(crate) fn now() -> Instant {
    Instant::now()
}
