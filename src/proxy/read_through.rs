//! Read-Through Cache
//!
//! Answers lookups from the cache engine and falls back to the backing store
//! on a miss, populating the cache with what it fetched.

use std::sync::Arc;

use tracing::{debug, error};

use crate::backend::BackingStore;
use crate::cache::{CacheConfig, CacheStore};
use crate::error::{ProxyError, Result};

// == Lookup Result ==
/// Where a lookup's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
    /// Served from the local cache
    Cache,
    /// Fetched from the backing store on a miss
    BackingStore,
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub value: String,
    pub source: LookupSource,
}

// == Read-Through Cache ==
/// Coordinates the cache engine and the backing store.
///
/// Cheap to clone; clones share the same cache and store.
#[derive(Clone)]
pub struct ReadThroughCache {
    cache: Arc<CacheStore>,
    store: Arc<dyn BackingStore>,
}

impl ReadThroughCache {
    /// Creates a coordinator over an existing cache and store.
    pub fn new(cache: Arc<CacheStore>, store: Arc<dyn BackingStore>) -> Self {
        Self { cache, store }
    }

    /// Creates a coordinator with a fresh, empty cache.
    pub fn with_config(config: CacheConfig, store: Arc<dyn BackingStore>) -> Self {
        Self::new(Arc::new(CacheStore::new(config)), store)
    }

    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    // == Lookup ==
    /// Resolves a key, from the cache if possible, otherwise from the backing
    /// store.
    ///
    /// A value fetched from the backing store is added to the cache before it
    /// is returned, whatever its size.
    ///
    /// # Errors
    /// - `NotFound` if the backing store has no such key; nothing is cached.
    /// - `Backend` if the backing store could not be queried; nothing is cached.
    pub async fn lookup(&self, key: &str) -> Result<Lookup> {
        if let Some(value) = self.cache.get(key) {
            debug!(key = %key, "Cache hit");
            return Ok(Lookup {
                value,
                source: LookupSource::Cache,
            });
        }

        debug!(key = %key, "Cache miss, fetching from backing store");
        let value = match self.store.fetch(key).await {
            Ok(value) => value,
            Err(ProxyError::NotFound(missing)) => {
                debug!(key = %key, "Key not found in backing store");
                return Err(ProxyError::NotFound(missing));
            }
            Err(err) => {
                error!(key = %key, error = %err, "Failed to fetch key from backing store");
                return Err(err);
            }
        };

        self.cache.add(key.to_string(), value.clone());

        Ok(Lookup {
            value,
            source: LookupSource::BackingStore,
        })
    }
}
