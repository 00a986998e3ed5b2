//! Cache Store Module
//!
//! The cache engine: a bounded LRU index with lazy TTL expiry, safe to share
//! between threads.

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::entry::now;
use crate::cache::{CacheConfig, CacheEntry, CacheStats, LruIndex};
use crate::error::{ProxyError, Result};

// == Cache Store ==
/// Bounded, time-expiring LRU cache.
///
/// All operations take `&self`. Each one runs entirely inside a single
/// critical section covering both the index and the statistics, so no caller
/// can observe a half-applied insert, eviction or expiry.
#[derive(Debug)]
pub struct CacheStore {
    config: CacheConfig,
    inner: Mutex<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    index: LruIndex,
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                index: LruIndex::with_capacity(config.max_entries),
                stats: CacheStats::new(),
            }),
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A fresh entry is refreshed (its last access set to now and moved to the
    /// most recently used end) and its value returned. An expired entry is
    /// removed and reported as absent.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let now = now();

        let fresh = match inner.index.get_refresh(key) {
            None => {
                inner.stats.record_miss();
                return None;
            }
            Some(entry) if entry.is_expired_at(now, self.config.expiry) => None,
            Some(entry) => {
                entry.touch(now);
                Some(entry.value.clone())
            }
        };

        match fresh {
            Some(value) => {
                inner.stats.record_hit();
                Some(value)
            }
            None => {
                inner.index.remove(key);
                inner.stats.record_expiration();
                inner.stats.record_miss();
                None
            }
        }
    }

    // == Add ==
    /// Stores a key-value pair.
    ///
    /// If the key already exists, the value is replaced and the entry becomes
    /// the most recently used one; the entry count does not change. Otherwise,
    /// if the cache is at capacity, the least recently used entry is evicted
    /// before the new one is inserted.
    pub fn add(&self, key: String, value: String) {
        let evicted = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            let now = now();

            if let Some(entry) = inner.index.get_refresh(&key) {
                entry.replace(value, now);
                return;
            }

            let mut evicted = None;
            if inner.index.len() >= self.config.max_entries {
                if let Some((evicted_key, _)) = inner.index.evict_oldest() {
                    inner.stats.record_eviction();
                    evicted = Some(evicted_key);
                }
            }

            let mut entry = CacheEntry::new(value);
            entry.touch(now);
            inner.index.insert(key, entry);
            evicted
        };

        if let Some(evicted_key) = evicted {
            debug!(key = %evicted_key, "Evicted least recently used entry");
        }
    }

    // == Remove ==
    /// Removes an entry by key.
    ///
    /// # Errors
    /// `NotFound` if nothing was stored under the key.
    pub fn remove(&self, key: &str) -> Result<()> {
        match self.inner.lock().index.remove(key) {
            Some(_) => Ok(()),
            None => Err(ProxyError::NotFound(key.to_string())),
        }
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.index.len());
        stats
    }

    // == Peek LRU ==
    /// Returns the key that would be evicted next, without touching it.
    pub fn peek_lru(&self) -> Option<String> {
        self.inner.lock().index.peek_oldest().cloned()
    }

    /// Checks for a stored entry without counting a lookup or touching recency.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.lock().index.contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().index.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use mock_instant::thread_local::MockClock;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn store(max_entries: usize) -> CacheStore {
        CacheStore::new(CacheConfig::new(Duration::from_secs(300), max_entries))
    }

    fn add(store: &CacheStore, key: &str, value: &str) {
        store.add(key.to_string(), value.to_string());
    }

    #[test]
    fn test_store_new() {
        let store = store(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.config().max_entries, 100);
    }

    #[test]
    fn test_store_add_and_get() {
        let store = store(100);

        add(&store, "key1", "value1");

        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store = store(100);
        assert_eq!(store.get("nonexistent"), None);
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_remove() {
        let store = store(100);

        add(&store, "key1", "value1");
        store.remove("key1").unwrap();

        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_remove_nonexistent() {
        let store = store(100);

        let result = store.remove("nonexistent");
        assert!(matches!(result, Err(ProxyError::NotFound(_))));
    }

    #[test]
    fn test_store_update_keeps_count() {
        let store = store(100);

        add(&store, "key1", "value1");
        add(&store, "key1", "value2");

        assert_eq!(store.get("key1"), Some("value2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_update_at_capacity_does_not_evict() {
        let store = store(2);

        add(&store, "a", "1");
        add(&store, "b", "2");
        add(&store, "a", "3");

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);
        // the update made "a" most recently used
        assert_eq!(store.peek_lru(), Some("b".to_string()));
    }

    #[test]
    fn test_store_lru_eviction() {
        let store = store(3);

        add(&store, "key1", "value1");
        add(&store, "key2", "value2");
        add(&store, "key3", "value3");

        // Cache is full, adding key4 should evict key1 (oldest)
        add(&store, "key4", "value4");

        assert_eq!(store.len(), 3);
        assert_eq!(store.stats().evictions, 1);
        assert!(!store.contains_key("key1"));
        assert!(store.get("key2").is_some());
        assert!(store.get("key3").is_some());
        assert!(store.get("key4").is_some());
    }

    #[test]
    fn test_store_get_refreshes_recency() {
        let store = store(2);

        add(&store, "A", "a");
        add(&store, "B", "b");
        assert_eq!(store.get("A"), Some("a".to_string()));
        add(&store, "C", "c");

        assert!(!store.contains_key("B"));
        assert!(store.contains_key("A"));
        assert!(store.contains_key("C"));
    }

    #[test]
    fn test_store_miss_does_not_touch_recency() {
        let store = store(2);

        add(&store, "A", "a");
        add(&store, "B", "b");
        assert_eq!(store.get("missing"), None);

        assert_eq!(store.peek_lru(), Some("A".to_string()));
    }

    #[test]
    fn test_store_expiry_boundary() {
        let store = CacheStore::new(CacheConfig::new(Duration::from_millis(100), 10));

        add(&store, "key1", "value1");

        MockClock::advance(Duration::from_millis(99));
        assert_eq!(store.get("key1"), Some("value1".to_string()));

        // the hit above refreshed the entry, so the clock restarts from here
        MockClock::advance(Duration::from_millis(100));
        assert_eq!(store.get("key1"), None);
        assert!(!store.contains_key("key1"));

        let stats = store.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_store_update_resets_expiry() {
        let store = CacheStore::new(CacheConfig::new(Duration::from_millis(100), 10));

        add(&store, "key1", "value1");
        MockClock::advance(Duration::from_millis(80));
        add(&store, "key1", "value2");
        MockClock::advance(Duration::from_millis(80));

        assert_eq!(store.get("key1"), Some("value2".to_string()));
    }

    #[test]
    fn test_store_expired_entry_frees_capacity() {
        let store = CacheStore::new(CacheConfig::new(Duration::from_millis(100), 2));

        add(&store, "old", "1");
        add(&store, "young", "2");
        MockClock::advance(Duration::from_millis(150));

        assert_eq!(store.get("old"), None);
        add(&store, "new", "3");

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_stats() {
        let store = store(100);

        add(&store, "key1", "value1");
        store.get("key1"); // hit
        store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_accepts_any_key_and_large_values() {
        let store = store(100);
        let long_key = "k".repeat(4096);
        let large_value = "x".repeat(2 * 1024 * 1024);

        store.add(String::new(), "empty".to_string());
        store.add(long_key.clone(), large_value.clone());

        assert_eq!(store.get(""), Some("empty".to_string()));
        assert_eq!(store.get(&long_key), Some(large_value));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_store_repeated_hits_keep_entry_alive() {
        let store = CacheStore::new(CacheConfig::new(Duration::from_millis(100), 10));

        add(&store, "key1", "value1");
        for _ in 0..5 {
            MockClock::advance(Duration::from_millis(60));
            assert_eq!(store.get("key1"), Some("value1".to_string()));
        }

        assert_eq!(store.stats().expirations, 0);
    }

    #[test]
    fn test_store_concurrent_adds_respect_capacity() {
        let store = Arc::new(store(8));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..200 {
                        let key = format!("t{}-k{}", t, i % 16);
                        store.add(key.clone(), format!("{}:{}", key, i));
                        assert!(store.len() <= 8);
                        if let Some(value) = store.get(&key) {
                            assert!(value.starts_with(&format!("{}:", key)));
                        }
                        if i % 7 == 0 {
                            let _ = store.remove(&key);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("worker thread panicked");
        }

        assert!(store.len() <= 8);
        assert_eq!(store.stats().total_entries, store.len());
    }
}
