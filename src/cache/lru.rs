//! LRU Index Module
//!
//! Key index and recency ordering for the cache engine, kept in one structure.

use linked_hash_map::LinkedHashMap;

use crate::cache::CacheEntry;

// == LRU Index ==
/// Maps keys to entries while keeping them in access order.
///
/// Entries are stored in a LinkedHashMap where:
/// - Front = Least recently used
/// - Back = Most recently used
///
/// Since the map and the ordering are the same structure, a key can never be
/// present in one and missing from the other.
#[derive(Debug, Default)]
pub struct LruIndex {
    map: LinkedHashMap<String, CacheEntry>,
}

impl LruIndex {
    // == Constructor ==
    /// Creates an empty index with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: LinkedHashMap::with_capacity(capacity),
        }
    }

    // == Get Refresh ==
    /// Returns the entry for `key` and moves it to the most recently used end.
    pub fn get_refresh(&mut self, key: &str) -> Option<&mut CacheEntry> {
        self.map.get_refresh(key)
    }

    // == Peek ==
    /// Returns the entry for `key` without touching the ordering.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        self.map.get(key)
    }

    // == Insert ==
    /// Inserts an entry at the most recently used end.
    ///
    /// An existing entry under the same key is replaced, moved to the back and
    /// returned.
    pub fn insert(&mut self, key: String, entry: CacheEntry) -> Option<CacheEntry> {
        self.map.insert(key, entry)
    }

    // == Remove ==
    /// Removes a key from the index.
    pub fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        self.map.remove(key)
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the index is empty.
    pub fn evict_oldest(&mut self) -> Option<(String, CacheEntry)> {
        self.map.pop_front()
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&String> {
        self.map.front().map(|(key, _)| key)
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.map.keys()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }
}
