//! Cache Module
//!
//! Provides the in-memory cache engine with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheConfig, CacheEntry};
pub use lru::LruIndex;
pub use stats::CacheStats;
pub use store::CacheStore;
