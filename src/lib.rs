//! Redis Proxy - A read-through caching proxy for Redis
//!
//! Answers key lookups from a bounded in-memory LRU cache with TTL expiry and
//! falls back to the backing Redis instance on a miss.

pub mod api;
pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;

pub use api::AppState;
pub use backend::{BackingStore, RedisStore};
pub use config::Config;
pub use error::{ProxyError, Result};
pub use proxy::{Lookup, LookupSource, ReadThroughCache};
