//! Backend Module
//!
//! The authoritative key-value store the proxy fronts.

mod redis_store;

use async_trait::async_trait;

use crate::error::Result;

pub use redis_store::{redis_url, RedisStore, DEFAULT_FETCH_TIMEOUT};

// == Backing Store ==
/// Read access to the backing key-value store.
///
/// Implementations must report a missing key as
/// [`ProxyError::NotFound`](crate::error::ProxyError::NotFound) and every other
/// failure as [`ProxyError::Backend`](crate::error::ProxyError::Backend), so
/// callers can tell the two apart.
#[async_trait]
pub trait BackingStore: Send + Sync + 'static {
    /// Fetches the value stored under `key`.
    async fn fetch(&self, key: &str) -> Result<String>;
}
