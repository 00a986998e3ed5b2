//! Redis Backing Store
//!
//! Fetches keys from a Redis instance over a multiplexed tokio connection.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tokio::time::timeout;
use tracing::{debug, info};

use super::BackingStore;
use crate::error::{ProxyError, Result};

/// Upper bound for a single round trip to Redis
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Turns `host:port` into a `redis://` URL. Full URLs are passed through.
pub fn redis_url(addr: &str) -> String {
    let addr = addr.trim();
    if addr.starts_with("redis://") || addr.starts_with("rediss://") || addr.starts_with("unix://")
    {
        addr.to_string()
    } else {
        format!("redis://{}/", addr)
    }
}

// == Redis Store ==
/// [`BackingStore`] backed by a Redis instance.
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
    fetch_timeout: Duration,
}

impl RedisStore {
    // == Connect ==
    /// Connects to Redis and verifies the connection with a PING.
    ///
    /// # Errors
    /// `Backend` if the address is invalid, the server cannot be reached or
    /// does not answer the PING in time.
    pub async fn connect(addr: &str) -> Result<Self> {
        Self::connect_with_timeout(addr, DEFAULT_FETCH_TIMEOUT).await
    }

    /// Like [`RedisStore::connect`], with a custom per-request timeout.
    pub async fn connect_with_timeout(addr: &str, fetch_timeout: Duration) -> Result<Self> {
        let url = redis_url(addr);
        let client = redis::Client::open(url.as_str())
            .map_err(|e| ProxyError::backend("", format!("invalid redis address '{}': {}", addr, e)))?;

        let mut connection = timeout(fetch_timeout, client.get_multiplexed_async_connection())
            .await
            .map_err(|_| ProxyError::backend("", format!("timed out connecting to {}", addr)))?
            .map_err(|e| ProxyError::backend("", format!("cannot connect to {}: {}", addr, e)))?;

        let pong: String = timeout(fetch_timeout, redis::cmd("PING").query_async(&mut connection))
            .await
            .map_err(|_| ProxyError::backend("", format!("PING to {} timed out", addr)))?
            .map_err(|e| ProxyError::backend("", format!("PING to {} failed: {}", addr, e)))?;

        info!(addr = %addr, reply = %pong, "Connected to backing redis");

        Ok(Self {
            connection,
            fetch_timeout,
        })
    }
}

#[async_trait]
impl BackingStore for RedisStore {
    async fn fetch(&self, key: &str) -> Result<String> {
        let mut connection = self.connection.clone();

        let value: Option<String> = timeout(self.fetch_timeout, connection.get(key))
            .await
            .map_err(|_| ProxyError::backend(key, "GET timed out"))?
            .map_err(|e| ProxyError::backend(key, e))?;

        match value {
            Some(value) => {
                debug!(key = %key, bytes = value.len(), "Fetched key from redis");
                Ok(value)
            }
            None => Err(ProxyError::NotFound(key.to_string())),
        }
    }
}
