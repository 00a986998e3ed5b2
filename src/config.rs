//! Configuration Module
//!
//! Handles loading proxy configuration from command line flags, falling back to
//! environment variables and then to defaults.

use std::time::Duration;

use clap::Parser;

use crate::cache::CacheConfig;
use crate::error::{ProxyError, Result};

// == Defaults ==
pub const DEFAULT_LISTEN_PORT: u16 = 8888;
pub const DEFAULT_REDIS_ADDR: &str = "127.0.0.1:6379";
/// Default cache expiry in seconds
pub const DEFAULT_CACHE_EXPIRY: u64 = 300;
pub const DEFAULT_CACHE_MAX_ENTRY: usize = 200;
pub const DEFAULT_MAX_CONN: usize = 1000;

/// Proxy configuration parameters.
///
/// Every value can be given as a flag or via its environment variable.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "redis_proxy",
    version,
    about = "A read-through caching proxy in front of a Redis instance"
)]
pub struct Config {
    /// Port the proxy listens on
    #[arg(short, long, env = "PROXY_PORT", default_value_t = DEFAULT_LISTEN_PORT)]
    pub port: u16,

    /// Address of the backing Redis instance (host:port or redis:// URL)
    #[arg(long, env = "REDIS_ADDR", default_value = DEFAULT_REDIS_ADDR)]
    pub redis_addr: String,

    /// Cache expiry in seconds, measured from an entry's last access
    #[arg(long, env = "CACHE_EXPIRY", default_value_t = DEFAULT_CACHE_EXPIRY)]
    pub cache_expiry: u64,

    /// Maximum number of keys the cache holds at a time
    #[arg(long, env = "CACHE_MAX_ENTRY", default_value_t = DEFAULT_CACHE_MAX_ENTRY)]
    pub cache_max_entry: usize,

    /// Maximum number of requests served concurrently
    #[arg(long, env = "MAX_CONN", default_value_t = DEFAULT_MAX_CONN)]
    pub max_conn: usize,
}

impl Config {
    // == Validate ==
    /// Rejects values the proxy cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.cache_max_entry == 0 {
            return Err(ProxyError::InvalidRequest(
                "cache-max-entry must be at least 1".to_string(),
            ));
        }
        if self.cache_expiry == 0 {
            return Err(ProxyError::InvalidRequest(
                "cache-expiry must be at least 1 second".to_string(),
            ));
        }
        if self.max_conn == 0 {
            return Err(ProxyError::InvalidRequest(
                "max-conn must be at least 1".to_string(),
            ));
        }
        if self.redis_addr.trim().is_empty() {
            return Err(ProxyError::InvalidRequest(
                "redis-addr cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    // == Cache Config ==
    /// Builds the cache engine configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new(Duration::from_secs(self.cache_expiry), self.cache_max_entry)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_LISTEN_PORT,
            redis_addr: DEFAULT_REDIS_ADDR.to_string(),
            cache_expiry: DEFAULT_CACHE_EXPIRY,
            cache_max_entry: DEFAULT_CACHE_MAX_ENTRY,
            max_conn: DEFAULT_MAX_CONN,
        }
    }
}
