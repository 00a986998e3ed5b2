//! Response DTOs for the proxy API
//!
//! Defines the JSON bodies of the operational endpoints. Lookups answer with
//! the raw value instead.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of LRU evictions
    pub evictions: u64,
    /// Number of entries dropped on expiry
    pub expirations: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_response_from_cache_stats() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            expirations: 3,
            total_entries: 100,
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.expirations, 3);
        assert_eq!(resp.total_entries, 100);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::from(CacheStats::default());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
