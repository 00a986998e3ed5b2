//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::debug;

use crate::backend::BackingStore;
use crate::config::Config;
use crate::error::Result;
use crate::models::{GetParams, HealthResponse, StatsResponse};
use crate::proxy::ReadThroughCache;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-through coordinator over the shared cache
    pub proxy: ReadThroughCache,
}

impl AppState {
    /// Creates a new AppState around an existing coordinator.
    pub fn new(proxy: ReadThroughCache) -> Self {
        Self { proxy }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds an empty cache sized by the Config in front of `store`.
    pub fn from_config(config: &Config, store: Arc<dyn BackingStore>) -> Self {
        Self::new(ReadThroughCache::with_config(config.cache_config(), store))
    }
}

/// Handler for GET /get?key=...
///
/// Answers with the raw value, from the cache or the backing store.
pub async fn get_handler(
    State(state): State<AppState>,
    Query(params): Query<GetParams>,
) -> Result<String> {
    let key = params.into_key()?;
    let lookup = state.proxy.lookup(&key).await?;

    debug!(key = %key, source = ?lookup.source, "Lookup served");
    Ok(lookup.value)
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.proxy.cache().stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
