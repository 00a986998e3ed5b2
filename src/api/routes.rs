//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{routing::get, Router};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{get_handler, health_handler, stats_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /get?key=<key>` - Read-through lookup, answers with the raw value
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Concurrency limit: at most `max_connections` requests in flight; the
///   rest wait for a slot
/// - Tracing: Logs all requests
pub fn create_router(state: AppState, max_connections: usize) -> Router {
    Router::new()
        .route("/get", get(get_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(GlobalConcurrencyLimitLayer::new(max_connections.max(1)))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
