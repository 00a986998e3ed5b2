//! API Module
//!
//! HTTP handlers and routing for the proxy.
//!
//! # Endpoints
//! - `GET /get?key=<key>` - Read-through lookup
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
