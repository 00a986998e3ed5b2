//! Redis Proxy - A read-through caching proxy for Redis
//!
//! Answers key lookups from a bounded in-memory LRU cache with TTL expiry and
//! falls back to the backing Redis instance on a miss.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redis_proxy::api::create_router;
use redis_proxy::{AppState, Config, RedisStore};

/// Main entry point for the proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Parse and validate configuration from flags and environment
/// 3. Connect to the backing Redis instance (fatal if unreachable)
/// 4. Create the cache and read-through coordinator
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redis_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Redis Proxy");

    let config = Config::parse();
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: port={}, redis_addr={}, cache_expiry={}s, cache_max_entry={}, max_conn={}",
        config.port, config.redis_addr, config.cache_expiry, config.cache_max_entry, config.max_conn
    );

    let store = RedisStore::connect(&config.redis_addr)
        .await
        .with_context(|| format!("cannot reach backing redis at {}", config.redis_addr))?;

    let state = AppState::from_config(&config, Arc::new(store));
    info!("Cache initialized");

    let app = create_router(state, config.max_conn);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {}", addr))?;
    info!("Proxy listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Proxy shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
