//! Emlak API server entry point.
//!
//! Bootstraps configuration, builds the resolver with its provider chain,
//! and starts the Axum HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use emlak_api::{create_api_router, ApiConfig, ApiError, ApiResult, AppState};
use emlak_geo::GeoResolver;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ApiConfig::from_env();
    let resolver = Arc::new(GeoResolver::from_env(&config.resolver_config()));
    let state = AppState::new(resolver);
    let app = create_api_router(state, &config);

    let addr = resolve_bind_addr(&config)?;
    tracing::info!(%addr, "Starting emlak geo API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
}

fn resolve_bind_addr(config: &ApiConfig) -> ApiResult<SocketAddr> {
    let addr = format!("{}:{}", config.bind, config.port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::validation_failed(format!("Invalid bind address {}: {}", addr, e)))
}
