//! REST API routes.

pub mod geo;
pub mod health;

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::state::AppState;

/// Assemble the full API router: /geo and /health plus CORS and request
/// tracing.
pub fn create_api_router(state: AppState, config: &ApiConfig) -> Router {
    let cors = cors_layer(config);

    Router::new()
        .nest("/geo", geo::create_router(state.clone()))
        .nest("/health", health::create_router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    if config.cors_origins.is_empty() {
        // Dev mode: no origin list configured.
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}
