//! Health check endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use emlak_geo::CacheStats;
use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub cache: CacheHealth,
    pub providers: ProviderHealth,
}

/// Per-region occupancy of the in-process cache. The cache lives inside
/// this process, so its status only reflects that the resolver is wired up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheHealth {
    pub status: HealthStatus,
    pub entries: CacheStats,
}

/// Adapter chain availability. A chain with zero available adapters can
/// never resolve anything, which makes the whole service unhealthy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderHealth {
    pub status: HealthStatus,
    pub available: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// GET /health/ping - Simple pong response
pub async fn ping() -> impl IntoResponse {
    (StatusCode::OK, "pong")
}

/// GET /health/live - Process liveness check with per-component detail.
pub async fn liveness(State(state): State<AppState>) -> impl IntoResponse {
    let available = state.resolver.available_providers();
    let provider_status = if available > 0 {
        HealthStatus::Healthy
    } else {
        HealthStatus::Unhealthy
    };

    let response = HealthResponse {
        status: provider_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        cache: CacheHealth {
            status: HealthStatus::Healthy,
            entries: state.resolver.cache_stats(),
        },
        providers: ProviderHealth {
            status: provider_status,
            available,
        },
    };

    let code = match response.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => ErrorCode::ServiceUnavailable.status_code(),
    };
    (code, Json(response))
}

/// Create the /health router (no auth required).
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/live", get(liveness))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emlak_geo::{GeoProvider, GeoResolver, MockProvider, ResolverConfig, StaticStore};
    use std::sync::Arc;

    fn state_with(providers: Vec<Arc<dyn GeoProvider>>) -> AppState {
        let resolver = GeoResolver::with_providers(providers, &ResolverConfig::default());
        AppState::new(Arc::new(resolver))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            version: "0.2.0".to_string(),
            uptime_seconds: 3600,
            cache: CacheHealth {
                status: HealthStatus::Healthy,
                entries: CacheStats {
                    cities: 1,
                    districts: 2,
                    neighborhoods: 0,
                    streets: 0,
                },
            },
            providers: ProviderHealth {
                status: HealthStatus::Healthy,
                available: 3,
            },
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"uptime_seconds\":3600"));
        assert!(json.contains("\"cities\":1"));
        assert!(json.contains("\"districts\":2"));
        assert!(json.contains("\"available\":3"));
    }

    #[tokio::test]
    async fn test_liveness_reports_cache_occupancy() {
        let state = state_with(vec![Arc::new(StaticStore::new())]);
        state.resolver.resolve_cities("tr").await.unwrap();

        let response = liveness(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["cache"]["status"], "healthy");
        assert_eq!(body["cache"]["entries"]["cities"], 1);
        assert_eq!(body["providers"]["available"], 1);
    }

    #[tokio::test]
    async fn test_liveness_without_available_providers_is_503() {
        let state = state_with(vec![Arc::new(MockProvider::unavailable("a"))]);

        let response = liveness(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["providers"]["status"], "unhealthy");
        assert_eq!(body["providers"]["available"], 0);
    }
}
