//! Shared application state for Axum routers.

use emlak_geo::GeoResolver;
use std::sync::Arc;
use std::time::Instant;

/// Application-wide state shared across all routes.
///
/// The resolver owns the cache regions for its process lifetime; handlers
/// only borrow it through this state.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<GeoResolver>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(resolver: Arc<GeoResolver>) -> Self {
        Self {
            resolver,
            start_time: Instant::now(),
        }
    }
}
