//! Emlak API - HTTP layer for geographic resolution.
//!
//! Exposes the resolver through `/geo/*` endpoints with the error contract
//! the platform's clients expect (`{"error": "..."}` bodies, empty arrays
//! for successful-but-empty resolutions).

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::create_api_router;
pub use state::AppState;
