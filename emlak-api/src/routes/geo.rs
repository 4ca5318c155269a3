//! Geographic resolution endpoints.
//!
//! Each handler validates its required query parameters explicitly (so the
//! 400 body matches the `{"error"}` contract), then delegates to the
//! resolver. A successful-but-empty resolution is a 200 with `[]`, never an
//! error.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use emlak_core::AddressComponent;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GeoQuery {
    country: Option<String>,
    city: Option<String>,
    district: Option<String>,
    neighborhood: Option<String>,
}

fn require<'a>(name: &'static str, value: Option<&'a String>) -> ApiResult<&'a str> {
    match value.map(|s| s.trim()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::missing_param(name)),
    }
}

/// GET /geo/cities?country=<code>
pub async fn list_cities(
    State(state): State<AppState>,
    Query(query): Query<GeoQuery>,
) -> ApiResult<Json<Vec<AddressComponent>>> {
    let country = require("country", query.country.as_ref())?;
    let components = state.resolver.resolve_cities(country).await?;
    Ok(Json(components))
}

/// GET /geo/districts?country=<code>&city=<name>
pub async fn list_districts(
    State(state): State<AppState>,
    Query(query): Query<GeoQuery>,
) -> ApiResult<Json<Vec<AddressComponent>>> {
    let country = require("country", query.country.as_ref())?;
    let city = require("city", query.city.as_ref())?;
    let components = state.resolver.resolve_districts(country, city).await?;
    Ok(Json(components))
}

/// GET /geo/neighborhoods?country=<code>&city=<name>&district=<name>
pub async fn list_neighborhoods(
    State(state): State<AppState>,
    Query(query): Query<GeoQuery>,
) -> ApiResult<Json<Vec<AddressComponent>>> {
    let country = require("country", query.country.as_ref())?;
    let city = require("city", query.city.as_ref())?;
    let district = require("district", query.district.as_ref())?;
    let components = state
        .resolver
        .resolve_neighborhoods(country, city, district)
        .await?;
    Ok(Json(components))
}

/// GET /geo/streets?country=<code>&city=<name>&district=<name>&neighborhood=<name>
pub async fn list_streets(
    State(state): State<AppState>,
    Query(query): Query<GeoQuery>,
) -> ApiResult<Json<Vec<AddressComponent>>> {
    let country = require("country", query.country.as_ref())?;
    let city = require("city", query.city.as_ref())?;
    let district = require("district", query.district.as_ref())?;
    let neighborhood = require("neighborhood", query.neighborhood.as_ref())?;
    let components = state
        .resolver
        .resolve_streets(country, city, district, neighborhood)
        .await?;
    Ok(Json(components))
}

/// Create the /geo router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/cities", get(list_cities))
        .route("/districts", get(list_districts))
        .route("/neighborhoods", get(list_neighborhoods))
        .route("/streets", get(list_streets))
        .with_state(state)
}
