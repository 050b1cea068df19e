use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use ecotrack_common::{RankedCenter, RecyclingCenter};
use ecotrack_store::{find_nearby_centers, get_center, list_distinct_materials, RecyclingQuery};
use serde::Deserialize;
use tracing::warn;

use super::{parse_coordinate, parse_id, parse_limit};
use crate::error::ApiError;
use crate::AppState;

#[derive(Deserialize)]
pub struct NearQuery {
    lat: Option<String>,
    lng: Option<String>,
    material: Option<String>,
    limit: Option<String>,
}

pub async fn api_recycling_near(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearQuery>,
) -> Result<Json<Vec<RankedCenter>>, ApiError> {
    let (Some(lat), Some(lng)) = (
        parse_coordinate(params.lat.as_deref()),
        parse_coordinate(params.lng.as_deref()),
    ) else {
        warn!("Rejected recycling query without valid coordinates");
        return Err(ApiError::bad_request("Valid latitude and longitude required"));
    };

    let query = RecyclingQuery {
        lat,
        lng,
        material: params.material,
        limit: parse_limit(params.limit.as_deref()),
    };
    Ok(Json(find_nearby_centers(&state.store, &query)))
}

pub async fn api_recycling_materials(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(list_distinct_materials(&state.store))
}

pub async fn api_recycling_center(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RecyclingCenter>, ApiError> {
    let id = parse_id(&id)?;
    get_center(&state.store, id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Recycling center not found"))
}
