use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use ecotrack_common::{NewProduct, NewScan, Product, Scan};
use serde::Deserialize;

use super::parse_id;
use crate::error::ApiError;
use crate::AppState;

pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScansQuery {
    user_id: Option<String>,
}

#[derive(Deserialize)]
pub struct RecentQuery {
    limit: Option<String>,
}

// --- Products ---

pub async fn api_products(State(state): State<Arc<AppState>>) -> Json<Vec<Product>> {
    Json(state.store.list_products())
}

pub async fn api_product_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    state
        .store
        .get_product(id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product not found"))
}

pub async fn api_product_by_barcode(
    State(state): State<Arc<AppState>>,
    Path(barcode): Path<String>,
) -> Result<Json<Product>, ApiError> {
    state
        .store
        .get_product_by_barcode(&barcode)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product not found"))
}

pub async fn api_product_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    match params.q.as_deref() {
        Some(q) if !q.is_empty() => Ok(Json(state.store.search_products(q))),
        _ => Err(ApiError::bad_request("Search query required")),
    }
}

pub async fn api_create_product(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(new) = body?;
    let product = state.store.create_product(new)?;
    Ok((StatusCode::CREATED, Json(product)))
}

// --- Scans ---

pub async fn api_recent_scans(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecentQuery>,
) -> Json<Vec<Product>> {
    let limit = params
        .limit
        .as_deref()
        .and_then(|l| l.trim().parse::<usize>().ok())
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_RECENT_LIMIT);
    Json(state.store.recent_scanned_products(limit))
}

pub async fn api_scans(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScansQuery>,
) -> Result<Json<Vec<Scan>>, ApiError> {
    let user_id = match params.user_id.as_deref() {
        Some(raw) if !raw.trim().is_empty() => Some(
            raw.trim()
                .parse::<u32>()
                .map_err(|_| ApiError::bad_request("Invalid user ID format"))?,
        ),
        _ => None,
    };
    Ok(Json(state.store.list_scans(user_id)))
}

pub async fn api_create_scan(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewScan>, JsonRejection>,
) -> Result<(StatusCode, Json<Scan>), ApiError> {
    let Json(new) = body?;
    Ok((StatusCode::CREATED, Json(state.store.create_scan(new))))
}
