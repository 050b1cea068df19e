use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use ecotrack_common::Article;
use serde::Deserialize;

use super::parse_id;
use crate::error::ApiError;
use crate::AppState;

#[derive(Deserialize)]
pub struct ArticlesQuery {
    category: Option<String>,
}

pub async fn api_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ArticlesQuery>,
) -> Json<Vec<Article>> {
    Json(state.store.list_articles(params.category.as_deref()))
}

pub async fn api_article_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Article>, ApiError> {
    let id = parse_id(&id)?;
    state
        .store
        .get_article(id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Article not found"))
}
