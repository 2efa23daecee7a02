//! Top Stores API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::models::RankedStore;

use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub limit: Option<u32>,
}

/// GET /api/top - stores ranked by average review rating
pub async fn top(
    State(state): State<ServerState>,
    Query(query): Query<TopQuery>,
) -> AppResult<Json<Vec<RankedStore>>> {
    let stores = state.catalog().top_stores(query.limit).await?;
    Ok(Json(stores))
}
