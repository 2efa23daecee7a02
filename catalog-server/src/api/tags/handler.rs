//! Tag API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::TagBrowse;

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/tags - all facets with counts, plus every tagged store
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<TagBrowse>> {
    let browse = state.catalog().browse_tag(None).await?;
    Ok(Json(browse))
}

/// GET /api/tags/{tag} - facets with counts, plus the stores for one tag
pub async fn list_for_tag(
    State(state): State<ServerState>,
    Path(tag): Path<String>,
) -> AppResult<Json<TagBrowse>> {
    let browse = state.catalog().browse_tag(Some(&tag)).await?;
    Ok(Json(browse))
}
