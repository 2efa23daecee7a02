//! Store API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use shared::models::{Store, StoreCreate, StoreDetail, StoreSummary, StoreUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::PagedStores;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct SlugQuery {
    /// Opt into the review join
    #[serde(default)]
    pub reviews: bool,
}

#[derive(Debug, Deserialize)]
pub struct NearQuery {
    pub lng: f64,
    pub lat: f64,
    #[serde(rename = "maxDistance")]
    pub max_distance: Option<f64>,
    pub limit: Option<u32>,
}

/// GET /api/stores - paged listing, newest first.
/// A page past the end redirects to the last populated page.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Response> {
    match state.catalog().store_page(query.page).await? {
        PagedStores::Page(data) => Ok(Json(data).into_response()),
        PagedStores::RedirectToLast { last_page } => {
            Ok(Redirect::to(&format!("/api/stores?page={last_page}")).into_response())
        }
    }
}

/// POST /api/stores - create a store owned by the current user
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<StoreCreate>,
) -> AppResult<Json<Store>> {
    let store = state.catalog().create_store(&current_user, payload).await?;
    Ok(Json(store))
}

/// GET /api/stores/{id} - fetch a single store
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Store>> {
    let store = state.catalog().get_store(id).await?;
    Ok(Json(store))
}

/// PUT /api/stores/{id} - partial update, owner only
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<StoreUpdate>,
) -> AppResult<Json<Store>> {
    let store = state
        .catalog()
        .update_store(&current_user, id, payload)
        .await?;
    Ok(Json(store))
}

/// GET /api/stores/slug/{slug} - canonical lookup; `?reviews=true` joins
/// the store's reviews into the response
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Query(query): Query<SlugQuery>,
) -> AppResult<Json<StoreDetail>> {
    let detail = state.catalog().get_by_slug(&slug, query.reviews).await?;
    Ok(Json(detail))
}

/// GET /api/stores/near - stores within maxDistance meters, nearest first
pub async fn near(
    State(state): State<ServerState>,
    Query(query): Query<NearQuery>,
) -> AppResult<Json<Vec<StoreSummary>>> {
    let stores = state
        .catalog()
        .nearby(query.lng, query.lat, query.max_distance, query.limit)
        .await?;
    Ok(Json(stores))
}
