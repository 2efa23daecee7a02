//! Store Model

use serde::{Deserialize, Serialize};

use crate::models::{Review, User};

/// Store entity (a point of interest in the catalog)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Store {
    pub id: i64,
    pub name: String,
    /// URL-safe identifier derived from `name`; unique across the catalog
    pub slug: String,
    pub description: Option<String>,
    pub address: String,
    pub lng: f64,
    pub lat: f64,
    /// Filename reference into external photo storage; stored verbatim
    pub photo: Option<String>,
    pub author_id: i64,
    pub created_at: i64,
    /// Ordered tag labels; loaded from the store_tag table, not a column
    #[serde(default)]
    #[cfg_attr(feature = "db", sqlx(skip))]
    pub tags: Vec<String>,
}

/// Create store payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreCreate {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub address: String,
    pub lng: f64,
    pub lat: f64,
    pub photo: Option<String>,
}

/// Update store payload (partial; absent fields are left unchanged)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub address: Option<String>,
    pub lng: Option<f64>,
    pub lat: Option<f64>,
    pub photo: Option<String>,
}

/// Reduced projection for map display, with computed distance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSummary {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub lng: f64,
    pub lat: f64,
    pub photo: Option<String>,
    /// Meters from the query point
    pub distance_m: f64,
}

/// Full-text search hit with its relevance score (higher is better)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SearchHit {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub lng: f64,
    pub lat: f64,
    pub photo: Option<String>,
    pub score: f64,
}

/// Store projection ranked by average review rating
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RankedStore {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub photo: Option<String>,
    pub review_count: i64,
    pub average_rating: f64,
    /// Attached with an explicit follow-up query, never eagerly
    #[serde(default)]
    #[cfg_attr(feature = "db", sqlx(skip))]
    pub reviews: Vec<Review>,
}

/// One page of the store listing (newest first)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorePageData {
    pub stores: Vec<Store>,
    pub page: u32,
    pub pages: u32,
    pub total: i64,
}

/// Canonical store view for detail pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDetail {
    pub store: Store,
    /// Author profile, when the user row still exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    /// Present only when the caller opted into the review join
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
}
