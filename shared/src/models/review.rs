//! Review Model
//!
//! Reviews are owned by an external collaborator; the catalog only reads
//! them when joining for rankings and detail views.

use serde::{Deserialize, Serialize};

/// Review entity (read-only for the catalog)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Review {
    pub id: i64,
    pub store_id: i64,
    pub author_id: i64,
    /// 1..=5
    pub rating: i64,
    pub body: Option<String>,
    pub created_at: i64,
}
