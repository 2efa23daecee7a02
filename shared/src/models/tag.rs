//! Tag Model

use serde::{Deserialize, Serialize};

/// A facet value with the number of stores carrying it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TagCount {
    pub tag: String,
    pub count: i64,
}

/// Facet browse view: every tag with its count, plus the stores for the
/// selected tag (all tagged stores when no tag is selected)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagBrowse {
    pub tag: Option<String>,
    pub tags: Vec<TagCount>,
    pub stores: Vec<crate::models::Store>,
}
