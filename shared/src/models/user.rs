//! User Model
//!
//! Identity is resolved upstream; this row exists so store authorship can
//! be checked against a known user.

use serde::{Deserialize, Serialize};

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub display_name: String,
    pub created_at: i64,
}
