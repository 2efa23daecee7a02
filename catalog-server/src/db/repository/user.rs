//! User Repository
//!
//! Identity lives upstream; this module only answers the best-effort
//! authorship checks the catalog needs.

use shared::models::User;
use sqlx::SqlitePool;

use super::RepoResult;

/// Does a user row with this id exist?
pub async fn exists(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let found: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM user WHERE id = ?1)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(found)
}

/// Find user by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user: Option<User> =
        sqlx::query_as("SELECT id, display_name, created_at FROM user WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(user)
}
