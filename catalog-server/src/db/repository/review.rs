//! Review Repository
//!
//! Read-only: reviews are written by an external service, the catalog only
//! joins them for detail views and rankings.

use std::collections::HashMap;

use shared::models::Review;
use sqlx::SqlitePool;

use super::RepoResult;

const REVIEW_COLUMNS: &str = "id, store_id, author_id, rating, body, created_at";

/// All reviews for one store, newest first
pub async fn find_by_store(pool: &SqlitePool, store_id: i64) -> RepoResult<Vec<Review>> {
    let reviews: Vec<Review> = sqlx::query_as(&format!(
        "SELECT {REVIEW_COLUMNS} FROM review WHERE store_id = ?1 ORDER BY created_at DESC, id DESC"
    ))
    .bind(store_id)
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}

/// Batched review fetch for a set of stores, grouped by store id.
/// This is the explicit join used by the ranking engine.
pub async fn find_by_store_ids(
    pool: &SqlitePool,
    store_ids: &[i64],
) -> RepoResult<HashMap<i64, Vec<Review>>> {
    if store_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let ids: Vec<String> = store_ids.iter().map(|id| id.to_string()).collect();
    // ids are i64s, safe to interpolate into the IN list
    let sql = format!(
        "SELECT {REVIEW_COLUMNS} FROM review WHERE store_id IN ({}) ORDER BY created_at DESC, id DESC",
        ids.join(",")
    );
    let reviews: Vec<Review> = sqlx::query_as(&sql).fetch_all(pool).await?;

    let mut grouped: HashMap<i64, Vec<Review>> = HashMap::new();
    for review in reviews {
        grouped.entry(review.store_id).or_default().push(review);
    }
    Ok(grouped)
}
