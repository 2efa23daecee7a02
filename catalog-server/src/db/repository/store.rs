//! Store Repository
//!
//! CRUD plus the specialized catalog reads: pagination, geo proximity,
//! full-text search, tag filtering and review-based ranking.

use std::cmp::Ordering;

use shared::models::{RankedStore, Review, SearchHit, Store, StoreSummary, TagCount};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult, review};
use crate::utils::geo;

const STORE_COLUMNS: &str =
    "id, name, slug, description, address, lng, lat, photo, author_id, created_at";

/// Fully resolved insert record. The slug has already been derived by the
/// caller; the unique index still backstops it.
#[derive(Debug, Clone)]
pub struct NewStore {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub address: String,
    pub lng: f64,
    pub lat: f64,
    pub photo: Option<String>,
    pub author_id: i64,
}

/// Persist a new store (store row + tag rows in one transaction)
pub async fn create(pool: &SqlitePool, data: NewStore) -> RepoResult<Store> {
    let id = snowflake_id();
    let now = now_millis();

    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO store (id, name, slug, description, address, lng, lat, photo, author_id, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.slug)
    .bind(&data.description)
    .bind(&data.address)
    .bind(data.lng)
    .bind(data.lat)
    .bind(&data.photo)
    .bind(data.author_id)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    insert_tags(&mut tx, id, &data.tags).await?;
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create store".to_string()))
}

/// Find store by id (tags included)
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Store>> {
    let store: Option<Store> =
        sqlx::query_as(&format!("SELECT {STORE_COLUMNS} FROM store WHERE id = ?1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    match store {
        Some(mut s) => {
            load_tags(pool, std::slice::from_mut(&mut s)).await?;
            Ok(Some(s))
        }
        None => Ok(None),
    }
}

/// Canonical lookup by slug (tags included, no review join)
pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> RepoResult<Option<Store>> {
    let store: Option<Store> =
        sqlx::query_as(&format!("SELECT {STORE_COLUMNS} FROM store WHERE slug = ?1"))
            .bind(slug)
            .fetch_optional(pool)
            .await?;
    match store {
        Some(mut s) => {
            load_tags(pool, std::slice::from_mut(&mut s)).await?;
            Ok(Some(s))
        }
        None => Ok(None),
    }
}

/// Lookup by slug with the store's reviews joined in.
/// The join is opt-in via this variant; `find_by_slug` never loads reviews.
pub async fn find_by_slug_with_reviews(
    pool: &SqlitePool,
    slug: &str,
) -> RepoResult<Option<(Store, Vec<Review>)>> {
    let Some(store) = find_by_slug(pool, slug).await? else {
        return Ok(None);
    };
    let reviews = review::find_by_store(pool, store.id).await?;
    Ok(Some((store, reviews)))
}

/// Apply a partial update. `slug` is set only when the caller re-derived it
/// from a changed name; tag lists are replaced wholesale when present.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &shared::models::StoreUpdate,
    slug: Option<&str>,
) -> RepoResult<Store> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        "UPDATE store SET \
         name = COALESCE(?1, name), \
         slug = COALESCE(?2, slug), \
         description = COALESCE(?3, description), \
         address = COALESCE(?4, address), \
         lng = COALESCE(?5, lng), \
         lat = COALESCE(?6, lat), \
         photo = COALESCE(?7, photo) \
         WHERE id = ?8",
    )
    .bind(&data.name)
    .bind(slug)
    .bind(&data.description)
    .bind(&data.address)
    .bind(data.lng)
    .bind(data.lat)
    .bind(&data.photo)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Store {id} not found")));
    }

    if let Some(tags) = &data.tags {
        sqlx::query("DELETE FROM store_tag WHERE store_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_tags(&mut tx, id, tags).await?;
    }
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Store {id} not found")))
}

/// One page of stores, newest first. `page` is 1-indexed.
/// Returns the page plus the total store count.
pub async fn list_page(
    pool: &SqlitePool,
    page: u32,
    page_size: u32,
) -> RepoResult<(Vec<Store>, i64)> {
    let offset = (i64::from(page) - 1) * i64::from(page_size);
    let mut stores: Vec<Store> = sqlx::query_as(&format!(
        "SELECT {STORE_COLUMNS} FROM store ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2"
    ))
    .bind(i64::from(page_size))
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM store")
        .fetch_one(pool)
        .await?;

    load_tags(pool, &mut stores).await?;
    Ok((stores, total))
}

#[derive(sqlx::FromRow)]
struct NearRow {
    id: i64,
    slug: String,
    name: String,
    description: Option<String>,
    address: String,
    lng: f64,
    lat: f64,
    photo: Option<String>,
}

/// Stores within `max_distance_m` of a point, nearest first.
///
/// Bounding-box prefilter on the indexed lat/lng columns, then exact
/// haversine distance in-process for the filter and ordering.
pub async fn find_near(
    pool: &SqlitePool,
    lng: f64,
    lat: f64,
    max_distance_m: f64,
    limit: u32,
) -> RepoResult<Vec<StoreSummary>> {
    let (lat_delta, lng_delta) = geo::bounding_deltas(lat, max_distance_m);
    let rows: Vec<NearRow> = sqlx::query_as(
        "SELECT id, slug, name, description, address, lng, lat, photo FROM store \
         WHERE lat BETWEEN ?1 AND ?2 AND lng BETWEEN ?3 AND ?4",
    )
    .bind(lat - lat_delta)
    .bind(lat + lat_delta)
    .bind(lng - lng_delta)
    .bind(lng + lng_delta)
    .fetch_all(pool)
    .await?;

    let mut hits: Vec<StoreSummary> = rows
        .into_iter()
        .map(|r| {
            let distance_m = geo::haversine_m(lng, lat, r.lng, r.lat);
            StoreSummary {
                id: r.id,
                slug: r.slug,
                name: r.name,
                description: r.description,
                address: r.address,
                lng: r.lng,
                lat: r.lat,
                photo: r.photo,
                distance_m,
            }
        })
        .filter(|s| s.distance_m <= max_distance_m)
        .collect();

    hits.sort_by(|a, b| {
        a.distance_m
            .partial_cmp(&b.distance_m)
            .unwrap_or(Ordering::Equal)
    });
    hits.truncate(limit as usize);
    Ok(hits)
}

/// Relevance-ranked full-text search over name + description.
/// Name matches are weighted above description matches.
pub async fn search_text(
    pool: &SqlitePool,
    query: &str,
    limit: u32,
) -> RepoResult<Vec<SearchHit>> {
    let Some(match_expr) = fts_match_expr(query) else {
        return Ok(Vec::new());
    };
    let hits: Vec<SearchHit> = sqlx::query_as(
        "SELECT s.id, s.slug, s.name, s.description, s.address, s.lng, s.lat, s.photo, \
         -bm25(store_search, 5.0, 1.0) AS score \
         FROM store_search JOIN store s ON s.id = store_search.rowid \
         WHERE store_search MATCH ?1 \
         ORDER BY score DESC \
         LIMIT ?2",
    )
    .bind(match_expr)
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;
    Ok(hits)
}

/// Quote each whitespace token and join with OR: any-term matching, and
/// user input cannot smuggle FTS5 operators into the MATCH expression.
fn fts_match_expr(query: &str) -> Option<String> {
    let tokens: Vec<String> = query
        .split_whitespace()
        .map(|t| format!("\"{}\"", t.replace('"', "\"\"")))
        .collect();
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" OR "))
    }
}

/// Stores carrying `tag`; with `None`, every store that has at least one tag.
pub async fn find_by_tag(pool: &SqlitePool, tag: Option<&str>) -> RepoResult<Vec<Store>> {
    let mut stores: Vec<Store> = match tag {
        Some(t) => {
            sqlx::query_as(&format!(
                "SELECT {STORE_COLUMNS} FROM store \
                 WHERE EXISTS (SELECT 1 FROM store_tag st WHERE st.store_id = store.id AND st.tag = ?1) \
                 ORDER BY created_at DESC, id DESC"
            ))
            .bind(t)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as(&format!(
                "SELECT {STORE_COLUMNS} FROM store \
                 WHERE EXISTS (SELECT 1 FROM store_tag st WHERE st.store_id = store.id) \
                 ORDER BY created_at DESC, id DESC"
            ))
            .fetch_all(pool)
            .await?
        }
    };
    load_tags(pool, &mut stores).await?;
    Ok(stores)
}

/// Distinct tag usage across the catalog, most used first.
/// A tag repeated within one store counts once (per-store presence).
pub async fn tag_counts(pool: &SqlitePool) -> RepoResult<Vec<TagCount>> {
    let counts: Vec<TagCount> = sqlx::query_as(
        "SELECT tag, COUNT(DISTINCT store_id) AS count FROM store_tag \
         GROUP BY tag ORDER BY count DESC, tag ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(counts)
}

/// Top stores by average review rating.
///
/// Stores with fewer than two reviews are excluded before averaging;
/// ties break on review count, then id, so the ordering is stable.
/// Reviews are attached with one explicit follow-up query.
pub async fn top_rated(pool: &SqlitePool, limit: u32) -> RepoResult<Vec<RankedStore>> {
    let mut ranked: Vec<RankedStore> = sqlx::query_as(
        "SELECT s.id, s.slug, s.name, s.photo, \
         COUNT(r.id) AS review_count, \
         AVG(r.rating) AS average_rating \
         FROM store s JOIN review r ON r.store_id = s.id \
         GROUP BY s.id \
         HAVING COUNT(r.id) >= 2 \
         ORDER BY average_rating DESC, review_count DESC, s.id ASC \
         LIMIT ?1",
    )
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    let ids: Vec<i64> = ranked.iter().map(|s| s.id).collect();
    let mut by_store = review::find_by_store_ids(pool, &ids).await?;
    for store in &mut ranked {
        store.reviews = by_store.remove(&store.id).unwrap_or_default();
    }
    Ok(ranked)
}

/// Candidate slugs for the generator's lookup: `base` itself plus anything
/// prefixed `base-`. The generator narrows to the exact suffix pattern.
pub async fn find_slugs_like(pool: &SqlitePool, base: &str) -> RepoResult<Vec<String>> {
    let slugs: Vec<String> =
        sqlx::query_scalar("SELECT slug FROM store WHERE slug = ?1 OR slug LIKE ?1 || '-%'")
            .bind(base)
            .fetch_all(pool)
            .await?;
    Ok(slugs)
}

async fn insert_tags(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    store_id: i64,
    tags: &[String],
) -> RepoResult<()> {
    for (position, tag) in tags.iter().enumerate() {
        sqlx::query("INSERT INTO store_tag (store_id, position, tag) VALUES (?1, ?2, ?3)")
            .bind(store_id)
            .bind(position as i64)
            .bind(tag)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

/// Fill the `tags` field for a batch of stores with one query.
async fn load_tags(pool: &SqlitePool, stores: &mut [Store]) -> RepoResult<()> {
    if stores.is_empty() {
        return Ok(());
    }
    let ids: Vec<String> = stores.iter().map(|s| s.id.to_string()).collect();
    // ids are i64s, safe to interpolate into the IN list
    let sql = format!(
        "SELECT store_id, tag FROM store_tag WHERE store_id IN ({}) ORDER BY store_id, position",
        ids.join(",")
    );
    let rows: Vec<(i64, String)> = sqlx::query_as(&sql).fetch_all(pool).await?;

    for store in stores.iter_mut() {
        store.tags.clear();
    }
    for (store_id, tag) in rows {
        if let Some(store) = stores.iter_mut().find(|s| s.id == store_id) {
            store.tags.push(tag);
        }
    }
    Ok(())
}
