//! Shared helpers for integration tests: an in-memory database with the
//! real migrations applied, plus seed functions.

#![allow(dead_code)]

use std::str::FromStr;

use catalog_server::auth::CurrentUser;
use catalog_server::services::{CatalogService, QueryDefaults};
use shared::models::StoreCreate;
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// In-memory SQLite with the production migrations applied.
/// Single connection so every query sees the same database.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid sqlite url")
        .pragma("foreign_keys", "ON");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("open in-memory sqlite");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("apply migrations");
    pool
}

pub fn service(pool: &SqlitePool) -> CatalogService {
    CatalogService::new(pool.clone(), QueryDefaults::default())
}

pub async fn seed_user(pool: &SqlitePool, name: &str) -> CurrentUser {
    let id = snowflake_id();
    sqlx::query("INSERT INTO user (id, display_name, created_at) VALUES (?1, ?2, ?3)")
        .bind(id)
        .bind(name)
        .bind(now_millis())
        .execute(pool)
        .await
        .expect("insert user");
    CurrentUser {
        id,
        name: name.to_string(),
    }
}

/// Reviews are appended by an external service; tests write them directly.
pub async fn seed_review(pool: &SqlitePool, store_id: i64, author_id: i64, rating: i64) {
    sqlx::query(
        "INSERT INTO review (id, store_id, author_id, rating, body, created_at) \
         VALUES (?1, ?2, ?3, ?4, NULL, ?5)",
    )
    .bind(snowflake_id())
    .bind(store_id)
    .bind(author_id)
    .bind(rating)
    .bind(now_millis())
    .execute(pool)
    .await
    .expect("insert review");
}

pub fn store_payload(name: &str, lng: f64, lat: f64) -> StoreCreate {
    StoreCreate {
        name: name.to_string(),
        description: None,
        tags: Vec::new(),
        address: "1 Test Street".to_string(),
        lng,
        lat,
        photo: None,
    }
}
