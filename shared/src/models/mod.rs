//! Data models
//!
//! Shared between catalog-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are unix millis.

pub mod review;
pub mod store;
pub mod tag;
pub mod user;

// Re-exports
pub use review::*;
pub use store::*;
pub use tag::*;
pub use user::*;
