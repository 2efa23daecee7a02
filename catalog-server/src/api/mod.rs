//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`stores`] - store CRUD, paged listing, slug lookup, proximity
//! - [`search`] - full-text search
//! - [`tags`] - facet browsing
//! - [`top`] - review-based rankings

pub mod health;
pub mod search;
pub mod stores;
pub mod tags;
pub mod top;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
