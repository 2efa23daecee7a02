//! Shared types for the store catalog
//!
//! Data models exchanged between catalog-server and API clients, plus
//! small utilities (timestamps, ID generation).

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
