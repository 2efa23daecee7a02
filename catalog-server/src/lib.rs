//! Catalog Server - store catalog with discovery and rankings
//!
//! # Module structure
//!
//! ```text
//! catalog-server/src/
//! ├── core/          # config, state, server lifecycle
//! ├── auth/          # resolved-identity boundary
//! ├── api/           # HTTP routes and handlers
//! ├── routes/        # router assembly + middleware stack
//! ├── services/      # slug generator, catalog orchestration
//! ├── db/            # pool setup + repository layer
//! └── utils/         # errors, logging, validation, geo math
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::CurrentUser;
pub use core::{Config, Server, ServerState};
pub use services::{CatalogService, PagedStores, QueryDefaults};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Prepare the process environment: dotenv, then logging.
/// Call once, before anything else touches config or tracing.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
