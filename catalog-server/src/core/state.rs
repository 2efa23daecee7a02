use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::services::CatalogService;

/// Server state - shared handles for all request handlers
///
/// Cloning is cheap (pool and config are internally shared/small); axum
/// clones this per request.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// Initialize server state: work directory structure, then database
    /// (with migrations).
    ///
    /// # Panics
    ///
    /// Panics when the work directory or database cannot be initialized;
    /// the server cannot run without them.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("catalog.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        Self::new(config.clone(), db_service.pool)
    }

    /// Catalog service over the shared pool
    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.pool.clone(), self.config.query_defaults())
    }
}
