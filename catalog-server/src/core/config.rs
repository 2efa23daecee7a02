use std::path::PathBuf;

use crate::services::QueryDefaults;

/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/catalog | working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | STORES_PAGE_SIZE | 4 | stores per listing page |
/// | NEAR_MAX_DISTANCE_M | 16600 | default proximity radius (meters) |
/// | NEAR_LIMIT | 10 | default proximity result cap |
/// | SEARCH_LIMIT | 5 | default search result cap |
/// | TOP_LIMIT | 10 | default ranking result cap |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Stores per page in the listing
    pub page_size: u32,
    /// Default radius for proximity queries, in meters
    pub near_max_distance_m: f64,
    /// Default result cap for proximity queries
    pub near_limit: u32,
    /// Default result cap for text search
    pub search_limit: u32,
    /// Default result cap for the top-stores ranking
    pub top_limit: u32,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/catalog".into()),
            http_port: env_parsed("HTTP_PORT", 3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            page_size: env_parsed("STORES_PAGE_SIZE", 4),
            near_max_distance_m: env_parsed("NEAR_MAX_DISTANCE_M", 16_600.0),
            near_limit: env_parsed("NEAR_LIMIT", 10),
            search_limit: env_parsed("SEARCH_LIMIT", 5),
            top_limit: env_parsed("TOP_LIMIT", 10),
        }
    }

    /// Directory holding the SQLite database file
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Directory holding rotated log files
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the work directory structure if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    /// Query defaults handed to the catalog service
    pub fn query_defaults(&self) -> QueryDefaults {
        QueryDefaults {
            page_size: self.page_size.max(1),
            near_max_distance_m: self.near_max_distance_m,
            near_limit: self.near_limit,
            search_limit: self.search_limit,
            top_limit: self.top_limit,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_parsed<T: std::str::FromStr>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
