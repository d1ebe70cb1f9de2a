// src/app/config.rs
//
// Runtime configuration for the category store and importer.
//
// Sources, lowest to highest precedence:
// - built-in defaults
// - a `.env` file in the working directory (if present)
// - CATALOG_* environment variables

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::db::default_database_path;
use crate::events::DEFAULT_EVENT_LOG_CAPACITY;
use crate::error::{AppError, AppResult};

pub const ENV_DATABASE_PATH: &str = "CATALOG_DATABASE_PATH";
pub const ENV_POOL_MAX_SIZE: &str = "CATALOG_POOL_MAX_SIZE";
pub const ENV_BUSY_TIMEOUT_MS: &str = "CATALOG_BUSY_TIMEOUT_MS";
pub const ENV_CREATE_RETRY_LIMIT: &str = "CATALOG_CREATE_RETRY_LIMIT";
pub const ENV_IMPORT_WORKERS: &str = "CATALOG_IMPORT_WORKERS";
pub const ENV_EVENT_LOG_CAPACITY: &str = "CATALOG_EVENT_LOG_CAPACITY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// SQLite file backing the category store
    pub database_path: PathBuf,

    /// Max pooled connections
    pub pool_max_size: u32,

    /// How long a writer waits on a locked database
    pub busy_timeout_ms: u64,

    /// Conflict re-reads allowed per segment before giving up
    pub create_retry_limit: u32,

    /// Parallel workers used by concurrent imports
    pub import_workers: usize,

    /// Recent events kept in the bus log; 0 keeps none
    pub event_log_capacity: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path()
                .unwrap_or_else(|_| PathBuf::from("catalog.db")),
            pool_max_size: 15,
            busy_timeout_ms: 5000,
            create_retry_limit: 3,
            import_workers: 4,
            event_log_capacity: DEFAULT_EVENT_LOG_CAPACITY,
        }
    }
}

impl CatalogConfig {
    /// Defaults, then `.env`, then process environment.
    pub fn from_env() -> AppResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(AppError::Config(format!("Failed to read .env: {}", e))),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DATABASE_PATH) {
            config.database_path = PathBuf::from(path);
        }
        if let Some(value) = lookup(ENV_POOL_MAX_SIZE) {
            config.pool_max_size = parse_number(ENV_POOL_MAX_SIZE, &value)?;
        }
        if let Some(value) = lookup(ENV_BUSY_TIMEOUT_MS) {
            config.busy_timeout_ms = parse_number(ENV_BUSY_TIMEOUT_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_CREATE_RETRY_LIMIT) {
            config.create_retry_limit = parse_number(ENV_CREATE_RETRY_LIMIT, &value)?;
        }
        if let Some(value) = lookup(ENV_IMPORT_WORKERS) {
            config.import_workers = parse_number(ENV_IMPORT_WORKERS, &value)?;
        }
        if let Some(value) = lookup(ENV_EVENT_LOG_CAPACITY) {
            config.event_log_capacity = parse_number(ENV_EVENT_LOG_CAPACITY, &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.pool_max_size == 0 {
            return Err(AppError::Config(format!("{} must be at least 1", ENV_POOL_MAX_SIZE)));
        }
        if self.create_retry_limit == 0 {
            return Err(AppError::Config(format!(
                "{} must be at least 1",
                ENV_CREATE_RETRY_LIMIT
            )));
        }
        if self.import_workers == 0 {
            return Err(AppError::Config(format!("{} must be at least 1", ENV_IMPORT_WORKERS)));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> AppResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| AppError::Config(format!("{}='{}': {}", key, value, e)))
}
