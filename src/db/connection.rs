// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation
// - Thread-safe access

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::config::CatalogConfig;
use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Default database file location.
///
/// Path structure: {APP_DATA}/catalog-taxonomy/catalog.db
pub fn default_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Config("Could not determine app data directory".to_string()))?;

    Ok(app_data_dir.join("catalog-taxonomy").join("catalog.db"))
}

/// Create a connection pool for the configured database file.
///
/// Every pooled connection gets:
/// - foreign keys enabled
/// - WAL journal so readers never block the single writer
/// - a busy timeout so concurrent writers queue instead of failing
pub fn create_connection_pool(config: &CatalogConfig) -> AppResult<ConnectionPool> {
    ensure_parent_dir(&config.database_path)?;

    let busy_timeout_ms = config.busy_timeout_ms;
    let manager = SqliteConnectionManager::file(&config.database_path).with_init(move |conn| {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
        Ok(())
    });

    let pool = Pool::builder()
        .max_size(config.pool_max_size)
        .connection_timeout(Duration::from_millis(config.busy_timeout_ms.max(1000)))
        .build(manager)
        .map_err(|e| {
            AppError::StoreUnavailable(format!("Failed to create connection pool: {}", e))
        })?;

    log::info!(
        "Opened category store at {} (pool size {})",
        config.database_path.display(),
        config.pool_max_size
    );

    Ok(pool)
}

/// Get a connection from the pool
///
/// Checkout failures mean the store cannot be reached.
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get().map_err(|e| {
        AppError::StoreUnavailable(format!("Failed to get database connection: {}", e))
    })
}

/// Create a standalone in-memory connection (for testing)
#[cfg(test)]
pub fn create_test_connection() -> AppResult<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}

fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> CatalogConfig {
        CatalogConfig {
            database_path: dir.path().join("nested").join("catalog.db"),
            ..CatalogConfig::default()
        }
    }

    #[test]
    fn test_default_database_path() {
        let path = default_database_path().unwrap();
        assert!(path.ends_with("catalog-taxonomy/catalog.db"));
    }

    #[test]
    fn test_connection_pool_creation() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let pool = create_connection_pool(&config).unwrap();
        let conn = get_connection(&pool).unwrap();

        assert!(config.database_path.exists());

        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);

        let journal: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal.to_lowercase(), "wal");
    }

    #[test]
    fn test_test_connection() {
        let conn = create_test_connection().unwrap();

        let result: i32 = conn
            .query_row("SELECT 1 + 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(result, 2);

        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
    }
}
