// src/app/catalog_init.rs
//
// Catalog Initialization
//
// Builds the whole category subsystem from a `CatalogConfig`:
// pool -> schema -> repository -> services -> event handlers.
//
// CRITICAL RULES:
// - The pool is created here, explicitly, and injected downward
// - No service reaches for a global connection
// - Schema initialization runs before any service is handed out

use std::sync::Arc;

use crate::application::state::AppState;
use crate::db::{
    create_connection_pool, get_connection, get_database_stats, initialize_database,
    verify_database_integrity, ConnectionPool,
};
use crate::error::AppResult;
use crate::events::{create_event_bus, register_catalog_log_handlers};
use crate::repositories::{CategoryRepository, SqliteCategoryRepository};
use crate::services::{CategoryCatalogService, ImportService, MaterializationService};

use super::config::CatalogConfig;

// ============================================================================
// CATALOG SUBSYSTEM INITIALIZATION
// ============================================================================

/// Opens the configured database and wires every catalog service.
pub fn init_catalog(config: &CatalogConfig) -> AppResult<AppState> {
    config.validate()?;

    log::info!(
        "Initializing category catalog at {}",
        config.database_path.display()
    );

    let pool = Arc::new(create_connection_pool(config)?);
    init_catalog_with_pool(pool, config)
}

/// Wires the catalog over an existing pool.
///
/// This function:
/// 1. Applies the schema (idempotent) and runs SQLite's integrity check
/// 2. Creates the CategoryRepository
/// 3. Creates the materialization, catalog and import services
/// 4. Registers log handlers with the event bus
pub fn init_catalog_with_pool(
    pool: Arc<ConnectionPool>,
    config: &CatalogConfig,
) -> AppResult<AppState> {
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;

        let stats = get_database_stats(&conn)?;
        log::info!(
            "Category store: {} categories ({} roots), {} bytes",
            stats.category_count,
            stats.root_count,
            stats.size_bytes
        );
    }

    let event_bus = Arc::new(create_event_bus(config.event_log_capacity));
    register_catalog_log_handlers(&event_bus);

    let category_repo: Arc<dyn CategoryRepository> =
        Arc::new(SqliteCategoryRepository::new(Arc::clone(&pool)));

    let materialization_service = Arc::new(
        MaterializationService::new(category_repo.clone(), event_bus.clone())
            .with_retry_limit(config.create_retry_limit),
    );

    let catalog_service = Arc::new(CategoryCatalogService::new(
        category_repo,
        event_bus.clone(),
    ));

    let import_service = Arc::new(ImportService::new(
        materialization_service.clone(),
        event_bus.clone(),
    ));

    log::info!("Category catalog initialized");

    Ok(AppState {
        event_bus,
        catalog_service,
        materialization_service,
        import_service,
        import_workers: config.import_workers,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CategoryCreated;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> CatalogConfig {
        CatalogConfig {
            database_path: dir.path().join("nested").join("catalog.db"),
            ..CatalogConfig::default()
        }
    }

    #[test]
    fn test_init_creates_database_file() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let state = init_catalog(&config).unwrap();

        assert!(config.database_path.exists());
        assert!(state.catalog_service.flat_categories().unwrap().is_empty());
    }

    #[test]
    fn test_init_is_repeatable_on_same_file() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let first = init_catalog(&config).unwrap();
        let leaf = first.materialization_service.materialize("A|B").unwrap();
        drop(first);

        let second = init_catalog(&config).unwrap();
        assert_eq!(second.materialization_service.materialize("A|B").unwrap(), leaf);
        assert_eq!(second.catalog_service.flat_categories().unwrap().len(), 2);
    }

    #[test]
    fn test_log_handlers_registered() {
        let dir = TempDir::new().unwrap();
        let state = init_catalog(&config_in(&dir)).unwrap();

        assert!(state.event_bus.subscriber_count::<CategoryCreated>() > 0);
    }

    #[test]
    fn test_event_log_stays_within_configured_capacity() {
        let dir = TempDir::new().unwrap();
        let config = CatalogConfig {
            event_log_capacity: 16,
            ..config_in(&dir)
        };
        let state = init_catalog(&config).unwrap();

        for _ in 0..500 {
            state
                .materialization_service
                .materialize("Electronics|Phones")
                .unwrap();
        }

        assert_eq!(state.event_bus.get_event_log().len(), 16);
    }

    #[test]
    fn test_corrupt_database_file_rejected() {
        let dir = TempDir::new().unwrap();
        let config = CatalogConfig {
            busy_timeout_ms: 100,
            ..config_in(&dir)
        };
        std::fs::create_dir_all(config.database_path.parent().unwrap()).unwrap();
        std::fs::write(&config.database_path, b"definitely not a sqlite database file").unwrap();

        assert!(init_catalog(&config).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = TempDir::new().unwrap();
        let config = CatalogConfig {
            pool_max_size: 0,
            ..config_in(&dir)
        };

        assert!(init_catalog(&config).is_err());
    }
}
