// src/services/test_support.rs
//
// File-backed store fixture shared by service tests. A file (not
// `:memory:`) so every pooled connection sees the same database.

use std::sync::Arc;
use tempfile::TempDir;

use crate::app::config::CatalogConfig;
use crate::db::{create_connection_pool, initialize_database};
use crate::events::EventBus;
use crate::repositories::{CategoryRepository, SqliteCategoryRepository};

pub struct TestStore {
    // Dropping the dir deletes the database
    _dir: TempDir,
    pub repo: Arc<dyn CategoryRepository>,
    pub bus: Arc<EventBus>,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let config = CatalogConfig {
            database_path: dir.path().join("catalog.db"),
            pool_max_size: 8,
            ..CatalogConfig::default()
        };
        let pool = Arc::new(create_connection_pool(&config).expect("pool"));
        initialize_database(&pool.get().expect("connection")).expect("schema");

        let repo: Arc<dyn CategoryRepository> =
            Arc::new(SqliteCategoryRepository::new(Arc::clone(&pool)));

        Self {
            _dir: dir,
            repo,
            bus: Arc::new(EventBus::new()),
        }
    }

    /// `(name, parent_id)` of every row, sorted, for whole-store comparisons
    pub fn snapshot(&self) -> Vec<(String, Option<i64>)> {
        let mut rows: Vec<(String, Option<i64>)> = self
            .repo
            .list_all()
            .expect("list")
            .into_iter()
            .map(|c| (c.name, c.parent_id.map(|p| p.get())))
            .collect();
        rows.sort();
        rows
    }
}
