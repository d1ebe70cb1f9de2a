// src/repositories/category_repository.rs
//
// Category persistence.
//
// The store only finds, creates and lists rows. Rows are never updated,
// so the unique index on (name, parent) is the only coordination writers need.

use chrono::{DateTime, Utc};
use rusqlite::{params, ErrorCode, OptionalExtension, Row};
use std::sync::Arc;

use crate::db::{get_connection, ConnectionPool};
use crate::domain::{Category, CategoryId};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait CategoryRepository: Send + Sync {
    /// Exact match on the unique `(name, parent_id)` pair.
    fn find_by_name_and_parent(
        &self,
        name: &str,
        parent_id: Option<CategoryId>,
    ) -> AppResult<Option<Category>>;

    /// Inserts a row. A concurrent insert of the same pair surfaces as
    /// `AppError::ConstraintViolation`.
    fn create(&self, name: &str, parent_id: Option<CategoryId>) -> AppResult<Category>;

    /// Every row, in no particular order.
    fn list_all(&self) -> AppResult<Vec<Category>>;

    fn get_by_id(&self, id: CategoryId) -> AppResult<Option<Category>>;
}

pub struct SqliteCategoryRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteCategoryRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Category - returns rusqlite::Error for query_map compatibility
    fn row_to_category(row: &Row) -> Result<Category, rusqlite::Error> {
        let id: i64 = row.get("category_id")?;
        let name: String = row.get("category_name")?;
        let parent_id: Option<i64> = row.get("parent_id")?;

        let created_at_str: String = row.get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    3,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        Ok(Category {
            id: CategoryId(id),
            name,
            parent_id: parent_id.map(CategoryId),
            created_at,
        })
    }

    fn is_unique_violation(err: &rusqlite::Error) -> bool {
        match err {
            rusqlite::Error::SqliteFailure(e, _) => {
                e.code == ErrorCode::ConstraintViolation
                    && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                        || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
            }
            _ => false,
        }
    }
}

impl CategoryRepository for SqliteCategoryRepository {
    fn find_by_name_and_parent(
        &self,
        name: &str,
        parent_id: Option<CategoryId>,
    ) -> AppResult<Option<Category>> {
        let conn = get_connection(&self.pool)?;

        // `IS` matches NULL parents as well as concrete ids
        let mut stmt = conn.prepare(
            "SELECT category_id, category_name, parent_id, created_at
             FROM category
             WHERE category_name = ?1 AND parent_id IS ?2",
        )?;

        let category = stmt
            .query_row(
                params![name, parent_id.map(CategoryId::get)],
                Self::row_to_category,
            )
            .optional()?;

        Ok(category)
    }

    fn create(&self, name: &str, parent_id: Option<CategoryId>) -> AppResult<Category> {
        let conn = get_connection(&self.pool)?;
        let created_at = Utc::now();

        let inserted = conn.execute(
            "INSERT INTO category (category_name, parent_id, created_at)
             VALUES (?1, ?2, ?3)",
            params![name, parent_id.map(CategoryId::get), created_at.to_rfc3339()],
        );

        match inserted {
            Ok(_) => Ok(Category {
                id: CategoryId(conn.last_insert_rowid()),
                name: name.to_string(),
                parent_id,
                created_at,
            }),
            Err(e) if Self::is_unique_violation(&e) => Err(AppError::ConstraintViolation {
                name: name.to_string(),
                parent_id,
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Category>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare(
            "SELECT category_id, category_name, parent_id, created_at FROM category",
        )?;

        let categories: Vec<Category> = stmt
            .query_map([], Self::row_to_category)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    fn get_by_id(&self, id: CategoryId) -> AppResult<Option<Category>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare(
            "SELECT category_id, category_name, parent_id, created_at
             FROM category WHERE category_id = ?1",
        )?;

        let category = stmt
            .query_row(params![id.get()], Self::row_to_category)
            .optional()?;

        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::CatalogConfig;
    use crate::db::{create_connection_pool, initialize_database};
    use tempfile::TempDir;

    fn setup() -> (TempDir, SqliteCategoryRepository) {
        let dir = TempDir::new().unwrap();
        let config = CatalogConfig {
            database_path: dir.path().join("catalog.db"),
            ..CatalogConfig::default()
        };
        let pool = Arc::new(create_connection_pool(&config).unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();
        (dir, SqliteCategoryRepository::new(pool))
    }

    #[test]
    fn test_create_assigns_ids() {
        let (_dir, repo) = setup();

        let root = repo.create("Electronics", None).unwrap();
        let child = repo.create("Laptops", Some(root.id)).unwrap();

        assert_ne!(root.id, child.id);
        assert_eq!(child.parent_id, Some(root.id));
        assert_eq!(repo.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_find_by_name_and_parent() {
        let (_dir, repo) = setup();

        let root = repo.create("Electronics", None).unwrap();
        let child = repo.create("Laptops", Some(root.id)).unwrap();

        let found_root = repo.find_by_name_and_parent("Electronics", None).unwrap();
        assert_eq!(found_root.map(|c| c.id), Some(root.id));

        let found_child = repo.find_by_name_and_parent("Laptops", Some(root.id)).unwrap();
        assert_eq!(found_child, Some(child));

        // Same name at a different level is a different row
        assert!(repo.find_by_name_and_parent("Laptops", None).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_create_is_constraint_violation() {
        let (_dir, repo) = setup();

        let root = repo.create("Phones", None).unwrap();
        repo.create("Accessories", Some(root.id)).unwrap();

        let dup_root = repo.create("Phones", None);
        assert!(matches!(
            dup_root,
            Err(AppError::ConstraintViolation { ref name, parent_id: None }) if name == "Phones"
        ));

        let dup_child = repo.create("Accessories", Some(root.id));
        assert!(matches!(
            dup_child,
            Err(AppError::ConstraintViolation { parent_id: Some(p), .. }) if p == root.id
        ));
    }

    #[test]
    fn test_same_name_different_parent_allowed() {
        let (_dir, repo) = setup();

        let phones = repo.create("Phones", None).unwrap();
        let laptops = repo.create("Laptops", None).unwrap();
        let a = repo.create("Accessories", Some(phones.id)).unwrap();
        let b = repo.create("Accessories", Some(laptops.id)).unwrap();

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_unknown_parent_is_database_error() {
        let (_dir, repo) = setup();

        let result = repo.create("Orphan", Some(CategoryId(999)));
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[test]
    fn test_list_all_and_get_by_id() {
        let (_dir, repo) = setup();

        assert!(repo.list_all().unwrap().is_empty());

        let root = repo.create("Toys", None).unwrap();
        repo.create("Puzzles", Some(root.id)).unwrap();

        let all = repo.list_all().unwrap();
        assert_eq!(all.len(), 2);

        let fetched = repo.get_by_id(root.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Toys");
        assert!(fetched.is_root());
        assert!(repo.get_by_id(CategoryId(12345)).unwrap().is_none());
    }
}
