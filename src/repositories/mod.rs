// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO event emission
// - Explicit SQL only

pub mod category_repository;

pub use category_repository::{CategoryRepository, SqliteCategoryRepository};

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
