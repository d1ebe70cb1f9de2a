// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod category;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use category::{
    validate_segment, Category, CategoryId, RawCategoryPath, ResolvedPath,
    MAX_CATEGORY_NAME_LEN, PATH_DELIMITER, PATH_SEPARATOR,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Category name '{name}' is {len} characters, limit is {max}")]
    NameTooLong { name: String, len: usize, max: usize },

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
