// src/lib.rs
// catalog-taxonomy - Hierarchical marketplace category engine
//
// Architecture:
// - Write side: raw "A|B|C" paths are materialized into a parent-linked tree
// - Read side: stored rows are rendered back into "A > B > C" paths
// - Event-driven: services announce what they did through the event bus
// - Explicit: the pool is built once and injected, no global state

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod app;
pub mod application;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_segment, Category, CategoryId, DomainError, RawCategoryPath, ResolvedPath,
    MAX_CATEGORY_NAME_LEN, PATH_DELIMITER, PATH_SEPARATOR,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus, register_catalog_log_handlers, CatalogImportCompleted,
    CategoryAnomaliesDetected, CategoryCreated, CategoryPathMaterialized, DomainEvent, EventBus,
    EventLogEntry,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{CategoryRepository, SqliteCategoryRepository};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    render_all, CategoryCatalogService, ImportReport, ImportRow, ImportRowOutcome, ImportService,
    MaterializationResult, MaterializationService, PathAnomaly, RenderedCatalog, SegmentOutcome,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use app::{init_catalog, CatalogConfig};
pub use application::AppState;

// Re-export application submodules
pub use application::commands;
pub use application::dto;
