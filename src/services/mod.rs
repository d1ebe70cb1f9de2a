// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod catalog_service;
pub mod import_service;
pub mod materialization_service;
pub mod materialization_types;
pub mod render_service;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all services and their types
pub use catalog_service::CategoryCatalogService;

pub use import_service::{
    ImportReport,
    ImportRow,
    ImportRowOutcome,
    ImportRowReport,
    ImportService,
};

pub use materialization_service::{MaterializationService, DEFAULT_CREATE_RETRY_LIMIT};

pub use materialization_types::{
    MaterializationResult,
    MaterializedSegment,
    SegmentDecision,
    SegmentOutcome,
};

pub use render_service::{
    collation_key,
    render_all,
    CategoryIndex,
    PathAnomaly,
    PathMemo,
    RenderPass,
    RenderedCatalog,
};
