// src/application/state.rs

use std::sync::Arc;

use crate::events::EventBus;
use crate::services::{CategoryCatalogService, ImportService, MaterializationService};

/// Shared application state handed to every command.
/// All fields are Arc-wrapped for thread-safe sharing across commands.
/// Built once by `app::catalog_init::init_catalog`.
#[derive(Clone)]
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub catalog_service: Arc<CategoryCatalogService>,
    pub materialization_service: Arc<MaterializationService>,
    pub import_service: Arc<ImportService>,

    /// Worker count for concurrent imports
    pub import_workers: usize,
}
