// src/services/catalog_service.rs
//
// Category Catalog Service - read side
//
// Loads one snapshot of the store per call and renders it. Writers that
// commit after the snapshot show up on the next call.

use std::sync::Arc;

use super::render_service::{render_all, PathAnomaly, RenderPass, RenderedCatalog};
use crate::domain::CategoryId;
use crate::error::AppResult;
use crate::events::{CategoryAnomaliesDetected, EventBus};
use crate::repositories::CategoryRepository;

pub struct CategoryCatalogService {
    category_repo: Arc<dyn CategoryRepository>,
    event_bus: Arc<EventBus>,
}

impl CategoryCatalogService {
    pub fn new(category_repo: Arc<dyn CategoryRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            category_repo,
            event_bus,
        }
    }

    /// Every category with its full path, sorted by path.
    pub fn flat_categories(&self) -> AppResult<RenderedCatalog> {
        let snapshot = self.category_repo.list_all()?;
        let rendered = render_all(&snapshot);

        self.report_anomalies(&rendered.anomalies);

        log::debug!(
            "Rendered {} categories ({} anomalies)",
            rendered.len(),
            rendered.anomalies.len()
        );
        Ok(rendered)
    }

    /// Full path of a single category, or None if it does not exist.
    pub fn path_of(&self, category_id: CategoryId) -> AppResult<Option<String>> {
        // Unknown ids skip the full snapshot
        if self.category_repo.get_by_id(category_id)?.is_none() {
            return Ok(None);
        }

        let snapshot = self.category_repo.list_all()?;
        let mut pass = RenderPass::new(&snapshot);
        let path = pass.render_path(category_id);

        self.report_anomalies(pass.anomalies());
        Ok(path)
    }

    fn report_anomalies(&self, anomalies: &[PathAnomaly]) {
        if anomalies.is_empty() {
            return;
        }

        let mut dangling = Vec::new();
        let mut cyclic = Vec::new();
        for anomaly in anomalies {
            match anomaly {
                PathAnomaly::DanglingParent { category_id, .. } => dangling.push(*category_id),
                PathAnomaly::Cycle { category_id } => cyclic.push(*category_id),
            }
        }

        self.event_bus
            .emit(CategoryAnomaliesDetected::new(dangling, cyclic));
    }
}
