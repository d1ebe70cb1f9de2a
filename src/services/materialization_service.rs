// src/services/materialization_service.rs
//
// Materialization Service
//
// Turns one raw pipe-delimited category string into a leaf category id,
// creating any missing ancestors on the way down.
//
// GUARANTEES:
// - Idempotent: materializing the same string twice yields the same leaf
//   and creates no rows the second time
// - Race-tolerant: a lost insert race at any segment is recovered by
//   re-reading the winner's row
// - No rollback: rows created before a store failure stay; re-running
//   the call completes the rest

use std::sync::Arc;

use super::materialization_types::{
    MaterializationResult, MaterializedSegment, SegmentDecision, SegmentOutcome,
};
use crate::domain::{CategoryId, RawCategoryPath};
use crate::error::{AppError, AppResult};
use crate::events::{CategoryCreated, CategoryPathMaterialized, EventBus};
use crate::repositories::CategoryRepository;

/// Conflict re-reads allowed per segment unless configured otherwise
pub const DEFAULT_CREATE_RETRY_LIMIT: u32 = 3;

// ============================================================================
// MATERIALIZATION SERVICE
// ============================================================================

pub struct MaterializationService {
    category_repo: Arc<dyn CategoryRepository>,
    event_bus: Arc<EventBus>,
    create_retry_limit: u32,
}

impl MaterializationService {
    pub fn new(category_repo: Arc<dyn CategoryRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            category_repo,
            event_bus,
            create_retry_limit: DEFAULT_CREATE_RETRY_LIMIT,
        }
    }

    pub fn with_retry_limit(mut self, create_retry_limit: u32) -> Self {
        self.create_retry_limit = create_retry_limit.max(1);
        self
    }

    // ========================================================================
    // PUBLIC API
    // ========================================================================

    /// Materialize `raw_path` and return the leaf category id.
    pub fn materialize(&self, raw_path: &str) -> AppResult<CategoryId> {
        Ok(self.materialize_detailed(raw_path)?.leaf_id)
    }

    /// Materialize `raw_path`, reporting what happened at every segment.
    pub fn materialize_detailed(&self, raw_path: &str) -> AppResult<MaterializationResult> {
        let path =
            RawCategoryPath::parse(raw_path).map_err(|e| AppError::InvalidPath(e.to_string()))?;

        let mut parent_id: Option<CategoryId> = None;
        let mut segments = Vec::with_capacity(path.depth());

        for name in path.segments() {
            let segment = self.resolve_segment(name, parent_id)?;
            parent_id = Some(segment.category_id);
            segments.push(segment);
        }

        let leaf_id = parent_id
            .ok_or_else(|| AppError::InvalidPath(format!("'{}' has no segments", raw_path)))?;

        let result = MaterializationResult {
            leaf_id,
            path,
            segments,
        };

        log::debug!(
            "Materialized '{}' -> {} ({} created)",
            result.path,
            leaf_id,
            result.created_count()
        );

        self.event_bus.emit(CategoryPathMaterialized::new(
            leaf_id,
            result.path.display_path(),
            result.created_count(),
        ));

        Ok(result)
    }

    // ========================================================================
    // DECISION LOGIC
    // ========================================================================

    fn decide_segment(
        &self,
        name: &str,
        parent_id: Option<CategoryId>,
    ) -> AppResult<SegmentDecision> {
        match self.category_repo.find_by_name_and_parent(name, parent_id)? {
            Some(existing) => Ok(SegmentDecision::UseExisting {
                category_id: existing.id,
            }),
            None => Ok(SegmentDecision::Create {
                name: name.to_string(),
                parent_id,
            }),
        }
    }

    // ========================================================================
    // EXECUTION LOGIC
    // ========================================================================

    /// Find-or-create one segment under `parent_id`.
    ///
    /// A `ConstraintViolation` means another writer inserted the same pair
    /// between our lookup and our insert; loop back to the lookup.
    fn resolve_segment(
        &self,
        name: &str,
        parent_id: Option<CategoryId>,
    ) -> AppResult<MaterializedSegment> {
        let mut conflicts: u32 = 0;

        loop {
            match self.decide_segment(name, parent_id)? {
                SegmentDecision::UseExisting { category_id } => {
                    let outcome = if conflicts > 0 {
                        SegmentOutcome::RecoveredFromConflict
                    } else {
                        SegmentOutcome::Reused
                    };
                    return Ok(MaterializedSegment {
                        category_id,
                        name: name.to_string(),
                        outcome,
                    });
                }
                SegmentDecision::Create { name, parent_id } => {
                    match self.category_repo.create(&name, parent_id) {
                        Ok(category) => {
                            self.event_bus.emit(CategoryCreated::new(
                                category.id,
                                category.name.clone(),
                                category.parent_id,
                            ));
                            return Ok(MaterializedSegment {
                                category_id: category.id,
                                name,
                                outcome: SegmentOutcome::Created,
                            });
                        }
                        Err(AppError::ConstraintViolation { .. }) => {
                            conflicts += 1;
                            log::debug!(
                                "Lost insert race for '{}' under {:?} (attempt {}), re-reading",
                                name,
                                parent_id,
                                conflicts
                            );
                            if conflicts > self.create_retry_limit {
                                return Err(AppError::Other(format!(
                                    "Category '{}' under {:?} conflicts on insert but cannot be found after {} attempts",
                                    name, parent_id, conflicts
                                )));
                            }
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

// Tests are in materialization_service_tests.rs
