// src/services/import_service.rs
//
// Import Service
//
// Drives the materializer over a batch of catalog rows.
//
// RULES:
// - A malformed path skips that row only
// - A store outage aborts the batch and is returned to the caller;
//   re-running the batch is safe because materialize is idempotent
// - Any other per-row failure is recorded and the batch continues

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use super::materialization_service::MaterializationService;
use crate::domain::CategoryId;
use crate::error::{AppError, AppResult};
use crate::events::{CatalogImportCompleted, EventBus};

// ============================================================================
// TYPES
// ============================================================================

/// One catalog row as far as categories are concerned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRow {
    /// Caller's reference for reporting (product id, line number, ...)
    pub row_ref: String,

    /// Raw pipe-delimited category string
    pub raw_category: String,
}

impl ImportRow {
    pub fn new(row_ref: impl Into<String>, raw_category: impl Into<String>) -> Self {
        Self {
            row_ref: row_ref.into(),
            raw_category: raw_category.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportRowOutcome {
    Materialized {
        leaf_id: CategoryId,
        categories_created: usize,
    },
    Skipped {
        reason: String,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRowReport {
    pub row_ref: String,
    pub outcome: ImportRowOutcome,
}

/// Per-row results in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub rows: Vec<ImportRowReport>,
    pub duration_ms: u64,
}

impl ImportReport {
    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn materialized_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r.outcome, ImportRowOutcome::Materialized { .. }))
            .count()
    }

    pub fn categories_created(&self) -> usize {
        self.rows
            .iter()
            .map(|r| match r.outcome {
                ImportRowOutcome::Materialized {
                    categories_created, ..
                } => categories_created,
                _ => 0,
            })
            .sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r.outcome, ImportRowOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r.outcome, ImportRowOutcome::Failed { .. }))
            .count()
    }

    /// Leaf id for a row, if it materialized
    pub fn leaf_for(&self, row_ref: &str) -> Option<CategoryId> {
        self.rows.iter().find_map(|r| match (&r.outcome, r.row_ref == row_ref) {
            (ImportRowOutcome::Materialized { leaf_id, .. }, true) => Some(*leaf_id),
            _ => None,
        })
    }
}

// ============================================================================
// IMPORT SERVICE
// ============================================================================

pub struct ImportService {
    materializer: Arc<MaterializationService>,
    event_bus: Arc<EventBus>,
}

impl ImportService {
    pub fn new(materializer: Arc<MaterializationService>, event_bus: Arc<EventBus>) -> Self {
        Self {
            materializer,
            event_bus,
        }
    }

    /// Materialize rows one after another.
    pub fn import_rows<I>(&self, rows: I) -> AppResult<ImportReport>
    where
        I: IntoIterator<Item = ImportRow>,
    {
        let started = Instant::now();
        let mut report = ImportReport::default();

        for row in rows {
            match self.process_row(&row) {
                Ok(row_report) => report.rows.push(row_report),
                Err(e) => {
                    report.duration_ms = elapsed_ms(started);
                    log::error!("Import aborted at row '{}': {}", row.row_ref, e);
                    self.emit_completed(&report);
                    return Err(e);
                }
            }
        }

        report.duration_ms = elapsed_ms(started);
        self.emit_completed(&report);
        Ok(report)
    }

    /// Materialize rows on `workers` blocking tasks sharing one materializer.
    ///
    /// Workers that need the same ancestor race on its insert; the
    /// materializer's conflict fallback settles that without locking.
    /// A worker that hits an aborting error stops, but the rows it already
    /// finished still count toward the completion event.
    pub async fn import_concurrently(
        self: Arc<Self>,
        rows: Vec<ImportRow>,
        workers: usize,
    ) -> AppResult<ImportReport> {
        let started = Instant::now();
        let workers = workers.max(1);
        let total = rows.len();

        let mut buckets: Vec<Vec<(usize, ImportRow)>> = vec![Vec::new(); workers];
        for (position, row) in rows.into_iter().enumerate() {
            buckets[position % workers].push((position, row));
        }

        let mut handles = Vec::with_capacity(workers);
        for bucket in buckets.into_iter().filter(|b| !b.is_empty()) {
            let service = Arc::clone(&self);
            handles.push(tokio::task::spawn_blocking(move || {
                let mut done = Vec::with_capacity(bucket.len());
                for (position, row) in bucket {
                    match service.process_row(&row) {
                        Ok(row_report) => done.push((position, row_report)),
                        Err(e) => {
                            log::error!("Import aborted at row '{}': {}", row.row_ref, e);
                            return (done, Some(e));
                        }
                    }
                }
                (done, None)
            }));
        }

        let mut slots: Vec<Option<ImportRowReport>> = vec![None; total];
        let mut first_error: Option<AppError> = None;

        for handle in handles {
            let (done, worker_error) = match handle.await {
                Ok(finished) => finished,
                Err(e) => (
                    Vec::new(),
                    Some(AppError::Other(format!("Import worker panicked: {}", e))),
                ),
            };

            for (position, row_report) in done {
                slots[position] = Some(row_report);
            }
            if let Some(e) = worker_error {
                first_error.get_or_insert(e);
            }
        }

        let report = ImportReport {
            rows: slots.into_iter().flatten().collect(),
            duration_ms: elapsed_ms(started),
        };
        self.emit_completed(&report);

        match first_error {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }

    /// Err only for failures that should abort the batch.
    fn process_row(&self, row: &ImportRow) -> AppResult<ImportRowReport> {
        let outcome = match self.materializer.materialize_detailed(&row.raw_category) {
            Ok(result) => ImportRowOutcome::Materialized {
                leaf_id: result.leaf_id,
                categories_created: result.created_count(),
            },
            Err(AppError::InvalidPath(reason)) => {
                log::warn!("Skipping row '{}': {}", row.row_ref, reason);
                ImportRowOutcome::Skipped { reason }
            }
            Err(e) if e.is_retryable() => return Err(e),
            Err(e) => {
                log::warn!("Row '{}' failed: {}", row.row_ref, e);
                ImportRowOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        Ok(ImportRowReport {
            row_ref: row.row_ref.clone(),
            outcome,
        })
    }

    fn emit_completed(&self, report: &ImportReport) {
        self.event_bus.emit(CatalogImportCompleted::new(
            report.total_rows(),
            report.materialized_count(),
            report.categories_created(),
            report.skipped_count(),
            report.failed_count(),
            report.duration_ms,
        ));
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

// Tests are in import_service_tests.rs
