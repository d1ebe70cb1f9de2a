// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are caller-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)

use serde::{Deserialize, Serialize};

use crate::domain::ResolvedPath;
use crate::services::{ImportReport, ImportRowOutcome};

// ============================================================================
// CATEGORY DTOs
// ============================================================================

/// One entry of the flat category listing.
/// `name` is the full display path, e.g. "Electronics > Computers > Laptops".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatCategory {
    pub category_id: i64,
    pub name: String,
}

impl From<ResolvedPath> for FlatCategory {
    fn from(resolved: ResolvedPath) -> Self {
        Self {
            category_id: resolved.category_id.get(),
            name: resolved.path,
        }
    }
}

// ============================================================================
// IMPORT DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummaryDto {
    pub total_rows: usize,
    pub materialized: usize,
    pub categories_created: usize,
    pub skipped: usize,
    pub failed: usize,
    pub duration_ms: u64,

    /// Rows that did not materialize, in input order
    pub problems: Vec<RowProblemDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowProblemDto {
    pub row_ref: String,
    pub status: String, // "skipped" or "failed"
    pub reason: String,
}

impl From<ImportReport> for ImportSummaryDto {
    fn from(report: ImportReport) -> Self {
        let problems = report
            .rows
            .iter()
            .filter_map(|row| match &row.outcome {
                ImportRowOutcome::Materialized { .. } => None,
                ImportRowOutcome::Skipped { reason } => Some(RowProblemDto {
                    row_ref: row.row_ref.clone(),
                    status: "skipped".to_string(),
                    reason: reason.clone(),
                }),
                ImportRowOutcome::Failed { reason } => Some(RowProblemDto {
                    row_ref: row.row_ref.clone(),
                    status: "failed".to_string(),
                    reason: reason.clone(),
                }),
            })
            .collect();

        Self {
            total_rows: report.total_rows(),
            materialized: report.materialized_count(),
            categories_created: report.categories_created(),
            skipped: report.skipped_count(),
            failed: report.failed_count(),
            duration_ms: report.duration_ms,
            problems,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryId;
    use crate::services::ImportRowReport;

    #[test]
    fn test_flat_category_json_shape() {
        let flat = FlatCategory::from(ResolvedPath {
            category_id: CategoryId(3),
            path: "Electronics > Laptops".to_string(),
        });

        let json = serde_json::to_value(&flat).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "category_id": 3, "name": "Electronics > Laptops" })
        );
    }

    #[test]
    fn test_import_summary_lists_problem_rows() {
        let report = ImportReport {
            rows: vec![
                ImportRowReport {
                    row_ref: "1".to_string(),
                    outcome: ImportRowOutcome::Materialized {
                        leaf_id: CategoryId(2),
                        categories_created: 2,
                    },
                },
                ImportRowReport {
                    row_ref: "2".to_string(),
                    outcome: ImportRowOutcome::Skipped {
                        reason: "empty".to_string(),
                    },
                },
            ],
            duration_ms: 5,
        };

        let summary = ImportSummaryDto::from(report);

        assert_eq!(summary.total_rows, 2);
        assert_eq!(summary.materialized, 1);
        assert_eq!(summary.categories_created, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.problems.len(), 1);
        assert_eq!(summary.problems[0].row_ref, "2");
        assert_eq!(summary.problems[0].status, "skipped");
    }
}
