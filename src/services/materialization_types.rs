// src/services/materialization_types.rs
//
// Materialization Types
//
// Types describing what one materialize call did, segment by segment.
// No business logic in types.

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryId, RawCategoryPath};

// ============================================================================
// SEGMENT DECISION
// ============================================================================

/// What to do about one segment, decided from a store lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentDecision {
    /// A row for `(name, parent)` already exists
    UseExisting { category_id: CategoryId },

    /// No row yet; insert one under `parent_id`
    Create {
        name: String,
        parent_id: Option<CategoryId>,
    },
}

// ============================================================================
// SEGMENT OUTCOME
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentOutcome {
    /// This call inserted the row
    Created,

    /// The row already existed
    Reused,

    /// Our insert lost a race; the winner's row was re-read and reused
    RecoveredFromConflict,
}

impl std::fmt::Display for SegmentOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentOutcome::Created => write!(f, "created"),
            SegmentOutcome::Reused => write!(f, "reused"),
            SegmentOutcome::RecoveredFromConflict => write!(f, "recovered_from_conflict"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializedSegment {
    pub category_id: CategoryId,
    pub name: String,
    pub outcome: SegmentOutcome,
}

// ============================================================================
// MATERIALIZATION RESULT
// ============================================================================

/// Result of materializing one raw path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializationResult {
    /// The category to attach to the product
    pub leaf_id: CategoryId,

    /// The parsed input
    pub path: RawCategoryPath,

    /// One entry per segment, root first
    pub segments: Vec<MaterializedSegment>,
}

impl MaterializationResult {
    /// Rows this call inserted
    pub fn created_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.outcome == SegmentOutcome::Created)
            .count()
    }

    /// Races lost and recovered from
    pub fn conflict_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.outcome == SegmentOutcome::RecoveredFromConflict)
            .count()
    }

    /// Ids from root to leaf
    pub fn chain(&self) -> Vec<CategoryId> {
        self.segments.iter().map(|s| s.category_id).collect()
    }
}
