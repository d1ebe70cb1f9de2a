// src/events/types.rs
//
// All domain events in the category engine.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events are emitted AFTER successful persistence
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::CategoryId;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// WRITE PATH
// ============================================================================

/// Emitted once per category row inserted by the materializer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub category_id: CategoryId,
    pub name: String,
    pub parent_id: Option<CategoryId>,
}

impl CategoryCreated {
    pub fn new(category_id: CategoryId, name: String, parent_id: Option<CategoryId>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            category_id,
            name,
            parent_id,
        }
    }
}

impl DomainEvent for CategoryCreated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "CategoryCreated" }
}

/// Emitted when a raw path has been fully materialized
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPathMaterialized {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub leaf_id: CategoryId,
    pub path: String,
    pub created_count: usize,
}

impl CategoryPathMaterialized {
    pub fn new(leaf_id: CategoryId, path: String, created_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            leaf_id,
            path,
            created_count,
        }
    }
}

impl DomainEvent for CategoryPathMaterialized {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "CategoryPathMaterialized" }
}

/// Emitted when an import batch finishes (successfully or not)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogImportCompleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,

    /// Rows handed to the importer
    pub total_rows: usize,

    /// Rows that resolved to a leaf category
    pub materialized_count: usize,

    /// New category rows created across the batch
    pub categories_created: usize,

    /// Rows skipped for malformed paths
    pub skipped_count: usize,

    /// Rows that failed for other reasons
    pub failed_count: usize,

    pub duration_ms: u64,
}

impl CatalogImportCompleted {
    pub fn new(
        total_rows: usize,
        materialized_count: usize,
        categories_created: usize,
        skipped_count: usize,
        failed_count: usize,
        duration_ms: u64,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            total_rows,
            materialized_count,
            categories_created,
            skipped_count,
            failed_count,
            duration_ms,
        }
    }
}

impl DomainEvent for CatalogImportCompleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "CatalogImportCompleted" }
}

// ============================================================================
// READ PATH
// ============================================================================

/// Emitted when a rendering pass ran into corrupt parent links.
/// One event per pass, carrying every anomaly found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAnomaliesDetected {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub dangling_parent_ids: Vec<CategoryId>,
    pub cyclic_ids: Vec<CategoryId>,
}

impl CategoryAnomaliesDetected {
    pub fn new(dangling_parent_ids: Vec<CategoryId>, cyclic_ids: Vec<CategoryId>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            dangling_parent_ids,
            cyclic_ids,
        }
    }

    pub fn total(&self) -> usize {
        self.dangling_parent_ids.len() + self.cyclic_ids.len()
    }
}

impl DomainEvent for CategoryAnomaliesDetected {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "CategoryAnomaliesDetected" }
}
