// src/events/mod.rs
//
// Internal Event System - Public API
//
// EventHandler is internal to the bus and not exported.

pub mod bus;
pub mod handlers;
pub mod types;

pub use types::{
    CatalogImportCompleted, CategoryAnomaliesDetected, CategoryCreated,
    CategoryPathMaterialized, DomainEvent,
};

pub use bus::{EventBus, EventLogEntry, DEFAULT_EVENT_LOG_CAPACITY};

pub use handlers::register_catalog_log_handlers;

/// Initialize a new event bus keeping at most `log_capacity` log entries
pub fn create_event_bus(log_capacity: usize) -> EventBus {
    EventBus::with_log_capacity(log_capacity)
}
