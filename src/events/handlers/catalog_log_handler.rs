// src/events/handlers/catalog_log_handler.rs
//
// Operator-facing log lines for category events.
// Anomalies are logged at warn so corrupt parent links surface without
// failing the read that found them.

use crate::events::types::{
    CatalogImportCompleted, CategoryAnomaliesDetected, CategoryCreated,
};
use crate::events::EventBus;

pub fn register_catalog_log_handlers(bus: &EventBus) {
    bus.subscribe::<CategoryCreated, _>(|event| {
        log::info!(
            "[CATALOG] Created category id={} name='{}' parent={:?}",
            event.category_id,
            event.name,
            event.parent_id
        );
    });

    bus.subscribe::<CategoryAnomaliesDetected, _>(|event| {
        log::warn!(
            "[CATALOG] {} corrupt category links: dangling parents {:?}, cycles {:?}",
            event.total(),
            event.dangling_parent_ids,
            event.cyclic_ids
        );
    });

    bus.subscribe::<CatalogImportCompleted, _>(|event| {
        log::info!(
            "[CATALOG] Import finished: {} rows, {} materialized, {} new categories, {} skipped, {} failed in {}ms",
            event.total_rows,
            event.materialized_count,
            event.categories_created,
            event.skipped_count,
            event.failed_count,
            event.duration_ms
        );
    });

    log::debug!("[CATALOG] Log handlers registered");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers_one_handler_per_event() {
        let bus = EventBus::new();
        register_catalog_log_handlers(&bus);

        assert_eq!(bus.subscriber_count::<CategoryCreated>(), 1);
        assert_eq!(bus.subscriber_count::<CategoryAnomaliesDetected>(), 1);
        assert_eq!(bus.subscriber_count::<CatalogImportCompleted>(), 1);
    }
}
