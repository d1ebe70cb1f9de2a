// src/events/handlers/mod.rs
//
// Event Handlers
//
// Handlers use closure-based subscription via EventBus::subscribe.

pub mod catalog_log_handler;

pub use catalog_log_handler::register_catalog_log_handlers;
