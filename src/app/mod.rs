// src/app/mod.rs
//
// Application bootstrap: configuration and subsystem wiring.

pub mod catalog_init;
pub mod config;

pub use catalog_init::{init_catalog, init_catalog_with_pool};
pub use config::CatalogConfig;
