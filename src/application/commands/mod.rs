// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between callers and Services
// - Commands accept DTOs, return DTOs
// - Commands handle error conversion for callers
// - Commands NEVER contain business logic

pub mod category_commands;

pub use category_commands::*;
