// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - The boundary between callers (CLI, HTTP handlers) and the services
// - Translates between DTOs and domain entities
// - Maps internal errors to caller-facing responses

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType};
pub use state::AppState;
