// src/error/types.rs
use crate::domain::{CategoryId, DomainError};
use rusqlite::ErrorCode;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Raw category input is empty or has a blank/over-long segment.
    #[error("Invalid category path: {0}")]
    InvalidPath(String),

    /// A concurrent writer already created `(name, parent_id)`.
    /// Recovered inside the materializer, never surfaced to callers.
    #[error("Category '{name}' already exists under parent {parent_id:?}")]
    ConstraintViolation {
        name: String,
        parent_id: Option<CategoryId>,
    },

    /// The persistence layer cannot be reached. Safe to retry.
    #[error("Category store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    Database(rusqlite::Error),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Whether the caller may re-run the whole operation unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::StoreUnavailable(_))
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy)
            | Some(ErrorCode::DatabaseLocked)
            | Some(ErrorCode::CannotOpen)
            | Some(ErrorCode::SystemIoFailure) => AppError::StoreUnavailable(err.to_string()),
            _ => AppError::Database(err),
        }
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Other(format!("UUID error: {}", err))
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::StoreUnavailable(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_maps_to_store_unavailable() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            Some("database is locked".to_string()),
        );
        let app_err = AppError::from(err);
        assert!(matches!(app_err, AppError::StoreUnavailable(_)));
        assert!(app_err.is_retryable());
    }

    #[test]
    fn test_other_sqlite_errors_stay_database() {
        let app_err = AppError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(app_err, AppError::Database(_)));
        assert!(!app_err.is_retryable());
    }

    #[test]
    fn test_serializes_as_message() {
        let json = serde_json::to_string(&AppError::InvalidPath("empty".to_string())).unwrap();
        assert_eq!(json, "\"Invalid category path: empty\"");
    }
}
