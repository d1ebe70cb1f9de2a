// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → caller-facing responses
// - Provides consistent error format for callers
// - Never exposes internal implementation details
// - Logs errors for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,

    /// Re-sending the same request may succeed
    pub retryable: bool,
}

/// Error categories for callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found (404)
    NotFound,

    /// Invalid input/validation error (400)
    Validation,

    /// Domain invariant violation (422)
    DomainError,

    /// Category store temporarily unreachable (503)
    StoreUnavailable,

    /// Database/persistence error (500)
    Database,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
            retryable: error_type == ErrorType::StoreUnavailable,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::new(ErrorType::NotFound, "Resource not found", None),

            AppError::InvalidPath(reason) => {
                Self::new(ErrorType::Validation, "Invalid category path", Some(reason))
            }

            AppError::Domain(domain_error) => Self::new(
                ErrorType::DomainError,
                "Domain validation failed",
                Some(domain_error.to_string()),
            ),

            AppError::StoreUnavailable(reason) => {
                log::warn!("Category store unavailable: {}", reason);
                Self::new(
                    ErrorType::StoreUnavailable,
                    "Category store temporarily unavailable",
                    Some("Retry the request".to_string()),
                )
            }

            // Recovered inside the materializer; reaching here means a caller
            // bypassed it and wrote directly.
            AppError::ConstraintViolation { name, .. } => Self::new(
                ErrorType::DomainError,
                "Category already exists",
                Some(name),
            ),

            AppError::Database(db_error) => {
                // Log full error for debugging
                log::error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::Internal,
                    "File system operation failed",
                    Some(io_error.to_string()),
                )
            }

            AppError::Config(message) => {
                log::error!("Configuration error: {}", message);
                Self::new(ErrorType::Internal, "Invalid configuration", Some(message))
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{} ({})", self.message, details),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ErrorResponse {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::NotFound);
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Resource not found");
        assert!(!error.retryable);
    }

    #[test]
    fn test_invalid_path_is_validation() {
        let error = ErrorResponse::from_app_error(AppError::InvalidPath("empty".to_string()));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.details.as_deref(), Some("empty"));
    }

    #[test]
    fn test_store_unavailable_is_retryable() {
        let error =
            ErrorResponse::from_app_error(AppError::StoreUnavailable("database is locked".into()));
        assert_eq!(error.error_type, ErrorType::StoreUnavailable);
        assert!(error.retryable);
        assert!(!error.success);
    }

    #[test]
    fn test_domain_error() {
        let error = ErrorResponse::from(AppError::Domain(DomainError::InvariantViolation(
            "bad".to_string(),
        )));
        assert_eq!(error.error_type, ErrorType::DomainError);
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::from_app_error(AppError::StoreUnavailable("down".into()));
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("store_unavailable"));
        assert!(json.contains("\"retryable\":true"));
    }
}
