use crate::domain::{DomainError, DomainResult};

/// Widest name the `category_name` column accepts
pub const MAX_CATEGORY_NAME_LEN: usize = 255;

/// A segment must be non-blank and fit the name column.
/// Callers pass segments already trimmed.
pub fn validate_segment(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Category name cannot be empty".to_string(),
        ));
    }

    let len = name.chars().count();
    if len > MAX_CATEGORY_NAME_LEN {
        return Err(DomainError::NameTooLong {
            name: name.to_string(),
            len,
            max: MAX_CATEGORY_NAME_LEN,
        });
    }

    Ok(())
}
