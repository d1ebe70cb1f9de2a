// src/domain/category/path.rs
//
// Raw import paths ("Electronics|Computers|Laptops") as a validated value object.
//
// INVARIANTS:
// - At least one segment
// - Every segment is trimmed and non-blank
// - Segment order is root-first

use serde::{Deserialize, Serialize};

use super::invariants::validate_segment;
use crate::domain::{DomainError, DomainResult};

/// Delimiter between segments in raw import strings
pub const PATH_DELIMITER: char = '|';

/// Separator between names in rendered paths
pub const PATH_SEPARATOR: &str = " > ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCategoryPath {
    segments: Vec<String>,
}

impl RawCategoryPath {
    /// Splits on `|`, trims every segment and validates each one.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        if raw.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Category path is empty".to_string(),
            ));
        }

        let mut segments = Vec::new();
        for (position, segment) in raw.split(PATH_DELIMITER).enumerate() {
            let segment = segment.trim();
            validate_segment(segment).map_err(|e| match e {
                DomainError::InvariantViolation(_) => DomainError::InvariantViolation(format!(
                    "Segment {} of '{}' is blank",
                    position + 1,
                    raw
                )),
                other => other,
            })?;
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The segment that names the category attached to a product
    pub fn leaf(&self) -> &str {
        // parse() guarantees at least one segment
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// The display form, e.g. "Electronics > Computers > Laptops"
    pub fn display_path(&self) -> String {
        self.segments.join(PATH_SEPARATOR)
    }
}

impl std::fmt::Display for RawCategoryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join(&PATH_DELIMITER.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_segments() {
        let path = RawCategoryPath::parse("  Electronics | Computers|Laptops  ").unwrap();
        assert_eq!(path.segments(), &["Electronics", "Computers", "Laptops"]);
        assert_eq!(path.depth(), 3);
        assert_eq!(path.leaf(), "Laptops");
        assert_eq!(path.display_path(), "Electronics > Computers > Laptops");
    }

    #[test]
    fn test_single_segment() {
        let path = RawCategoryPath::parse("Toys").unwrap();
        assert_eq!(path.segments(), &["Toys"]);
        assert_eq!(path.to_string(), "Toys");
    }

    #[test]
    fn test_empty_and_blank_rejected() {
        assert!(RawCategoryPath::parse("").is_err());
        assert!(RawCategoryPath::parse("   ").is_err());
        assert!(RawCategoryPath::parse("   |   ").is_err());
    }

    #[test]
    fn test_blank_inner_segment_rejected() {
        let err = RawCategoryPath::parse("Electronics||Laptops").unwrap_err();
        assert!(err.to_string().contains("Segment 2"));
    }

    #[test]
    fn test_inner_whitespace_is_kept() {
        let path = RawCategoryPath::parse("Home & Kitchen|Small  Appliances").unwrap();
        assert_eq!(path.leaf(), "Small  Appliances");
    }
}
