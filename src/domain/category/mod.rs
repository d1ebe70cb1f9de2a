//! Critical Category Invariants:
//!
//! 1. Parent links form a forest (no category is its own ancestor)
//! 2. `(name, parent_id)` is unique, roots included
//! 3. A category with no parent is a root and has no ancestors
//! 4. Name and parent are fixed at creation
//! 5. Name cannot be blank and is bounded by MAX_CATEGORY_NAME_LEN
//! 6. Rendered paths are derived on read, never stored

pub mod entity;
pub mod invariants;
pub mod path;

pub use entity::{Category, CategoryId, ResolvedPath};
pub use invariants::{validate_segment, MAX_CATEGORY_NAME_LEN};
pub use path::{RawCategoryPath, PATH_DELIMITER, PATH_SEPARATOR};
