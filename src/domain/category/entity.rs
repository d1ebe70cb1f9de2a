use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Surrogate key assigned by the store on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl CategoryId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CategoryId {
    fn from(value: i64) -> Self {
        CategoryId(value)
    }
}

/// One node of the category taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Immutable identifier
    pub id: CategoryId,

    /// A single taxonomy segment, e.g. "Laptops"
    pub name: String,

    /// None for root categories
    pub parent_id: Option<CategoryId>,

    /// Insertion timestamp
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(id: CategoryId, name: String, parent_id: Option<CategoryId>) -> Self {
        Self {
            id,
            name,
            parent_id,
            created_at: Utc::now(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A category together with its fully qualified display path.
/// Read-time projection; owns no state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPath {
    pub category_id: CategoryId,
    pub path: String,
}

impl ResolvedPath {
    pub fn new(category_id: CategoryId, path: String) -> Self {
        Self { category_id, path }
    }
}
