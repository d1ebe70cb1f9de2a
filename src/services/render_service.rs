// src/services/render_service.rs
//
// Path Renderer
//
// Rebuilds "Electronics > Computers > Laptops" for every category from the
// flat row set. One pass = one snapshot, one index, one memo; nothing
// survives the pass.
//
// The walk is iterative: follow parent links upward until a root, a memo
// hit, a missing parent or a repeated id, then build the paths back down,
// memoizing each ancestor. Every row is resolved at most once per pass.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::domain::{Category, CategoryId, ResolvedPath, PATH_SEPARATOR};

/// Per-pass cache of already resolved paths
pub type PathMemo = HashMap<CategoryId, String>;

// ============================================================================
// INDEX
// ============================================================================

/// `id -> row` lookup built once per pass
pub struct CategoryIndex<'a> {
    by_id: HashMap<CategoryId, &'a Category>,
}

impl<'a> CategoryIndex<'a> {
    pub fn build(categories: &'a [Category]) -> Self {
        let by_id = categories.iter().map(|c| (c.id, c)).collect();
        Self { by_id }
    }

    pub fn get(&self, id: CategoryId) -> Option<&'a Category> {
        self.by_id.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

// ============================================================================
// ANOMALIES
// ============================================================================

/// Corrupt parent links found while rendering.
/// These degrade the affected entries; they never fail the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathAnomaly {
    /// `parent_id` points at a row that does not exist; rendered as a root
    DanglingParent {
        category_id: CategoryId,
        missing_parent_id: CategoryId,
    },

    /// The row is on a parent cycle; rendered as its bare name
    Cycle { category_id: CategoryId },
}

impl PathAnomaly {
    pub fn category_id(&self) -> CategoryId {
        match self {
            PathAnomaly::DanglingParent { category_id, .. } => *category_id,
            PathAnomaly::Cycle { category_id } => *category_id,
        }
    }
}

// ============================================================================
// RENDER PASS
// ============================================================================

pub struct RenderPass<'a> {
    index: CategoryIndex<'a>,
    memo: PathMemo,
    anomalies: Vec<PathAnomaly>,
}

impl<'a> RenderPass<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        Self {
            index: CategoryIndex::build(categories),
            memo: PathMemo::new(),
            anomalies: Vec::new(),
        }
    }

    /// Full display path for `category_id`, or None if the id is not in
    /// this pass's snapshot.
    pub fn render_path(&mut self, category_id: CategoryId) -> Option<String> {
        if let Some(resolved) = self.memo.get(&category_id) {
            return Some(resolved.clone());
        }

        let start = self.index.get(category_id)?;

        // Unresolved rows from `start` upward
        let mut chain: Vec<&'a Category> = vec![start];
        let mut visited: HashSet<CategoryId> = HashSet::from([category_id]);
        let mut prefix: Option<String> = None;
        let mut current = start;

        // Each iteration adds a distinct id, so the walk ends within index.len() steps
        while let Some(parent_id) = current.parent_id {
            if let Some(resolved) = self.memo.get(&parent_id) {
                prefix = Some(resolved.clone());
                break;
            }

            let Some(parent) = self.index.get(parent_id) else {
                log::warn!(
                    "Category {} ('{}') references missing parent {}; rendering it as a root",
                    current.id,
                    current.name,
                    parent_id
                );
                self.anomalies.push(PathAnomaly::DanglingParent {
                    category_id: current.id,
                    missing_parent_id: parent_id,
                });
                break;
            };

            if !visited.insert(parent_id) {
                let entry = chain.iter().position(|c| c.id == parent_id).unwrap_or(0);
                self.mark_cycle(&chain[entry..]);
                prefix = Some(chain[entry].name.clone());
                chain.truncate(entry);
                break;
            }

            chain.push(parent);
            current = parent;
        }

        for category in chain.iter().rev() {
            let path = match prefix.take() {
                Some(ancestors) => format!("{}{}{}", ancestors, PATH_SEPARATOR, category.name),
                None => category.name.clone(),
            };
            self.memo.insert(category.id, path.clone());
            prefix = Some(path);
        }

        self.memo.get(&category_id).cloned()
    }

    /// Cycle members render as their bare names
    fn mark_cycle(&mut self, members: &[&'a Category]) {
        let ids: Vec<CategoryId> = members.iter().map(|c| c.id).collect();
        log::warn!("Category parent links form a cycle through {:?}", ids);

        for member in members {
            self.memo.insert(member.id, member.name.clone());
            self.anomalies.push(PathAnomaly::Cycle {
                category_id: member.id,
            });
        }
    }

    pub fn anomalies(&self) -> &[PathAnomaly] {
        &self.anomalies
    }

    /// Ends the pass; the memo is dropped here.
    pub fn into_anomalies(self) -> Vec<PathAnomaly> {
        self.anomalies
    }
}

// ============================================================================
// BULK RENDERING
// ============================================================================

/// Output of one full rendering pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedCatalog {
    /// Sorted alphabetically by path (see `collation_key`), ties by id
    pub entries: Vec<ResolvedPath>,

    pub anomalies: Vec<PathAnomaly>,
}

impl RenderedCatalog {
    pub fn path_of(&self, category_id: CategoryId) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.category_id == category_id)
            .map(|e| e.path.as_str())
    }

    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Render every category once, sharing one memo, sorted by path.
pub fn render_all(categories: &[Category]) -> RenderedCatalog {
    let mut pass = RenderPass::new(categories);
    let mut seen = HashSet::with_capacity(categories.len());
    let mut entries = Vec::with_capacity(categories.len());

    for category in categories {
        if !seen.insert(category.id) {
            continue;
        }
        if let Some(path) = pass.render_path(category.id) {
            entries.push(ResolvedPath::new(category.id, path));
        }
    }

    entries.sort_by_cached_key(|e| (collation_key(&e.path), e.path.clone(), e.category_id));

    RenderedCatalog {
        entries,
        anomalies: pass.into_anomalies(),
    }
}

/// Alphabetical sort key: accents stripped, case folded.
///
/// "apple" < "Éclairs" < "Mango". Paths equal under this key fall back to
/// byte order, then id.
pub fn collation_key(path: &str) -> String {
    path.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
