//! Reference resolution
//!
//! Turns a captured [`TableReference`] into a canonical table id: CTE names
//! are dropped, names of scanned files' models (by id or by file stem) map
//! to that model's id, and everything else is kept as an external source.

use std::collections::{BTreeSet, HashMap};

use crate::cte::CteScope;
use crate::extractor::TableReference;

/// How a reference resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Statement-local CTE; produces nothing
    Cte,
    /// A model produced by a scanned file
    Model { id: String },
    /// Not produced by any scanned file
    External { id: String },
}

impl Resolution {
    /// Canonical id for table resolutions
    pub fn id(&self) -> Option<&str> {
        match self {
            Resolution::Cte => None,
            Resolution::Model { id } | Resolution::External { id } => Some(id.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StemTarget {
    Unique(String),
    Ambiguous,
}

/// Canonical ids and file stems of every model produced by the scanned files
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    ids: BTreeSet<String>,
    stems: HashMap<String, StemTarget>,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a produced model by canonical id and its file stem.
    ///
    /// A stem shared by several files with different ids matches none of them.
    pub fn register(&mut self, id: &str, stem: &str) {
        let id = id.to_lowercase();
        let stem = stem.to_lowercase();
        self.stems
            .entry(stem)
            .and_modify(|target| {
                if *target != StemTarget::Unique(id.clone()) {
                    *target = StemTarget::Ambiguous;
                }
            })
            .or_insert_with(|| StemTarget::Unique(id.clone()));
        self.ids.insert(id);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(&id.to_lowercase())
    }

    /// Map a canonical name to a model id, by exact id first, then by stem
    pub fn lookup(&self, canonical: &str) -> Option<&str> {
        if let Some(id) = self.ids.get(canonical) {
            return Some(id.as_str());
        }
        match self.stems.get(canonical)? {
            StemTarget::Unique(id) => Some(id.as_str()),
            StemTarget::Ambiguous => {
                log::debug!(
                    "'{}' matches several model files by stem; keeping it as a source",
                    canonical
                );
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Resolve one reference against the statement's CTEs and the model catalog.
///
/// Only unqualified names can refer to a CTE.
pub fn resolve_reference(
    reference: &TableReference,
    ctes: &CteScope,
    catalog: &ModelCatalog,
) -> Resolution {
    let canonical = reference.canonical();

    if !reference.is_qualified() && ctes.contains(&canonical) {
        return Resolution::Cte;
    }

    match catalog.lookup(&canonical) {
        Some(id) => Resolution::Model { id: id.to_string() },
        None => Resolution::External { id: canonical },
    }
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod tests;
