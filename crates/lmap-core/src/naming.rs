//! File-to-table naming convention
//!
//! Every scanned SQL file produces one logical table. [`TableNaming`] is the
//! collaborator that maps a file (by its path relative to the SQL folder) to
//! that table's name.

use crate::config::Config;
use crate::table_id::TableName;
use std::collections::HashMap;
use std::path::Path;

/// Deterministic mapping from a SQL file to the table it produces
pub trait TableNaming: Send + Sync {
    /// Produced table for a file path relative to the SQL folder.
    ///
    /// `None` means the file has no usable name (e.g. `.sql` with an empty stem).
    fn table_for(&self, relative_path: &Path) -> Option<TableName>;
}

/// `[schema.]<file stem>`, with explicit per-file overrides taking precedence
#[derive(Debug, Clone, Default)]
pub struct StemNaming {
    schema: Option<String>,
    overrides: HashMap<String, String>,
}

impl StemNaming {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every stem-derived name with `schema.`
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Use `table` for the file at `relative_path`
    pub fn with_override(mut self, relative_path: &str, table: impl Into<String>) -> Self {
        self.overrides.insert(path_key(relative_path), table.into());
        self
    }

    /// Naming from `file_schema` and `models` in the config
    pub fn from_config(config: &Config) -> Self {
        let mut naming = Self::new();
        if let Some(schema) = &config.file_schema {
            naming = naming.with_schema(schema.trim());
        }
        for (path, table) in &config.models {
            naming = naming.with_override(path, table.trim());
        }
        naming
    }
}

impl TableNaming for StemNaming {
    fn table_for(&self, relative_path: &Path) -> Option<TableName> {
        let key = path_key(&relative_path.to_string_lossy());
        if let Some(table) = self.overrides.get(&key) {
            return TableName::try_new(table.clone());
        }

        let stem = relative_path.file_stem()?.to_str()?;
        if stem.is_empty() {
            return None;
        }
        let name = match &self.schema {
            Some(schema) => format!("{schema}.{stem}"),
            None => stem.to_string(),
        };
        TableName::try_new(name)
    }
}

/// Compare paths with forward slashes and without a leading `./`
fn path_key(path: &str) -> String {
    let unified = path.replace('\\', "/");
    unified.trim_start_matches("./").to_string()
}

#[cfg(test)]
#[path = "naming_test.rs"]
mod tests;
