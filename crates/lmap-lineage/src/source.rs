//! Loading SQL sources

use crate::error::LineageError;
use std::path::{Path, PathBuf};

/// One SQL file's text, keyed by its path relative to the SQL folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlSource {
    pub path: PathBuf,
    pub sql: String,
}

impl SqlSource {
    pub fn new(path: impl Into<PathBuf>, sql: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sql: sql.into(),
        }
    }

    /// Lower-cased file stem, used for informal cross-file references
    pub fn stem(&self) -> Option<String> {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_lowercase)
    }
}

/// Decode file bytes as UTF-8, dropping a leading byte-order mark
pub fn decode_source(path: &Path, bytes: Vec<u8>) -> Result<SqlSource, LineageError> {
    let sql = String::from_utf8(bytes).map_err(|e| LineageError::Encoding {
        path: path.to_path_buf(),
        message: e.utf8_error().to_string(),
    })?;
    let sql = match sql.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => sql,
    };
    Ok(SqlSource::new(path, sql))
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
