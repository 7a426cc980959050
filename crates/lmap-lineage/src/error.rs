//! Error types for lmap-lineage

use lmap_sql::SqlError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Lineage building errors
///
/// `Io` and `Encoding` only ever skip a single file; they are recorded in the
/// scan summary instead of aborting the build.
#[derive(Error, Debug)]
pub enum LineageError {
    /// L001: SQL file could not be read
    #[error("[L001] Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// L002: SQL file is not valid UTF-8
    #[error("[L002] '{}' is not valid UTF-8: {message}", path.display())]
    Encoding { path: PathBuf, message: String },

    /// Unknown dialect in configuration
    #[error(transparent)]
    Sql(#[from] SqlError),
}

impl LineageError {
    /// File the error belongs to, for per-file errors
    pub fn path(&self) -> Option<&Path> {
        match self {
            LineageError::Io { path, .. } | LineageError::Encoding { path, .. } => {
                Some(path.as_path())
            }
            LineageError::Sql(_) => None,
        }
    }
}

/// Result type alias for LineageError
pub type LineageResult<T> = Result<T, LineageError>;
