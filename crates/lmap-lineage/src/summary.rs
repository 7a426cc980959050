//! Scan summary: what was processed, skipped and tolerated

use crate::error::LineageError;
use lmap_core::{TableId, UnreadableDir};
use lmap_sql::ScanWarning;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Why a file contributed nothing to the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The file could not be read
    Io { message: String },
    /// The file is not UTF-8
    Encoding { message: String },
    /// No table name could be derived from the path
    Unnamed,
    /// A directory could not be listed, so its files were never seen
    UnreadableDirectory { message: String },
    /// Any other error handed in for this input
    Failed { message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Io { message } => write!(f, "read failed: {message}"),
            SkipReason::Encoding { message } => write!(f, "not valid UTF-8: {message}"),
            SkipReason::Unnamed => f.write_str("no table name can be derived from the file name"),
            SkipReason::UnreadableDirectory { message } => {
                write!(f, "directory not readable: {message}")
            }
            SkipReason::Failed { message } => write!(f, "could not be processed: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

impl SkippedFile {
    pub(crate) fn from_error(err: &LineageError) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_default();
        let reason = match err {
            LineageError::Io { source, .. } => SkipReason::Io {
                message: source.to_string(),
            },
            LineageError::Encoding { message, .. } => SkipReason::Encoding {
                message: message.clone(),
            },
            LineageError::Sql(err) => SkipReason::Failed {
                message: err.to_string(),
            },
        };
        Self { path, reason }
    }
}

impl From<UnreadableDir> for SkippedFile {
    fn from(dir: UnreadableDir) -> Self {
        Self {
            path: dir.path,
            reason: SkipReason::UnreadableDirectory {
                message: dir.reason,
            },
        }
    }
}

/// A tolerable problem in one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileWarning {
    pub path: PathBuf,
    pub warning: ScanWarning,
}

/// Per-scan accounting surfaced to the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Files handed to the builder
    pub files_found: usize,
    /// Files that contributed to the graph
    pub files_processed: usize,
    pub skipped: Vec<SkippedFile>,
    pub warnings: Vec<FileWarning>,
    /// Groups of tables that depend on each other in a loop
    pub cycles: Vec<Vec<TableId>>,
}

impl ScanSummary {
    pub fn has_skips(&self) -> bool {
        !self.skipped.is_empty()
    }
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} of {} SQL files ({} skipped, {} warnings)",
            self.files_processed,
            self.files_found,
            self.skipped.len(),
            self.warnings.len()
        )
    }
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
