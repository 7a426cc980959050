//! lmap-lineage - Table lineage builder for lineage-mapper
//!
//! Runs the `lmap-sql` scan over every SQL file, resolves the references
//! against the set of models the files produce, and accumulates one
//! `lmap-core` lineage graph plus a summary of skipped files and warnings.

pub mod builder;
pub mod error;
pub mod source;
pub mod summary;

pub use builder::{FileLineage, LineageBuilder, ScanResult};
pub use error::{LineageError, LineageResult};
pub use source::{decode_source, SqlSource};
pub use summary::{FileWarning, ScanSummary, SkipReason, SkippedFile};
