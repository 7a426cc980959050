//! Error types for lmap-sql

use thiserror::Error;

/// SQL scanning errors
///
/// Malformed SQL is never an error here: the scanner degrades to best-effort
/// extraction and reports [`ScanWarning`](crate::scanner::ScanWarning)s instead.
#[derive(Error, Debug)]
pub enum SqlError {
    /// Unknown dialect name (S001)
    #[error("[S001] Unknown SQL dialect '{0}' (expected one of: generic, duckdb, snowflake, mssql)")]
    UnknownDialect(String),
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
