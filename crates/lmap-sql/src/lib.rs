//! lmap-sql - Lexical SQL scanning for lineage-mapper
//!
//! Finds the tables a SQL file reads without parsing a full grammar:
//! comments are blanked, the text is tokenized with sqlparser's tokenizer,
//! and `WITH`/`FROM`/`JOIN` are matched over each statement's tokens.

pub mod comments;
pub mod cte;
pub mod dialect;
pub mod error;
pub mod extractor;
pub mod lexer;
pub mod resolve;
pub mod scanner;

pub use comments::{strip_comments, QuoteRules, StripIssue, StrippedSql};
pub use cte::{collect_ctes, CteScope};
pub use dialect::{DuckDbDialect, GenericDialect, MsSqlDialect, SnowflakeDialect, SqlDialect};
pub use error::{SqlError, SqlResult};
pub use extractor::{extract_table_references, NamePart, TableReference};
pub use resolve::{resolve_reference, ModelCatalog, Resolution};
pub use scanner::{ScanWarning, ScannedSql, SqlScanner, StatementScan};
