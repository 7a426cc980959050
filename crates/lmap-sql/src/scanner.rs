//! SQL scanner: comment stripping, tokenization and per-statement extraction

use std::fmt;

use serde::Serialize;

use crate::comments::{line_of, strip_comments, StripIssue};
use crate::cte::{collect_ctes, CteScope};
use crate::dialect::{DuckDbDialect, GenericDialect, MsSqlDialect, SnowflakeDialect, SqlDialect};
use crate::error::{SqlError, SqlResult};
use crate::extractor::{extract_table_references, TableReference};
use crate::lexer::{split_statements, tokenize};

/// A tolerable problem found while scanning one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanWarning {
    /// Everything after the comment start was ignored
    UnterminatedBlockComment { line: usize },
    /// Everything after the opening quote was ignored
    UnterminatedQuote { quote: char, line: usize },
    /// Tokenization stopped before `line`
    TokenizerRecovered { line: usize, message: String },
    /// No tokens could be produced
    TokenizerFailed { message: String },
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanWarning::UnterminatedBlockComment { line } => write!(
                f,
                "unterminated block comment at line {line}; rest of file ignored"
            ),
            ScanWarning::UnterminatedQuote { quote, line } => write!(
                f,
                "unterminated {quote} quote at line {line}; rest of file ignored"
            ),
            ScanWarning::TokenizerRecovered { line, message } => write!(
                f,
                "tokenizer error ({message}); scanned up to line {line}"
            ),
            ScanWarning::TokenizerFailed { message } => {
                write!(f, "tokenizer error ({message}); no tables extracted")
            }
        }
    }
}

/// CTEs and table references of one `;`-separated statement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatementScan {
    pub ctes: CteScope,
    pub references: Vec<TableReference>,
}

/// Result of scanning one SQL text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScannedSql {
    pub statements: Vec<StatementScan>,
    pub warnings: Vec<ScanWarning>,
}

impl ScannedSql {
    /// All references across statements, in source order
    pub fn references(&self) -> impl Iterator<Item = &TableReference> {
        self.statements.iter().flat_map(|s| s.references.iter())
    }
}

/// Scans SQL text for table references under a tokenizer dialect
pub struct SqlScanner {
    dialect: Box<dyn SqlDialect>,
}

impl SqlScanner {
    /// Create a new scanner with the given dialect
    pub fn new(dialect: Box<dyn SqlDialect>) -> Self {
        Self { dialect }
    }

    pub fn generic() -> Self {
        Self::new(Box::new(GenericDialect::new()))
    }

    pub fn duckdb() -> Self {
        Self::new(Box::new(DuckDbDialect::new()))
    }

    pub fn snowflake() -> Self {
        Self::new(Box::new(SnowflakeDialect::new()))
    }

    pub fn mssql() -> Self {
        Self::new(Box::new(MsSqlDialect::new()))
    }

    /// Create a scanner from a dialect name
    pub fn from_dialect_name(name: &str) -> SqlResult<Self> {
        match name.to_lowercase().as_str() {
            "generic" | "ansi" => Ok(Self::generic()),
            "duckdb" => Ok(Self::duckdb()),
            "snowflake" => Ok(Self::snowflake()),
            "mssql" | "tsql" => Ok(Self::mssql()),
            _ => Err(SqlError::UnknownDialect(name.to_string())),
        }
    }

    pub fn dialect_name(&self) -> &'static str {
        self.dialect.name()
    }

    /// Scan SQL text. Never fails: malformed input yields warnings and
    /// whatever references could still be found.
    pub fn scan(&self, sql: &str) -> ScannedSql {
        let stripped = strip_comments(sql, self.dialect.quote_rules());
        let mut warnings: Vec<ScanWarning> = stripped
            .issues
            .iter()
            .map(|issue| warning_for(issue, sql))
            .collect();

        let tokenized = tokenize(&stripped.text, self.dialect.tokenizer_dialect());
        warnings.extend(tokenized.warning);

        let statements = split_statements(&tokenized.tokens)
            .into_iter()
            .map(|tokens| StatementScan {
                ctes: collect_ctes(tokens),
                references: extract_table_references(tokens),
            })
            .collect();

        ScannedSql {
            statements,
            warnings,
        }
    }
}

impl Default for SqlScanner {
    fn default() -> Self {
        Self::generic()
    }
}

fn warning_for(issue: &StripIssue, sql: &str) -> ScanWarning {
    let line = line_of(sql, issue.offset());
    match issue {
        StripIssue::UnterminatedBlockComment { .. } => {
            ScanWarning::UnterminatedBlockComment { line }
        }
        StripIssue::UnterminatedQuote { quote, .. } => ScanWarning::UnterminatedQuote {
            quote: *quote,
            line,
        },
    }
}

#[cfg(test)]
#[path = "scanner_test.rs"]
mod tests;
