//! SQL dialect abstraction
//!
//! Dialects only influence tokenization here: which characters open a
//! delimited identifier, how string literals escape, and whether comments
//! nest. The comment stripper and the tokenizer read the same rules.

use crate::comments::QuoteRules;
use sqlparser::dialect::{
    Dialect, DuckDbDialect as SqlParserDuckDb, GenericDialect as SqlParserGeneric,
    MsSqlDialect as SqlParserMsSql, SnowflakeDialect as SqlParserSnowflake,
};

/// Trait for SQL dialect implementations
pub trait SqlDialect: Send + Sync {
    /// Get the underlying sqlparser dialect used by the tokenizer
    fn tokenizer_dialect(&self) -> &dyn Dialect;

    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Quoting rules the comment stripper must honour for this dialect
    fn quote_rules(&self) -> QuoteRules {
        QuoteRules::for_dialect(self.tokenizer_dialect())
    }
}

/// Dialect-agnostic tokenization (accepts `"x"` and `` `x` `` identifiers)
pub struct GenericDialect {
    dialect: SqlParserGeneric,
}

impl GenericDialect {
    /// Create a new generic dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserGeneric {},
        }
    }
}

impl Default for GenericDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for GenericDialect {
    fn tokenizer_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "generic"
    }
}

/// DuckDB SQL dialect
pub struct DuckDbDialect {
    dialect: SqlParserDuckDb,
}

impl DuckDbDialect {
    /// Create a new DuckDB dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserDuckDb {},
        }
    }
}

impl Default for DuckDbDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for DuckDbDialect {
    fn tokenizer_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "duckdb"
    }
}

/// Snowflake SQL dialect
pub struct SnowflakeDialect {
    dialect: SqlParserSnowflake,
}

impl SnowflakeDialect {
    /// Create a new Snowflake dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserSnowflake {},
        }
    }
}

impl Default for SnowflakeDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for SnowflakeDialect {
    fn tokenizer_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "snowflake"
    }
}

/// T-SQL dialect (`[bracketed]` identifiers)
pub struct MsSqlDialect {
    dialect: SqlParserMsSql,
}

impl MsSqlDialect {
    /// Create a new T-SQL dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserMsSql {},
        }
    }
}

impl Default for MsSqlDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for MsSqlDialect {
    fn tokenizer_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "mssql"
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
