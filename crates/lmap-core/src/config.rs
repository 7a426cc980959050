//! Configuration types and parsing for lineage.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Config file names tried by [`Config::load_from_dir`], in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["lineage.yml", "lineage.yaml"];

/// Lineage configuration from lineage.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root directory scanned recursively for `*.sql` files
    pub sql_folder_path: String,

    /// Directory receiving lineage.md and lineage.json
    #[serde(default = "default_lineage_output")]
    pub lineage_output: String,

    /// Optional front-end data directory; receives a copy of lineage.json
    #[serde(default)]
    pub lineage_ui: Option<String>,

    /// Schema prefixed to every file-derived table name
    #[serde(default, alias = "file-schema")]
    pub file_schema: Option<String>,

    /// Tokenizer dialect
    #[serde(default)]
    pub dialect: Dialect,

    /// Explicit produced-table names, keyed by path relative to `sql_folder_path`
    #[serde(default)]
    pub models: BTreeMap<String, String>,

    /// Directory or file paths (relative to `sql_folder_path`) skipped during discovery
    #[serde(default)]
    pub exclude_paths: Vec<String>,
}

/// SQL dialect used to tokenize files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Dialect-agnostic tokenization
    #[default]
    Generic,
    /// DuckDB SQL dialect
    DuckDb,
    /// Snowflake SQL dialect
    Snowflake,
    /// T-SQL (`[bracketed]` identifiers)
    MsSql,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dialect::Generic => "generic",
            Dialect::DuckDb => "duckdb",
            Dialect::Snowflake => "snowflake",
            Dialect::MsSql => "mssql",
        };
        f.write_str(name)
    }
}

fn default_lineage_output() -> String {
    "output".to_string()
}

impl Config {
    /// Config with defaults for everything but the SQL folder
    pub fn new(sql_folder_path: impl Into<String>) -> Self {
        Self {
            sql_folder_path: sql_folder_path.into(),
            lineage_output: default_lineage_output(),
            lineage_ui: None,
            file_schema: None,
            dialect: Dialect::default(),
            models: BTreeMap::new(),
            exclude_paths: Vec::new(),
        }
    }

    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration text
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory (lineage.yml, then lineage.yaml)
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
            .map_or_else(
                || {
                    Err(CoreError::ConfigNotFound {
                        path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
                    })
                },
                |path| Self::load(&path),
            )
    }

    /// Validate field values that serde cannot check
    pub fn validate(&self) -> CoreResult<()> {
        if self.sql_folder_path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "sql_folder_path is missing or empty".to_string(),
            });
        }
        if self.lineage_output.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "lineage_output must not be empty".to_string(),
            });
        }
        if let Some(schema) = &self.file_schema {
            if schema.trim().is_empty() || schema.contains(char::is_whitespace) {
                return Err(CoreError::ConfigInvalid {
                    message: format!("file_schema '{schema}' is not a valid schema name"),
                });
            }
        }
        if let Some((path, _)) = self.models.iter().find(|(_, table)| table.trim().is_empty()) {
            return Err(CoreError::ConfigInvalid {
                message: format!("models entry '{path}' has an empty table name"),
            });
        }
        Ok(())
    }

    /// Absolute SQL folder, resolved against `root` (the config file's directory)
    pub fn sql_folder_absolute(&self, root: &Path) -> PathBuf {
        resolve_path(root, &self.sql_folder_path)
    }

    /// Absolute output directory, resolved against `root`
    pub fn output_dir_absolute(&self, root: &Path) -> PathBuf {
        resolve_path(root, &self.lineage_output)
    }

    /// Absolute front-end data directory, if configured
    pub fn ui_dir_absolute(&self, root: &Path) -> Option<PathBuf> {
        self.lineage_ui.as_deref().map(|dir| resolve_path(root, dir))
    }
}

fn resolve_path(root: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
