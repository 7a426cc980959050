//! Error types for lmap-core

use thiserror::Error;

/// Core error type for lineage-mapper
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: SQL folder does not exist or is not a directory
    #[error("[E003] SQL folder not found: {path}")]
    SqlFolderNotFound { path: String },

    /// E004: Table id not present in the lineage graph
    #[error("[E004] Table not found in lineage graph: {id}")]
    TableNotFound { id: String },

    /// E005: Empty name where a table id or name is required
    #[error("[E005] Empty name: {context}")]
    EmptyName { context: String },

    /// E006: Markdown input has no mermaid block
    #[error("[E006] No ```mermaid block found in {path}")]
    MermaidNotFound { path: String },

    /// E007: IO error
    #[error("[E007] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E008: IO error with file path context
    #[error("[E008] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E009: YAML parse error
    #[error("[E009] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
