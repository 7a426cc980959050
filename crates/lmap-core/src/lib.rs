//! lmap-core - Core library for lineage-mapper
//!
//! Shared types for the lineage pipeline: configuration, table identities,
//! the file-to-table naming convention, SQL file discovery, the lineage
//! graph, and its serializers.

pub mod config;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod mermaid;
pub mod naming;
mod newtype_string;
pub mod render;
pub mod table_id;

pub use config::{Config, Dialect};
pub use discovery::{discover_sql_files, DiscoveredFiles, UnreadableDir};
pub use error::{CoreError, CoreResult};
pub use graph::{LineageDirection, LineageGraph, NodeKind, TableNode};
pub use naming::{StemNaming, TableNaming};
pub use render::{to_markdown, GraphPayload, PayloadEdge, PayloadNode};
pub use table_id::{canonical_name, TableId, TableName};
