//! Graph builder
//!
//! Folds every file's extraction into one [`LineageGraph`]. Inputs are sorted
//! by path first, so the result (display names included) does not depend on
//! the order files were read in.

use crate::error::{LineageError, LineageResult};
use crate::source::SqlSource;
use crate::summary::{FileWarning, ScanSummary, SkipReason, SkippedFile};
use lmap_core::{Config, LineageGraph, StemNaming, TableId, TableName, TableNaming};
use lmap_sql::{resolve_reference, ModelCatalog, Resolution, SqlScanner};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// What one file contributed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileLineage {
    pub path: PathBuf,
    /// Table the file produces
    pub table: TableId,
    /// CTE names declared in the file (all statements)
    pub ctes: Vec<String>,
    /// Resolved tables the file reads, sorted, self-references removed
    pub upstream: Vec<TableId>,
}

/// Finished lineage scan
#[derive(Debug)]
pub struct ScanResult {
    pub graph: LineageGraph,
    pub summary: ScanSummary,
    /// Per-file results, sorted by path
    pub files: Vec<FileLineage>,
}

/// A file that passed loading and naming
struct NamedSource {
    source: SqlSource,
    name: TableName,
    id: TableId,
}

/// Builds a lineage graph from SQL sources
pub struct LineageBuilder {
    scanner: SqlScanner,
    naming: Box<dyn TableNaming>,
}

impl LineageBuilder {
    pub fn new(scanner: SqlScanner, naming: impl TableNaming + 'static) -> Self {
        Self {
            scanner,
            naming: Box::new(naming),
        }
    }

    /// Scanner dialect and naming convention from the config
    pub fn from_config(config: &Config) -> LineageResult<Self> {
        let scanner = SqlScanner::from_dialect_name(&config.dialect.to_string())?;
        Ok(Self::new(scanner, StemNaming::from_config(config)))
    }

    /// Build the graph from loaded (or failed) sources.
    ///
    /// Failed inputs are recorded as skipped; they never stop the build.
    pub fn build(&self, inputs: Vec<Result<SqlSource, LineageError>>) -> ScanResult {
        let mut summary = ScanSummary {
            files_found: inputs.len(),
            ..Default::default()
        };

        let mut sources = Vec::with_capacity(inputs.len());
        for input in inputs {
            match input {
                Ok(source) => sources.push(source),
                Err(err) => {
                    log::warn!("skipping file: {}", err);
                    summary.skipped.push(SkippedFile::from_error(&err));
                }
            }
        }
        sources.sort_by(|a, b| a.path.cmp(&b.path));

        let named = self.name_sources(sources, &mut summary);

        let mut catalog = ModelCatalog::new();
        let mut graph = LineageGraph::new();
        for file in &named {
            let stem = file.source.stem().unwrap_or_else(|| file.id.to_string());
            catalog.register(&file.id, &stem);
            if graph.contains(&file.id) {
                log::warn!(
                    "'{}' is produced by more than one file (again by {})",
                    file.id,
                    file.source.path.display()
                );
            }
            graph.add_model(file.id.clone(), &file.name);
        }

        let mut files = Vec::with_capacity(named.len());
        for file in &named {
            files.push(self.scan_file(file, &catalog, &mut graph, &mut summary));
        }
        summary.files_processed = files.len();

        let promoted = graph.promote_targets();
        if promoted > 0 {
            log::debug!("promoted {} tables to models", promoted);
        }

        summary.cycles = graph.cycles();
        for cycle in &summary.cycles {
            let ids: Vec<&str> = cycle.iter().map(TableId::as_str).collect();
            log::warn!("circular lineage: {}", ids.join(" -> "));
        }
        summary.skipped.sort_by(|a, b| a.path.cmp(&b.path));

        ScanResult {
            graph,
            summary,
            files,
        }
    }

    fn name_sources(&self, sources: Vec<SqlSource>, summary: &mut ScanSummary) -> Vec<NamedSource> {
        let mut named = Vec::with_capacity(sources.len());
        for source in sources {
            let Some((name, id)) = self
                .naming
                .table_for(&source.path)
                .and_then(|name| name.to_id().map(|id| (name, id)))
            else {
                log::warn!("skipping {}: no table name", source.path.display());
                summary.skipped.push(SkippedFile {
                    path: source.path,
                    reason: SkipReason::Unnamed,
                });
                continue;
            };
            named.push(NamedSource { source, name, id });
        }
        named
    }

    fn scan_file(
        &self,
        file: &NamedSource,
        catalog: &ModelCatalog,
        graph: &mut LineageGraph,
        summary: &mut ScanSummary,
    ) -> FileLineage {
        let scanned = self.scanner.scan(&file.source.sql);
        for warning in scanned.warnings {
            log::warn!("{}: {}", file.source.path.display(), warning);
            summary.warnings.push(FileWarning {
                path: file.source.path.clone(),
                warning,
            });
        }

        let mut ctes = BTreeSet::new();
        let mut upstream = BTreeSet::new();
        for statement in &scanned.statements {
            ctes.extend(statement.ctes.iter().map(str::to_string));

            for reference in &statement.references {
                let resolution = resolve_reference(reference, &statement.ctes, catalog);
                let id = match &resolution {
                    Resolution::Cte => {
                        log::debug!("{}: '{}' is a CTE", file.id, reference.display());
                        continue;
                    }
                    Resolution::Model { id } | Resolution::External { id } => id,
                };
                if id.as_str() == file.id.as_str() {
                    log::debug!("{}: ignoring self-reference", file.id);
                    continue;
                }
                let Some(table_id) = TableId::try_new(id.as_str()) else {
                    continue;
                };
                graph.add_source(table_id.clone(), &reference.display());
                graph.add_dependency(&table_id, &file.id);
                upstream.insert(table_id);
            }
        }

        FileLineage {
            path: file.source.path.clone(),
            table: file.id.clone(),
            ctes: ctes.into_iter().collect(),
            upstream: upstream.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
