//! Shared utilities for CLI commands

use anyhow::{bail, Context, Result};
use futures::future::join_all;
use lmap_core::config::CONFIG_FILE_NAMES;
use lmap_core::{discover_sql_files, Config, StemNaming};
use lmap_lineage::{
    decode_source, LineageBuilder, LineageError, ScanResult, ScanSummary, SkippedFile, SqlSource,
};
use lmap_sql::SqlScanner;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Checkmark printed next to written files
pub(crate) const CHECKMARK: char = '\u{2713}';

/// Error type representing a non-zero process exit code.
///
/// Return `Err(ExitCode(N).into())` so that destructors run before `main`
/// exits with the code.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; nothing user-facing to print.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Resolved config plus the absolute paths a command works with
#[derive(Debug)]
pub(crate) struct Workspace {
    pub(crate) config: Config,
    pub(crate) sql_dir: PathBuf,
    pub(crate) output_dir: PathBuf,
    pub(crate) ui_dir: Option<PathBuf>,
}

/// Load the config and apply command-line path overrides.
///
/// Lookup order: `--config`, then lineage.yml / lineage.yaml in the current
/// directory, then a default config when `--sql-dir` is given. Paths from the
/// config resolve against its directory; overrides resolve against the
/// current directory.
pub(crate) fn load_workspace(
    global: &GlobalArgs,
    sql_dir: Option<&str>,
    output_dir: Option<&str>,
) -> Result<Workspace> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;

    let (config, root) = if let Some(path) = &global.config {
        let path = Path::new(path);
        let config = Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => cwd.join(parent),
            _ => cwd.clone(),
        };
        (config, root)
    } else if CONFIG_FILE_NAMES.iter().any(|name| cwd.join(name).exists()) {
        let config = Config::load_from_dir(&cwd).context("failed to load config")?;
        (config, cwd.clone())
    } else if let Some(dir) = sql_dir {
        (Config::new(dir), cwd.clone())
    } else {
        bail!("no lineage.yml in the current directory; pass --config or --sql-dir");
    };

    let sql_dir = match sql_dir {
        Some(dir) => cwd.join(dir),
        None => config.sql_folder_absolute(&root),
    };
    let output_dir = match output_dir {
        Some(dir) => cwd.join(dir),
        None => config.output_dir_absolute(&root),
    };
    let ui_dir = config.ui_dir_absolute(&root);

    Ok(Workspace {
        config,
        sql_dir,
        output_dir,
        ui_dir,
    })
}

/// Read files concurrently; each result keeps its relative path
pub(crate) async fn read_sources(
    root: &Path,
    files: &[PathBuf],
) -> Vec<Result<SqlSource, LineageError>> {
    let reads = files.iter().map(|relative| async move {
        match tokio::fs::read(root.join(relative)).await {
            Ok(bytes) => decode_source(relative, bytes),
            Err(source) => Err(LineageError::Io {
                path: relative.clone(),
                source,
            }),
        }
    });
    join_all(reads).await
}

/// Discover, read and build the lineage graph for a workspace
pub(crate) async fn scan(workspace: &Workspace, dialect: Option<&str>) -> Result<ScanResult> {
    let builder = match dialect {
        Some(name) => {
            let scanner = SqlScanner::from_dialect_name(name).context("invalid --dialect")?;
            LineageBuilder::new(scanner, StemNaming::from_config(&workspace.config))
        }
        None => LineageBuilder::from_config(&workspace.config).context("invalid dialect")?,
    };

    let discovered = discover_sql_files(&workspace.sql_dir, &workspace.config.exclude_paths)
        .with_context(|| format!("failed to scan {}", workspace.sql_dir.display()))?;
    log::debug!(
        "found {} SQL files in {}",
        discovered.files.len(),
        workspace.sql_dir.display()
    );
    if discovered.files.is_empty() {
        log::warn!(
            "no SQL files found in {}; check sql_folder_path",
            workspace.sql_dir.display()
        );
    }

    let inputs = read_sources(&workspace.sql_dir, &discovered.files).await;
    let mut result = builder.build(inputs);
    result
        .summary
        .skipped
        .extend(discovered.unreadable.into_iter().map(SkippedFile::from));
    Ok(result)
}

/// Print the scan summary and any skipped files to stderr
pub(crate) fn print_summary(summary: &ScanSummary) {
    eprintln!("{summary}");
    for skipped in &summary.skipped {
        eprintln!("  skipped {}: {}", skipped.path.display(), skipped.reason);
    }
}

/// Fail with exit code 1 after output when files were skipped and the user asked
pub(crate) fn check_skips(summary: &ScanSummary, fail_on_skip: bool) -> Result<()> {
    if fail_on_skip && summary.has_skips() {
        return Err(ExitCode(1).into());
    }
    Ok(())
}
