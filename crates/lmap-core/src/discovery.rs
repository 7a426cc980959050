//! SQL file discovery

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Files found under a SQL folder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredFiles {
    /// `*.sql` paths relative to the root, sorted
    pub files: Vec<PathBuf>,
    /// Directories that could not be listed
    pub unreadable: Vec<UnreadableDir>,
}

/// A directory skipped during discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableDir {
    /// Path relative to the root
    pub path: PathBuf,
    pub reason: String,
}

/// Recursively collect `*.sql` files (extension matched case-insensitively).
///
/// `exclude` entries are paths relative to `root`; a matching directory is
/// not descended into. Hidden directories (`.git`, `.venv`...) are skipped.
/// Only a missing or unlistable root is an error; unreadable subdirectories
/// are reported in [`DiscoveredFiles::unreadable`].
pub fn discover_sql_files(root: &Path, exclude: &[String]) -> CoreResult<DiscoveredFiles> {
    if !root.is_dir() {
        return Err(CoreError::SqlFolderNotFound {
            path: root.display().to_string(),
        });
    }

    let excluded: Vec<String> = exclude.iter().map(|e| normalize(e)).collect();
    let mut found = DiscoveredFiles::default();

    let entries = std::fs::read_dir(root).map_err(|e| CoreError::IoWithPath {
        path: root.display().to_string(),
        source: e,
    })?;
    walk(root, Path::new(""), entries, &excluded, &mut found);

    found.files.sort();
    found.unreadable.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(found)
}

fn walk(
    root: &Path,
    relative_dir: &Path,
    entries: std::fs::ReadDir,
    excluded: &[String],
    found: &mut DiscoveredFiles,
) {
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                found.unreadable.push(UnreadableDir {
                    path: relative_dir.to_path_buf(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let relative = relative_dir.join(entry.file_name());
        if is_excluded(&relative, excluded) {
            log::debug!("excluded {}", relative.display());
            continue;
        }
        let path = root.join(&relative);

        if path.is_dir() {
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            match std::fs::read_dir(&path) {
                Ok(children) => walk(root, &relative, children, excluded, found),
                Err(e) => {
                    log::warn!("cannot read directory {}: {}", path.display(), e);
                    found.unreadable.push(UnreadableDir {
                        path: relative,
                        reason: e.to_string(),
                    });
                }
            }
        } else if is_sql_file(&path) {
            found.files.push(relative);
        }
    }
}

fn is_sql_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("sql"))
}

fn is_excluded(relative: &Path, excluded: &[String]) -> bool {
    let key = normalize(&relative.to_string_lossy());
    excluded
        .iter()
        .any(|e| key == *e || key.starts_with(&format!("{e}/")))
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/")
        .trim_start_matches("./")
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;
