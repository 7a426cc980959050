//! Parse command implementation

use anyhow::{Context, Result};
use lmap_lineage::FileLineage;

use crate::cli::{GlobalArgs, ParseArgs, ParseOutput};
use crate::commands::common;

/// Execute the parse command
pub async fn execute(args: &ParseArgs, global: &GlobalArgs) -> Result<()> {
    let workspace = common::load_workspace(global, args.sql_dir.as_deref(), None)?;
    let result = common::scan(&workspace, args.dialect.as_deref()).await?;

    if global.verbose {
        eprintln!("[verbose] Parsed {} SQL files", result.files.len());
    }

    match args.output {
        ParseOutput::Json => {
            let json = serde_json::to_string_pretty(&result.files)
                .context("Failed to serialize to JSON")?;
            println!("{}", json);
        }
        ParseOutput::Deps => {
            for file in &result.files {
                print_deps(file);
            }
        }
    }

    common::print_summary(&result.summary);
    for warning in &result.summary.warnings {
        eprintln!("  [warn] {}: {}", warning.path.display(), warning.warning);
    }
    Ok(())
}

fn print_deps(file: &FileLineage) {
    println!("{} -> {}", file.path.display(), file.table);
    if !file.ctes.is_empty() {
        println!("  ctes: {}", file.ctes.join(", "));
    }
    if file.upstream.is_empty() {
        println!("  reads: (none)");
    } else {
        let reads: Vec<&str> = file.upstream.iter().map(|id| id.as_str()).collect();
        println!("  reads: {}", reads.join(", "));
    }
}
