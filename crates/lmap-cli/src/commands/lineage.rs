//! Lineage command implementation: table-level lineage across SQL files

use anyhow::{Context, Result};
use lmap_core::{to_markdown, GraphPayload, LineageDirection, LineageGraph, TableId};
use std::path::{Path, PathBuf};

use crate::cli::{GlobalArgs, LineageArgs, LineageDirectionArg, LineageFormat};
use crate::commands::common::{self, CHECKMARK};

/// Execute the lineage command
pub async fn execute(args: &LineageArgs, global: &GlobalArgs) -> Result<()> {
    let workspace = common::load_workspace(
        global,
        args.sql_dir.as_deref(),
        args.output_dir.as_deref(),
    )?;
    let result = common::scan(&workspace, args.dialect.as_deref()).await?;

    // Artifacts always describe the whole graph; --model narrows stdout only.
    if !args.no_write {
        let payload = GraphPayload::from_graph(&result.graph);
        let mut written = write_artifacts(&payload, &workspace.output_dir).await?;
        if let Some(ui_dir) = &workspace.ui_dir {
            written.extend(copy_to_ui(&workspace.output_dir, ui_dir).await?);
        }
        for path in &written {
            if args.format.is_some() {
                eprintln!("  {CHECKMARK} {}", path.display());
            } else {
                println!("  {CHECKMARK} {}", path.display());
            }
        }
    }

    if let Some(format) = args.format {
        let graph = match &args.model {
            Some(model) => {
                let id = TableId::canonical(model)
                    .with_context(|| format!("invalid table name '{model}'"))?;
                result
                    .graph
                    .neighbourhood(id.as_str(), direction(args.direction))
                    .context("failed to select lineage")?
            }
            None => result.graph,
        };
        print_graph(&graph, format)?;
    }

    common::print_summary(&result.summary);
    common::check_skips(&result.summary, args.fail_on_skip)
}

fn direction(arg: LineageDirectionArg) -> LineageDirection {
    match arg {
        LineageDirectionArg::Upstream => LineageDirection::Upstream,
        LineageDirectionArg::Downstream => LineageDirection::Downstream,
        LineageDirectionArg::Both => LineageDirection::Both,
    }
}

/// Write lineage.md and lineage.json into `output_dir`
async fn write_artifacts(
    payload: &GraphPayload,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let markdown_path = output_dir.join("lineage.md");
    tokio::fs::write(&markdown_path, to_markdown(&payload.to_mermaid()))
        .await
        .with_context(|| format!("failed to write {}", markdown_path.display()))?;

    let json_path = output_dir.join("lineage.json");
    tokio::fs::write(&json_path, payload.to_json()?)
        .await
        .with_context(|| format!("failed to write {}", json_path.display()))?;

    Ok(vec![markdown_path, json_path])
}

/// Copy lineage.json next to the UI assets
async fn copy_to_ui(output_dir: &Path, ui_dir: &Path) -> Result<Vec<PathBuf>> {
    if ui_dir == output_dir {
        return Ok(Vec::new());
    }
    tokio::fs::create_dir_all(ui_dir)
        .await
        .with_context(|| format!("failed to create {}", ui_dir.display()))?;
    let target = ui_dir.join("lineage.json");
    tokio::fs::copy(output_dir.join("lineage.json"), &target)
        .await
        .with_context(|| format!("failed to write {}", target.display()))?;
    Ok(vec![target])
}

fn print_graph(graph: &LineageGraph, format: LineageFormat) -> Result<()> {
    let payload = GraphPayload::from_graph(graph);
    match format {
        LineageFormat::Mermaid => println!("{}", payload.to_mermaid()),
        LineageFormat::Json => println!("{}", payload.to_json()?),
        LineageFormat::Dot => print!("{}", payload.to_dot()),
        LineageFormat::Table => print_table(graph),
    }
    Ok(())
}

/// Print lineage as a human-readable table
fn print_table(graph: &LineageGraph) {
    if graph.is_empty() {
        println!("No tables found.");
        return;
    }

    println!(
        "{:<40} {:<8} {:>8} {:>10}",
        "TABLE", "KIND", "READS", "READ BY"
    );
    println!("{}", "-".repeat(69));

    for node in graph.nodes() {
        println!(
            "{:<40} {:<8} {:>8} {:>10}",
            node.id.as_str(),
            node.kind.to_string(),
            graph.direct_upstream(node.id.as_str()).len(),
            graph.direct_downstream(node.id.as_str()).len(),
        );
    }

    println!(
        "\n{} table(s), {} dependency edge(s).",
        graph.node_count(),
        graph.edge_count()
    );
}
