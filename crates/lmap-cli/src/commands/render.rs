//! Render command implementation: Mermaid markdown to the JSON payload

use anyhow::{Context, Result};
use lmap_core::mermaid::read_markdown;
use std::path::Path;

use crate::cli::RenderArgs;

/// Execute the render command
pub async fn execute(args: &RenderArgs) -> Result<()> {
    let input = Path::new(&args.input);
    let payload = read_markdown(input)
        .with_context(|| format!("failed to read lineage from {}", input.display()))?;
    let json = payload.to_json()?;

    match &args.output {
        Some(output) => {
            tokio::fs::write(output, &json)
                .await
                .with_context(|| format!("failed to write {output}"))?;
            log::info!(
                "wrote {} nodes and {} edges to {output}",
                payload.nodes.len(),
                payload.edges.len()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
