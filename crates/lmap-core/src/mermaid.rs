//! Mermaid flowchart reader
//!
//! Reads a lineage diagram back from markdown (as written by
//! [`to_markdown`](crate::render::to_markdown) or edited by hand) into a
//! [`GraphPayload`]. Node kinds are inferred: edge targets are models.

use crate::error::{CoreError, CoreResult};
use crate::graph::NodeKind;
use crate::render::{GraphPayload, PayloadEdge, PayloadNode};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::OnceLock;

const ID: &str = r#"(?:"([^"]+)"|([A-Za-z0-9_.:]+))"#;

fn edge_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^\s*{id}\s*-->\s*{id}\s*;?\s*$", id = ID)).expect("valid regex")
    })
}

fn node_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^\s*{id}\s*;?\s*$", id = ID)).expect("valid regex"))
}

/// Body of the first ```` ```mermaid ```` fenced block, if any
pub fn extract_mermaid_block(markdown: &str) -> Option<&str> {
    let start = markdown.find("```mermaid")?;
    let body_start = start + markdown[start..].find('\n')? + 1;
    let body_end = markdown[body_start..]
        .find("```")
        .map_or(markdown.len(), |p| body_start + p);
    Some(&markdown[body_start..body_end])
}

/// Parse flowchart text into a payload.
///
/// The `flowchart`/`graph` header, comments (`%%`) and lines that are
/// neither an edge nor a bare node are ignored.
pub fn parse_flowchart(text: &str) -> GraphPayload {
    let mut kinds: BTreeMap<String, NodeKind> = BTreeMap::new();
    let mut edges: BTreeSet<PayloadEdge> = BTreeSet::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.starts_with("%%")
            || matches!(trimmed.split_whitespace().next(), Some("flowchart" | "graph"))
        {
            continue;
        }

        if let Some(caps) = edge_re().captures(trimmed) {
            let source = caps.get(1).or_else(|| caps.get(2));
            let target = caps.get(3).or_else(|| caps.get(4));
            if let (Some(source), Some(target)) = (source, target) {
                let (source, target) = (unescape(source.as_str()), unescape(target.as_str()));
                if source == target {
                    continue;
                }
                kinds.entry(source.clone()).or_insert(NodeKind::Source);
                kinds.insert(target.clone(), NodeKind::Model);
                edges.insert(PayloadEdge { source, target });
            }
        } else if let Some(caps) = node_re().captures(trimmed) {
            if let Some(id) = caps.get(1).or_else(|| caps.get(2)) {
                kinds.entry(unescape(id.as_str())).or_insert(NodeKind::Model);
            }
        } else {
            log::debug!("ignoring mermaid line: {}", trimmed);
        }
    }

    GraphPayload {
        nodes: kinds
            .into_iter()
            .map(|(id, kind)| PayloadNode {
                name: id.clone(),
                id,
                kind,
            })
            .collect(),
        edges: edges.into_iter().collect(),
    }
}

fn unescape(id: &str) -> String {
    id.replace("#quot;", "\"")
}

/// Read a markdown file and parse its Mermaid block
pub fn read_markdown(path: &Path) -> CoreResult<GraphPayload> {
    let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })?;
    let block = extract_mermaid_block(&content).ok_or_else(|| CoreError::MermaidNotFound {
        path: path.display().to_string(),
    })?;
    Ok(parse_flowchart(block))
}

#[cfg(test)]
#[path = "mermaid_test.rs"]
mod tests;
