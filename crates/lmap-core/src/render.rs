//! Lineage serializers: JSON payload, Mermaid flowchart, Graphviz DOT
//!
//! Every text format is rendered from a [`GraphPayload`], so the diagram and
//! the JSON always describe the same node and edge sets in the same order.

use crate::error::CoreResult;
use crate::graph::{LineageGraph, NodeKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const COLOR_SOURCE: &str = "#d3d3d3";
const COLOR_MODEL: &str = "#a8e6a1";

/// Node/edge payload consumed by visualization front-ends
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphPayload {
    /// Sorted by id
    pub nodes: Vec<PayloadNode>,
    /// Sorted by (source, target)
    pub edges: Vec<PayloadEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PayloadEdge {
    pub source: String,
    pub target: String,
}

impl GraphPayload {
    pub fn from_graph(graph: &LineageGraph) -> Self {
        let nodes = graph
            .nodes()
            .into_iter()
            .map(|node| PayloadNode {
                id: node.id.to_string(),
                name: node.display_name.clone(),
                kind: node.kind,
            })
            .collect();
        let edges = graph
            .edges()
            .into_iter()
            .map(|(source, target)| PayloadEdge {
                source: source.to_string(),
                target: target.to_string(),
            })
            .collect();
        Self { nodes, edges }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Nodes that appear in no edge, in node order
    pub fn isolated_nodes(&self) -> impl Iterator<Item = &PayloadNode> {
        let connected: BTreeSet<&str> = self
            .edges
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();
        self.nodes
            .iter()
            .filter(move |n| !connected.contains(n.id.as_str()))
    }

    /// Mermaid flowchart: one `source-->target` line per edge, then one line
    /// per isolated node
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("flowchart TD");
        for edge in &self.edges {
            out.push_str(&format!(
                "\n    {}-->{}",
                mermaid_id(&edge.source),
                mermaid_id(&edge.target)
            ));
        }
        for node in self.isolated_nodes() {
            out.push_str(&format!("\n    {}", mermaid_id(&node.id)));
        }
        out
    }

    /// Graphviz digraph with sources grey and models green
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        dot.push_str("digraph lineage {\n");
        dot.push_str("    rankdir=LR;\n");
        dot.push_str("    node [shape=box, style=filled];\n\n");

        for node in &self.nodes {
            let color = match node.kind {
                NodeKind::Source => COLOR_SOURCE,
                NodeKind::Model => COLOR_MODEL,
            };
            dot.push_str(&format!(
                "    \"{}\" [label=\"{}\" fillcolor=\"{}\"];\n",
                dot_escape(&node.id),
                dot_escape(&node.name),
                color
            ));
        }

        if !self.edges.is_empty() {
            dot.push('\n');
        }
        for edge in &self.edges {
            dot.push_str(&format!(
                "    \"{}\" -> \"{}\";\n",
                dot_escape(&edge.source),
                dot_escape(&edge.target)
            ));
        }

        dot.push_str("}\n");
        dot
    }
}

/// Wrap Mermaid text in a fenced markdown block
pub fn to_markdown(mermaid: &str) -> String {
    format!("```mermaid\n{mermaid}\n```\n")
}

/// Words the flowchart grammar reserves; a bare node with one of these names
/// breaks the diagram
const MERMAID_KEYWORDS: &[&str] = &[
    "end",
    "graph",
    "flowchart",
    "subgraph",
    "style",
    "classdef",
    "class",
    "click",
    "linkstyle",
    "direction",
    "default",
];

/// Bare ids may only use `[A-Za-z0-9_.:]`; anything else is double-quoted.
///
/// Reserved words are quoted too, and so are ids starting with `o` or `x`,
/// which right after an arrow read as a circle or cross edge head.
pub fn mermaid_id(id: &str) -> String {
    let bare = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':'))
        && !id.starts_with(['o', 'O', 'x', 'X'])
        && !MERMAID_KEYWORDS
            .iter()
            .any(|keyword| keyword.eq_ignore_ascii_case(id));
    if bare {
        id.to_string()
    } else {
        format!("\"{}\"", id.replace('"', "#quot;"))
    }
}

fn dot_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
