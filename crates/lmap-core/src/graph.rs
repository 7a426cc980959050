//! Lineage graph: tables as nodes, read-by relationships as edges
//!
//! An edge `a -> b` means the file producing `b` reads from `a`. Self-loops
//! and duplicate edges are never stored. A node's kind only ever moves from
//! [`NodeKind::Source`] to [`NodeKind::Model`].

use crate::error::{CoreError, CoreResult};
use crate::table_id::TableId;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, EdgeRef, Reversed};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Whether a table is produced by a scanned file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Never produced by a scanned file
    Source,
    /// Produced by at least one scanned file
    Model,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Source => f.write_str("source"),
            NodeKind::Model => f.write_str("model"),
        }
    }
}

/// A table in the lineage graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableNode {
    pub id: TableId,
    /// Name as first encountered
    pub display_name: String,
    pub kind: NodeKind,
}

/// Which side of a table to follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineageDirection {
    /// Tables it reads from, transitively
    Upstream,
    /// Tables that read from it, transitively
    Downstream,
    Both,
}

/// Table-level lineage graph
#[derive(Debug, Default)]
pub struct LineageGraph {
    graph: DiGraph<TableNode, ()>,
    node_map: HashMap<TableId, NodeIndex>,
}

impl LineageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a table produced by a scanned file (promoting an existing source)
    pub fn add_model(&mut self, id: TableId, display_name: &str) -> NodeIndex {
        self.add_table(id, display_name, NodeKind::Model)
    }

    /// Insert a referenced table; an existing node keeps its kind
    pub fn add_source(&mut self, id: TableId, display_name: &str) -> NodeIndex {
        self.add_table(id, display_name, NodeKind::Source)
    }

    fn add_table(&mut self, id: TableId, display_name: &str, kind: NodeKind) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&id) {
            if kind == NodeKind::Model {
                self.graph[idx].kind = NodeKind::Model;
            }
            return idx;
        }
        let display_name = if display_name.is_empty() {
            id.to_string()
        } else {
            display_name.to_string()
        };
        let idx = self.graph.add_node(TableNode {
            id: id.clone(),
            display_name,
            kind,
        });
        self.node_map.insert(id, idx);
        idx
    }

    /// Add an edge `from -> to` (to reads from).
    ///
    /// Returns false, storing nothing, when the ids are equal, either node is
    /// unknown, or the edge already exists.
    pub fn add_dependency(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return false;
        }
        let (Some(&from_idx), Some(&to_idx)) = (self.node_map.get(from), self.node_map.get(to))
        else {
            return false;
        };
        if self.graph.find_edge(from_idx, to_idx).is_some() {
            return false;
        }
        self.graph.add_edge(from_idx, to_idx, ());
        true
    }

    /// Promote every node with an incoming edge to a model.
    ///
    /// Returns how many nodes changed kind.
    pub fn promote_targets(&mut self) -> usize {
        let targets: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&idx| {
                self.graph[idx].kind == NodeKind::Source
                    && self
                        .graph
                        .neighbors_directed(idx, Direction::Incoming)
                        .next()
                        .is_some()
            })
            .collect();
        for &idx in &targets {
            self.graph[idx].kind = NodeKind::Model;
        }
        targets.len()
    }

    pub fn node(&self, id: &str) -> Option<&TableNode> {
        self.node_map.get(id).map(|&idx| &self.graph[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// All nodes, sorted by id
    pub fn nodes(&self) -> Vec<&TableNode> {
        let mut nodes: Vec<&TableNode> = self.graph.node_weights().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes
    }

    /// All edges as `(source, target)`, sorted
    pub fn edges(&self) -> Vec<(&TableId, &TableId)> {
        let mut edges: Vec<(&TableId, &TableId)> = self
            .graph
            .edge_references()
            .map(|e| (&self.graph[e.source()].id, &self.graph[e.target()].id))
            .collect();
        edges.sort();
        edges
    }

    /// Nodes with no edges at all, sorted by id
    pub fn isolated(&self) -> Vec<&TableNode> {
        let mut nodes: Vec<&TableNode> = self
            .graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors_undirected(idx).next().is_none())
            .map(|idx| &self.graph[idx])
            .collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes
    }

    /// Tables `id` reads from directly, sorted
    pub fn direct_upstream(&self, id: &str) -> Vec<&TableId> {
        self.direct(id, Direction::Incoming)
    }

    /// Tables reading from `id` directly, sorted
    pub fn direct_downstream(&self, id: &str) -> Vec<&TableId> {
        self.direct(id, Direction::Outgoing)
    }

    fn direct(&self, id: &str, direction: Direction) -> Vec<&TableId> {
        let Some(&idx) = self.node_map.get(id) else {
            return Vec::new();
        };
        let mut ids: Vec<&TableId> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| &self.graph[n].id)
            .collect();
        ids.sort();
        ids
    }

    /// All tables `id` depends on, transitively, sorted
    pub fn upstream(&self, id: &str) -> CoreResult<Vec<TableId>> {
        let start = self.index_of(id)?;
        Ok(self.ids_of(self.reachable(start, Direction::Incoming)))
    }

    /// All tables depending on `id`, transitively, sorted
    pub fn downstream(&self, id: &str) -> CoreResult<Vec<TableId>> {
        let start = self.index_of(id)?;
        Ok(self.ids_of(self.reachable(start, Direction::Outgoing)))
    }

    /// Subgraph of `id` plus its upstream and/or downstream tables.
    ///
    /// Kinds and display names are carried over from this graph.
    pub fn neighbourhood(&self, id: &str, direction: LineageDirection) -> CoreResult<Self> {
        let start = self.index_of(id)?;
        let mut keep: BTreeSet<NodeIndex> = BTreeSet::from([start]);
        if matches!(direction, LineageDirection::Upstream | LineageDirection::Both) {
            keep.extend(self.reachable(start, Direction::Incoming));
        }
        if matches!(direction, LineageDirection::Downstream | LineageDirection::Both) {
            keep.extend(self.reachable(start, Direction::Outgoing));
        }

        let mut sub = Self::new();
        for &idx in &keep {
            let node = &self.graph[idx];
            sub.add_table(node.id.clone(), &node.display_name, node.kind);
        }
        for edge in self.graph.edge_references() {
            if keep.contains(&edge.source()) && keep.contains(&edge.target()) {
                sub.add_dependency(&self.graph[edge.source()].id, &self.graph[edge.target()].id);
            }
        }
        Ok(sub)
    }

    /// Groups of tables that depend on each other in a loop.
    ///
    /// Each group is sorted, and groups are sorted by their first id.
    pub fn cycles(&self) -> Vec<Vec<TableId>> {
        let mut cycles: Vec<Vec<TableId>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|component| {
                let mut ids: Vec<TableId> = component
                    .into_iter()
                    .map(|idx| self.graph[idx].id.clone())
                    .collect();
                ids.sort();
                ids
            })
            .collect();
        cycles.sort();
        cycles
    }

    fn index_of(&self, id: &str) -> CoreResult<NodeIndex> {
        self.node_map
            .get(id)
            .copied()
            .ok_or_else(|| CoreError::TableNotFound { id: id.to_string() })
    }

    /// Nodes reachable from `start` (excluding it) following `direction`
    fn reachable(&self, start: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
        let mut found = Vec::new();
        match direction {
            Direction::Outgoing => {
                let mut bfs = Bfs::new(&self.graph, start);
                while let Some(idx) = bfs.next(&self.graph) {
                    found.push(idx);
                }
            }
            Direction::Incoming => {
                let reversed = Reversed(&self.graph);
                let mut bfs = Bfs::new(reversed, start);
                while let Some(idx) = bfs.next(reversed) {
                    found.push(idx);
                }
            }
        }
        found.retain(|&idx| idx != start);
        found
    }

    fn ids_of(&self, indices: Vec<NodeIndex>) -> Vec<TableId> {
        let mut ids: Vec<TableId> = indices
            .into_iter()
            .map(|idx| self.graph[idx].id.clone())
            .collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
