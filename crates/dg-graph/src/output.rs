//! The built graph and its renderings

use dg_core::{GraphEdge, GraphNode, NodeId, NodeKind};
use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// `{nodes, edges}` as handed to a graph renderer.
///
/// Nodes keep first-discovered order; edges carry no ordering guarantee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub nodes: IndexMap<NodeId, GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl DependencyGraph {
    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Convert to a petgraph graph, with edge weights set to edge labels.
    ///
    /// Returns the graph and a map from node id to graph index.
    pub fn to_digraph(&self) -> (DiGraph<NodeId, Option<String>>, HashMap<NodeId, NodeIndex>) {
        let mut graph = DiGraph::new();
        let mut index_of = HashMap::new();

        for id in self.nodes.keys() {
            index_of.insert(id.clone(), graph.add_node(id.clone()));
        }
        for edge in &self.edges {
            let from = index_of.get(&edge.source);
            let to = index_of.get(&edge.target);
            if let (Some(&from), Some(&to)) = (from, to) {
                graph.add_edge(from, to, edge.label.clone());
            }
        }

        (graph, index_of)
    }

    /// Node ids that cannot be reached from any of `seeds` along edges.
    ///
    /// Every edge is mirrored in its source's `target_ids`, so this is also
    /// reachability over `target_ids`.
    pub fn unreachable_from(&self, seeds: &[NodeId]) -> Vec<NodeId> {
        let (graph, index_of) = self.to_digraph();

        let mut reached: HashSet<NodeIndex> = HashSet::new();
        for seed in seeds {
            let Some(&start) = index_of.get(seed) else {
                continue;
            };
            if reached.contains(&start) {
                continue;
            }
            let mut bfs = Bfs::new(&graph, start);
            while let Some(idx) = bfs.next(&graph) {
                reached.insert(idx);
            }
        }

        self.nodes
            .keys()
            .filter(|id| !reached.contains(&index_of[*id]))
            .cloned()
            .collect()
    }

    /// `(source, target, label)` triples, sorted; identical for two builds
    /// over the same input regardless of edge ids and order.
    pub fn edge_signature(&self) -> Vec<(String, String, Option<String>)> {
        let mut signature: Vec<_> = self
            .edges
            .iter()
            .map(|e| (e.source.to_string(), e.target.to_string(), e.label.clone()))
            .collect();
        signature.sort();
        signature
    }

    /// Render as a Graphviz DOT digraph
    pub fn to_dot(&self) -> String {
        let mut dot =
            String::from("digraph dependencies {\n  rankdir=LR;\n  node [shape=box];\n\n");

        for node in self.nodes.values() {
            let (label, attrs) = match node.kind {
                NodeKind::External => (
                    format!("{}\\n{}", node.category, node.namespace),
                    ", shape=ellipse, style=dashed",
                ),
                NodeKind::Internal if node.is_missing() => (
                    format!("{}.{}\\n(not found)", node.namespace, node.name),
                    ", style=dotted",
                ),
                NodeKind::Internal => (
                    format!("{}.{}\\n{}", node.namespace, node.name, node.category),
                    "",
                ),
            };
            dot.push_str(&format!(
                "  \"{}\" [label=\"{}\"{}];\n",
                escape(&node.id),
                escape(&label),
                attrs
            ));
        }

        dot.push('\n');

        for edge in &self.edges {
            match edge.label.as_deref() {
                Some(label) if !label.is_empty() => dot.push_str(&format!(
                    "  \"{}\" -> \"{}\" [label=\"{}\"];\n",
                    escape(&edge.source),
                    escape(&edge.target),
                    escape(label)
                )),
                _ => dot.push_str(&format!(
                    "  \"{}\" -> \"{}\";\n",
                    escape(&edge.source),
                    escape(&edge.target)
                )),
            }
        }

        dot.push_str("}\n");
        dot
    }
}

/// Escape double quotes for DOT string literals; `\n` sequences are kept.
fn escape(s: &str) -> String {
    s.replace('"', "\\\"")
}

#[cfg(test)]
#[path = "output_test.rs"]
mod tests;
