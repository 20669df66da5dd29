//! Node, edge, and dependency descriptor types of the dependency graph.
//!
//! These types are the contract with the graph-rendering side: they
//! serialize to camel-case JSON as `{nodes, edges}`.

use crate::external::external_node_id;
use crate::node_id::NodeId;
use crate::row::CatalogRow;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// DDL text placed on nodes whose catalog row could not be found.
pub const NOT_FOUND: &str = "NOT FOUND";

/// Well-known edge labels.
pub mod labels {
    /// A materialized view writes into its sink table
    pub const SINK_TO: &str = "Sink To";
    /// Inserts into a table are pushed to a materialized view
    pub const PUSH_TO: &str = "Push To";
    /// A view or materialized view reads from a table
    pub const SELECT_FROM: &str = "Select From";
    /// A dictionary loads its content from a remote table
    pub const LOAD_FROM: &str = "Load From";
}

/// Whether a node is backed by a catalog row or is a synthetic external system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Backed by a catalog row (or a missing one)
    Internal,
    /// A system outside the catalog: broker, remote server, HTTP endpoint
    External,
}

/// A node of the dependency graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Engine name for internal nodes, system type for external nodes
    pub category: String,
    /// Database for internal nodes, system address for external nodes
    pub namespace: String,
    /// Object name; always empty for external nodes
    pub name: String,
    pub ddl_text: String,
    /// Targets of this node's outgoing edges, one entry per edge
    pub target_ids: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<NaiveDateTime>,
}

impl GraphNode {
    /// Node for an existing catalog row.
    pub fn from_row(row: &CatalogRow) -> Self {
        Self {
            id: row.id(),
            kind: NodeKind::Internal,
            category: row.engine.clone(),
            namespace: row.database.clone(),
            name: row.name.clone(),
            ddl_text: row.ddl_text.clone(),
            target_ids: Vec::new(),
            last_modified: row.last_modified,
        }
    }

    /// Node for an internal reference whose row is absent from the catalog.
    pub fn missing(database: &str, name: &str) -> Self {
        Self {
            id: NodeId::qualified(database, name),
            kind: NodeKind::Internal,
            category: String::new(),
            namespace: database.to_string(),
            name: name.to_string(),
            ddl_text: NOT_FOUND.to_string(),
            target_ids: Vec::new(),
            last_modified: None,
        }
    }

    /// Node for an external system.
    pub fn external(namespace: &str, category: &str) -> Self {
        Self {
            id: external_node_id(namespace, category),
            kind: NodeKind::External,
            category: category.to_string(),
            namespace: namespace.to_string(),
            name: String::new(),
            ddl_text: String::new(),
            target_ids: Vec::new(),
            last_modified: None,
        }
    }

    /// Whether this node stands in for a row missing from the catalog.
    pub fn is_missing(&self) -> bool {
        self.kind == NodeKind::Internal && self.ddl_text == NOT_FOUND
    }
}

/// A directed, optionally labelled edge. Edges are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Normalized dependency produced from either the structured columns or
/// the DDL text of a catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyDescriptor {
    pub kind: NodeKind,
    /// System type for external descriptors; empty for internal ones
    pub category: String,
    /// Target database, or external system address
    pub namespace: String,
    /// Target object name, or the remote object an external system serves
    pub name: String,
    /// Explicit edge label; wins over label inference when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_label: Option<String>,
}

impl DependencyDescriptor {
    /// Dependency on the catalog object `database.name`.
    pub fn internal(database: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Internal,
            category: String::new(),
            namespace: database.into(),
            name: name.into(),
            edge_label: None,
        }
    }

    /// Dependency on an external system at `namespace`.
    pub fn external(category: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::External,
            category: category.into(),
            namespace: namespace.into(),
            name: String::new(),
            edge_label: None,
        }
    }

    /// Builder-style setter for the remote object name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder-style setter for the explicit edge label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.edge_label = Some(label.into());
        self
    }

    /// Id of the node this descriptor points at.
    pub fn target_id(&self) -> NodeId {
        match self.kind {
            NodeKind::Internal => NodeId::qualified(&self.namespace, &self.name),
            NodeKind::External => external_node_id(&self.namespace, &self.category),
        }
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
