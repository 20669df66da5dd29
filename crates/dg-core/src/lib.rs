//! dg-core - Core library for ddlgraph
//!
//! This crate provides the catalog row model, graph node/edge types, the
//! catalog index used to resolve dependency targets, external node identity,
//! and configuration parsing shared by all ddlgraph components.

pub mod catalog;
pub mod checksum;
pub mod config;
pub mod error;
pub mod external;
pub mod graph;
pub mod node_id;
pub mod row;
pub(crate) mod serde_helpers;

pub use catalog::{load_catalog, CatalogIndex, CATALOG_QUERY};
pub use checksum::compute_checksum;
pub use config::{Config, OutputFormat};
pub use error::CoreError;
pub use external::external_node_id;
pub use graph::{labels, DependencyDescriptor, GraphEdge, GraphNode, NodeKind, NOT_FOUND};
pub use node_id::NodeId;
pub use row::{CatalogRow, DependencyList};
