//! dg-graph - Dependency graph builder for ddlgraph
//!
//! Starting from a database or a single object, the builder walks the
//! catalog breadth-first, merging structured dependency columns with
//! dependencies parsed from DDL, and produces a `{nodes, edges}` graph that
//! contains only objects reachable from the seed set.

pub mod builder;
pub mod output;

pub use builder::{build_graph, DependencyBuilder};
pub use output::DependencyGraph;
