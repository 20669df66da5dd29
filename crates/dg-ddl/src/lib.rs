//! dg-ddl - DDL pattern library for ddlgraph
//!
//! Each supported engine has one pure extractor that turns the raw
//! `CREATE ...` text of a catalog row into zero or more
//! [`DependencyDescriptor`](dg_core::DependencyDescriptor)s. Extractors never
//! fail: DDL that does not match its engine's expected shape yields nothing.

pub mod args;
pub mod connectors;
pub mod registry;
pub mod sink;

pub use registry::{
    ddl_dependencies, extract_dependencies, extractor_for, registered_engines, Extractor,
};
pub use sink::{explicit_sink, materialized_view_sink};
