//! CLI command implementations

pub(crate) mod graph;
pub(crate) mod ls;
