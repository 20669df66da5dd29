//! Identity for dependency endpoints that live outside the catalog.

use crate::checksum::compute_checksum;
use crate::node_id::NodeId;

/// Prefix that keeps minted ids apart from `database.name` ids.
pub const EXTERNAL_ID_PREFIX: &str = "a";

/// Mint the node id of an external system.
///
/// The id is the SHA-256 of `namespace@category` behind a fixed prefix, so
/// every reference to the same broker, server, or endpoint collapses onto a
/// single node. Catalog ids always contain a `.`; minted ids never do.
pub fn external_node_id(namespace: &str, category: &str) -> NodeId {
    let digest = compute_checksum(&format!("{namespace}@{category}"));
    NodeId::new(format!("{EXTERNAL_ID_PREFIX}{digest}"))
}
