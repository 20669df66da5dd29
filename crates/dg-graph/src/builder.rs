//! Breadth-first dependency graph construction

use crate::output::DependencyGraph;
use dg_core::{
    labels, CatalogIndex, CatalogRow, DependencyDescriptor, GraphEdge, GraphNode, NodeId,
    NodeKind,
};
use dg_ddl::{ddl_dependencies, explicit_sink};
use indexmap::IndexMap;
use std::collections::{HashSet, VecDeque};

/// Builds the dependency graph reachable from a seed set.
///
/// Node and edge state belongs to the most recent [`build`](Self::build)
/// call and is reset at the start of every call. One builder must not be
/// shared by concurrent builds.
#[derive(Debug)]
pub struct DependencyBuilder<'a> {
    index: &'a CatalogIndex,
    nodes: IndexMap<NodeId, GraphNode>,
    edges: Vec<GraphEdge>,
}

impl<'a> DependencyBuilder<'a> {
    /// Create a builder over a catalog index
    pub fn new(index: &'a CatalogIndex) -> Self {
        Self {
            index,
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    /// Build the graph seeded from `database.table`, or from every object
    /// of `database` when no table is given.
    ///
    /// A seed that does not exist produces an empty graph. Nodes are created
    /// only as edge endpoints, so a seed with no dependencies adds no node.
    pub fn build(&mut self, database: &str, table: Option<&str>) {
        self.nodes.clear();
        self.edges.clear();

        let index = self.index;
        let seeds: Vec<&'a CatalogRow> = match table {
            Some(table) => index
                .get(NodeId::qualified(database, table).as_str())
                .into_iter()
                .collect(),
            None => index.rows_in_database(database),
        };
        if seeds.is_empty() {
            log::debug!("No seed rows for database '{}' table {:?}", database, table);
        }

        let mut visited: HashSet<NodeId> = seeds.iter().map(|row| row.id()).collect();
        let mut queue: VecDeque<&'a CatalogRow> = seeds.into_iter().collect();

        while let Some(source) = queue.pop_front() {
            let descriptors = collect_descriptors(source, index);
            log::debug!(
                "Visiting '{}' ({}): {} dependencies",
                source.id(),
                source.engine,
                descriptors.len()
            );

            let sink = if source.is_materialized_view() {
                explicit_sink(source).map(|(db, table)| NodeId::qualified(&db, &table))
            } else {
                None
            };

            for descriptor in &descriptors {
                let target_id = self.add_dependency(source, descriptor, sink.as_ref());

                if descriptor.kind == NodeKind::Internal && visited.insert(target_id.clone()) {
                    if let Some(row) = index.get(target_id.as_str()) {
                        queue.push_back(row);
                    }
                }
            }
        }

        log::debug!(
            "Built dependency graph: {} nodes, {} edges",
            self.nodes.len(),
            self.edges.len()
        );
    }

    /// Nodes of the last build, in first-discovered order
    pub fn nodes(&self) -> &IndexMap<NodeId, GraphNode> {
        &self.nodes
    }

    /// Edges of the last build
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Consume the builder and return the last built graph
    pub fn into_graph(self) -> DependencyGraph {
        DependencyGraph {
            nodes: self.nodes,
            edges: self.edges,
        }
    }

    /// Record one dependency edge, creating both endpoint nodes on first use.
    fn add_dependency(
        &mut self,
        source: &CatalogRow,
        descriptor: &DependencyDescriptor,
        sink: Option<&NodeId>,
    ) -> NodeId {
        let index = self.index;
        let source_id = source.id();
        self.nodes
            .entry(source_id.clone())
            .or_insert_with(|| GraphNode::from_row(source));

        let target_id = descriptor.target_id();
        let target_row = match descriptor.kind {
            NodeKind::Internal => index.get(target_id.as_str()),
            NodeKind::External => None,
        };

        if !self.nodes.contains_key(&target_id) {
            let node = match (descriptor.kind, target_row) {
                (NodeKind::Internal, Some(row)) => GraphNode::from_row(row),
                (NodeKind::Internal, None) => {
                    log::warn!(
                        "Dependency '{}' of '{}' is not in the catalog",
                        target_id,
                        source_id
                    );
                    GraphNode::missing(&descriptor.namespace, &descriptor.name)
                }
                (NodeKind::External, _) => {
                    if !descriptor.name.is_empty() {
                        log::debug!(
                            "External {} '{}' serves '{}'",
                            descriptor.category,
                            descriptor.namespace,
                            descriptor.name
                        );
                    }
                    GraphNode::external(&descriptor.namespace, &descriptor.category)
                }
            };
            self.nodes.insert(target_id.clone(), node);
        }

        let label = resolve_label(source, descriptor, target_row, &target_id, sink);
        self.edges.push(GraphEdge {
            id: uuid::Uuid::new_v4().to_string(),
            source: source_id.clone(),
            target: target_id.clone(),
            label,
        });

        if let Some(node) = self.nodes.get_mut(&source_id) {
            node.target_ids.push(target_id.clone());
        }

        target_id
    }
}

/// Build a graph in one call with a fresh builder.
pub fn build_graph(index: &CatalogIndex, database: &str, table: Option<&str>) -> DependencyGraph {
    let mut builder = DependencyBuilder::new(index);
    builder.build(database, table);
    builder.into_graph()
}

/// Structured dependencies first, then whatever the DDL implies.
fn collect_descriptors(source: &CatalogRow, index: &CatalogIndex) -> Vec<DependencyDescriptor> {
    source
        .structured_dependencies()
        .into_iter()
        .map(|(database, table)| DependencyDescriptor::internal(database, table))
        .chain(ddl_dependencies(source, index))
        .collect()
}

/// Pick the edge label.
///
/// An explicit descriptor label wins. Otherwise: edges into a materialized
/// view push data to it; edges out of a materialized view either sink into
/// its explicit `TO` target or select from a source; edges out of a plain
/// view select from their target. Anything else stays unlabelled.
pub(crate) fn resolve_label(
    source: &CatalogRow,
    descriptor: &DependencyDescriptor,
    target_row: Option<&CatalogRow>,
    target_id: &NodeId,
    sink: Option<&NodeId>,
) -> Option<String> {
    if let Some(label) = &descriptor.edge_label {
        return Some(label.clone());
    }

    if target_row.is_some_and(CatalogRow::is_materialized_view) {
        return Some(labels::PUSH_TO.to_string());
    }

    if source.is_materialized_view() {
        let label = if sink == Some(target_id) {
            labels::SINK_TO
        } else {
            labels::SELECT_FROM
        };
        return Some(label.to_string());
    }

    if source.is_view() {
        return Some(labels::SELECT_FROM.to_string());
    }

    None
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
