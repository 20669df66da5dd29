use super::*;
use dg_core::{external_node_id, NOT_FOUND};

const MV_UUID: &str = "5b1a7f0e-3c2d-4e8f-9a1b-2c3d4e5f6a7b";

fn table(db: &str, name: &str) -> CatalogRow {
    CatalogRow::new(db, name, "MergeTree")
        .with_ddl(format!("CREATE TABLE {db}.{name} (x UInt8) ENGINE = MergeTree ORDER BY x"))
}

fn labels_between(
    builder: &DependencyBuilder<'_>,
    source: &str,
    target: &str,
) -> Vec<Option<String>> {
    builder
        .edges()
        .iter()
        .filter(|e| e.source == source && e.target == target)
        .map(|e| e.label.clone())
        .collect()
}

#[test]
fn test_seed_miss_yields_empty_graph() {
    let index = CatalogIndex::new(vec![table("db", "t")]);
    let mut builder = DependencyBuilder::new(&index);

    builder.build("nonexistent_db", None);
    assert_eq!(builder.nodes().len(), 0);
    assert_eq!(builder.edges().len(), 0);

    builder.build("db", Some("missing"));
    assert!(builder.nodes().is_empty());
    assert!(builder.edges().is_empty());
}

#[test]
fn test_seed_without_dependencies_creates_no_node() {
    let index = CatalogIndex::new(vec![table("db", "t")]);
    let graph = build_graph(&index, "db", Some("t"));
    assert!(graph.is_empty());
}

#[test]
fn test_implicit_materialized_view_sink() {
    let inner_name = format!(".inner_id.{MV_UUID}");
    let index = CatalogIndex::new(vec![
        CatalogRow::new("db", "mv1", "MaterializedView")
            .with_uuid(MV_UUID)
            .with_ddl("CREATE MATERIALIZED VIEW db.mv1 (`x` UInt8) ENGINE = MergeTree ORDER BY x AS SELECT x FROM db.src"),
        CatalogRow::new("db", inner_name.clone(), "MergeTree").with_uuid(MV_UUID),
    ]);

    let mut builder = DependencyBuilder::new(&index);
    builder.build("db", Some("mv1"));

    assert_eq!(builder.edges().len(), 1);
    let edge = &builder.edges()[0];
    assert_eq!(edge.source, "db.mv1");
    assert_eq!(edge.target, format!("db.{inner_name}").as_str());
    assert_eq!(edge.label.as_deref(), Some(labels::SINK_TO));
}

#[test]
fn test_implicit_sink_with_short_uuid_from_catalog_json() {
    let rows: Vec<CatalogRow> = serde_json::from_str(
        r#"[
            {"database": "db", "name": "mv1", "uuid": "u1", "engine": "MaterializedView",
             "create_table_query": "CREATE MATERIALIZED VIEW db.mv1 (`x` UInt8) ENGINE = MergeTree ORDER BY x AS SELECT 1"},
            {"database": "db", "name": ".inner_id.u1", "uuid": "u1", "engine": "MergeTree"}
        ]"#,
    )
    .unwrap();
    let index = CatalogIndex::new(rows);

    let graph = build_graph(&index, "db", Some("mv1"));
    assert_eq!(graph.edges.len(), 1);
    let edge = &graph.edges[0];
    assert_eq!(edge.source, "db.mv1");
    assert_eq!(edge.target, "db..inner_id.u1");
    assert_eq!(edge.label.as_deref(), Some(labels::SINK_TO));
}

#[test]
fn test_distributed_edge_with_sharding_key_label() {
    let index = CatalogIndex::new(vec![
        CatalogRow::new("db", "t1", "Distributed").with_ddl(
            "CREATE TABLE db.t1 (x UInt8) ENGINE = Distributed('cluster', 'remote_db', 'remote_tbl', rand())",
        ),
        table("remote_db", "remote_tbl"),
    ]);

    let mut builder = DependencyBuilder::new(&index);
    builder.build("db", Some("t1"));

    assert_eq!(builder.edges().len(), 1);
    assert_eq!(
        labels_between(&builder, "db.t1", "remote_db.remote_tbl"),
        vec![Some("rand()".to_string())]
    );
    assert_eq!(builder.nodes()["remote_db.remote_tbl"].category, "MergeTree");
}

#[test]
fn test_kafka_external_node() {
    let index = CatalogIndex::new(vec![CatalogRow::new("db", "kq", "Kafka").with_ddl(
        "CREATE TABLE db.kq (raw String) ENGINE = Kafka SETTINGS kafka_broker_list = 'b1:9092,b2:9092', kafka_topic_list = 'events'",
    )]);

    let mut builder = DependencyBuilder::new(&index);
    builder.build("db", None);

    let external_id = external_node_id("b1:9092", "Kafka Server");
    let node = &builder.nodes()[external_id.as_str()];
    assert_eq!(node.kind, NodeKind::External);
    assert_eq!(node.namespace, "b1:9092");
    assert_eq!(node.category, "Kafka Server");
    assert!(node.name.is_empty());
    assert_eq!(
        labels_between(&builder, "db.kq", external_id.as_str()),
        vec![Some("[Topic]events".to_string())]
    );
}

#[test]
fn test_external_nodes_are_shared() {
    let kafka = |name: &str, topic: &str| {
        CatalogRow::new("db", name, "Kafka").with_ddl(format!(
            "CREATE TABLE db.{name} (raw String) ENGINE = Kafka SETTINGS kafka_broker_list = 'broker:9092', kafka_topic_list = '{topic}'"
        ))
    };
    let index = CatalogIndex::new(vec![kafka("k1", "a"), kafka("k2", "b")]);

    let mut builder = DependencyBuilder::new(&index);
    builder.build("db", None);

    let external_id = external_node_id("broker:9092", "Kafka Server");
    let externals: Vec<_> = builder
        .nodes()
        .values()
        .filter(|n| n.kind == NodeKind::External)
        .collect();
    assert_eq!(externals.len(), 1);
    assert_eq!(labels_between(&builder, "db.k1", external_id.as_str()).len(), 1);
    assert_eq!(labels_between(&builder, "db.k2", external_id.as_str()).len(), 1);
}

#[test]
fn test_transitive_discovery_from_database_seed() {
    let index = CatalogIndex::new(vec![
        table("db", "a").with_dependencies([("db", "b")]),
        table("db", "b").with_dependencies([("other", "c")]),
        table("other", "c"),
    ]);

    let mut builder = DependencyBuilder::new(&index);
    builder.build("db", None);

    for id in ["db.a", "db.b", "other.c"] {
        assert!(builder.nodes().contains_key(id), "missing node {id}");
    }
    assert_eq!(labels_between(&builder, "db.a", "db.b").len(), 1);
    assert_eq!(labels_between(&builder, "db.b", "other.c").len(), 1);
    assert_eq!(builder.edges().len(), 2);
}

#[test]
fn test_transitive_discovery_from_single_seed() {
    let index = CatalogIndex::new(vec![
        table("db", "a").with_dependencies([("db", "b")]),
        table("db", "b").with_dependencies([("db", "c")]),
        table("db", "c"),
        table("db", "unrelated").with_dependencies([("db", "c")]),
    ]);

    let graph = build_graph(&index, "db", Some("a"));
    let ids: Vec<&str> = graph.nodes.keys().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["db.a", "db.b", "db.c"]);
}

#[test]
fn test_cycles_terminate() {
    let index = CatalogIndex::new(vec![
        table("db", "a").with_dependencies([("db", "b")]),
        table("db", "b").with_dependencies([("db", "a")]),
    ]);

    let graph = build_graph(&index, "db", Some("a"));
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.edges.len(), 2);
}

#[test]
fn test_missing_target_is_marked_not_found() {
    let index = CatalogIndex::new(vec![table("db", "a").with_dependencies([("gone", "t")])]);

    let graph = build_graph(&index, "db", None);
    let node = &graph.nodes["gone.t"];
    assert_eq!(node.ddl_text, NOT_FOUND);
    assert_eq!(node.namespace, "gone");
    assert_eq!(node.name, "t");
    assert_eq!(graph.nodes["db.a"].target_ids, vec![NodeId::new("gone.t")]);
}

#[test]
fn test_push_to_label_when_target_is_materialized_view() {
    let index = CatalogIndex::new(vec![
        table("db", "src").with_dependencies([("db", "mv")]),
        CatalogRow::new("db", "mv", "MaterializedView")
            .with_ddl("CREATE MATERIALIZED VIEW db.mv TO db.sink AS SELECT x FROM db.src"),
        table("db", "sink"),
    ]);

    let mut builder = DependencyBuilder::new(&index);
    builder.build("db", Some("src"));

    // No inversion: the edge keeps its source -> target direction.
    assert_eq!(
        labels_between(&builder, "db.src", "db.mv"),
        vec![Some(labels::PUSH_TO.to_string())]
    );
    assert!(labels_between(&builder, "db.mv", "db.src").is_empty());
    assert_eq!(
        labels_between(&builder, "db.mv", "db.sink"),
        vec![Some(labels::SINK_TO.to_string())]
    );
}

#[test]
fn test_materialized_view_structured_labels() {
    let index = CatalogIndex::new(vec![
        CatalogRow::new("db", "mv", "MaterializedView")
            .with_ddl("CREATE MATERIALIZED VIEW db.mv TO sink AS SELECT x FROM db.src")
            .with_dependencies([("db", "sink"), ("db", "src")]),
        table("db", "sink"),
        table("db", "src"),
    ]);

    let mut builder = DependencyBuilder::new(&index);
    builder.build("db", Some("mv"));

    // Structured sink edge is inferred, the DDL sink edge is explicit: both kept.
    assert_eq!(
        labels_between(&builder, "db.mv", "db.sink"),
        vec![
            Some(labels::SINK_TO.to_string()),
            Some(labels::SINK_TO.to_string())
        ]
    );
    assert_eq!(
        labels_between(&builder, "db.mv", "db.src"),
        vec![Some(labels::SELECT_FROM.to_string())]
    );
    let targets = &builder.nodes()["db.mv"].target_ids;
    assert_eq!(targets.iter().filter(|t| *t == "db.sink").count(), 2);
}

#[test]
fn test_view_selects_from() {
    let index = CatalogIndex::new(vec![
        CatalogRow::new("db", "v", "View")
            .with_ddl("CREATE VIEW db.v AS SELECT * FROM db.t")
            .with_dependencies([("db", "t")]),
        table("db", "t"),
    ]);

    let graph = build_graph(&index, "db", Some("v"));
    assert_eq!(graph.edges[0].label.as_deref(), Some(labels::SELECT_FROM));
}

#[test]
fn test_plain_dependency_is_unlabelled() {
    let index = CatalogIndex::new(vec![
        CatalogRow::new("db", "buf", "Buffer")
            .with_ddl("CREATE TABLE db.buf (x UInt8) ENGINE = Buffer(db, t, 1, 1, 1, 1, 1, 1, 1)"),
        table("db", "t"),
    ]);

    let graph = build_graph(&index, "db", Some("buf"));
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].label, None);
}

#[test]
fn test_rebuild_resets_state() {
    let index = CatalogIndex::new(vec![
        table("db", "a").with_dependencies([("db", "b")]),
        table("db", "b"),
        table("other", "x").with_dependencies([("other", "y")]),
        table("other", "y"),
    ]);

    let mut builder = DependencyBuilder::new(&index);
    builder.build("db", None);
    assert!(builder.nodes().contains_key("db.a"));

    builder.build("other", None);
    assert!(!builder.nodes().contains_key("db.a"));
    assert_eq!(builder.edges().len(), 1);
}

#[test]
fn test_edge_ids_are_unique() {
    let index = CatalogIndex::new(vec![
        table("db", "a").with_dependencies([("db", "b"), ("db", "b")]),
        table("db", "b"),
    ]);

    let graph = build_graph(&index, "db", Some("a"));
    assert_eq!(graph.edges.len(), 2);
    assert_ne!(graph.edges[0].id, graph.edges[1].id);
}

#[test]
fn test_nodes_in_first_discovered_order() {
    let index = CatalogIndex::new(vec![
        table("db", "z").with_dependencies([("db", "m")]),
        table("db", "m").with_dependencies([("db", "a")]),
        table("db", "a"),
    ]);

    let graph = build_graph(&index, "db", Some("z"));
    let ids: Vec<&str> = graph.nodes.keys().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["db.z", "db.m", "db.a"]);
}

#[test]
fn test_resolve_label_explicit_wins() {
    let source = CatalogRow::new("db", "v", "View");
    let target = CatalogRow::new("db", "mv", "MaterializedView");
    let descriptor = DependencyDescriptor::internal("db", "mv").with_label("custom");
    let label = resolve_label(&source, &descriptor, Some(&target), &target.id(), None);
    assert_eq!(label.as_deref(), Some("custom"));
}

#[test]
fn test_resolve_label_blank_explicit_label_is_kept() {
    let source = CatalogRow::new("db", "d", "Distributed");
    let descriptor = DependencyDescriptor::internal("db", "local").with_label("");
    let label = resolve_label(&source, &descriptor, None, &descriptor.target_id(), None);
    assert_eq!(label.as_deref(), Some(""));
}
