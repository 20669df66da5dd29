use super::*;
use dg_core::{CatalogIndex, CatalogRow};

fn sample_index() -> CatalogIndex {
    CatalogIndex::new(vec![
        CatalogRow::new("db", "q", "Kafka").with_ddl(
            "CREATE TABLE db.q (s String) ENGINE = Kafka('broker:9092', 'clicks', 'g', 'JSONEachRow')",
        ),
        CatalogRow::new("db", "d", "Distributed")
            .with_ddl("CREATE TABLE db.d (s String) ENGINE = Distributed('c', 'db', 'gone', rand())"),
    ])
}

#[test]
fn test_render_table() {
    let graph = build_graph(&sample_index(), "db", None);
    let table = render_table(&graph);
    let lines: Vec<&str> = table.lines().collect();

    assert!(lines[0].starts_with("SOURCE"));
    assert!(lines[0].ends_with("TARGET"));
    assert!(lines[1].starts_with("------"));
    assert!(table.contains("db.gone (not found)"));
    assert!(table.contains("broker:9092 (Kafka Server)"));
    assert!(table.contains("[Topic]clicks"));
    assert!(table.contains("rand()"));
    assert!(table.ends_with("4 nodes, 2 edges\n"));
}

#[test]
fn test_render_table_empty() {
    let graph = build_graph(&sample_index(), "nowhere", None);
    assert_eq!(render_table(&graph), "No dependencies found.\n");
}

#[test]
fn test_unlabelled_edge_shows_dash() {
    let index = CatalogIndex::new(vec![
        CatalogRow::new("db", "t", "MergeTree").with_dependencies([("db", "u")]),
        CatalogRow::new("db", "u", "MergeTree"),
    ]);
    let table = render_table(&build_graph(&index, "db", Some("t")));
    let row = table.lines().nth(2).unwrap();
    assert!(row.starts_with("db.t"));
    assert!(row.contains(" - "));
    assert!(row.ends_with("db.u"));
}
