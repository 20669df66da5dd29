//! Graph command implementation

use anyhow::{Context, Result};
use dg_core::{GraphNode, NodeKind};
use dg_graph::{build_graph, DependencyGraph};

use crate::cli::{GlobalArgs, GraphArgs, GraphOutput};
use crate::context::RuntimeContext;

/// Execute the graph command
pub fn execute(args: &GraphArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let database = ctx.seed_database(args.database.as_deref())?;
    let output = args
        .output
        .unwrap_or_else(|| GraphOutput::from(ctx.config.output));

    match &args.table {
        Some(table) => ctx.verbose(&format!("Seeding from {}.{}", database, table)),
        None => ctx.verbose(&format!("Seeding from every object in '{}'", database)),
    }

    let graph = build_graph(&ctx.index, &database, args.table.as_deref());
    ctx.verbose(&format!(
        "Built graph with {} nodes and {} edges",
        graph.nodes.len(),
        graph.edges.len()
    ));

    match output {
        GraphOutput::Json => {
            let json =
                serde_json::to_string_pretty(&graph).context("Failed to serialize to JSON")?;
            println!("{}", json);
        }
        GraphOutput::Dot => print!("{}", graph.to_dot()),
        GraphOutput::Table => print!("{}", render_table(&graph)),
    }

    Ok(())
}

/// Render the edges of a graph as an aligned text table
pub(crate) fn render_table(graph: &DependencyGraph) -> String {
    if graph.edges.is_empty() {
        return "No dependencies found.\n".to_string();
    }

    let rows: Vec<(String, &str, String)> = graph
        .edges
        .iter()
        .map(|edge| {
            let source = graph
                .nodes
                .get(&edge.source)
                .map(display_name)
                .unwrap_or_else(|| edge.source.to_string());
            let target = graph
                .nodes
                .get(&edge.target)
                .map(display_name)
                .unwrap_or_else(|| edge.target.to_string());
            (source, edge.label.as_deref().unwrap_or("-"), target)
        })
        .collect();

    let source_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(6).max(6);
    let label_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(5).max(5);

    let mut out = format!(
        "{:<source_width$}  {:<label_width$}  TARGET\n",
        "SOURCE", "LABEL"
    );
    out.push_str(&format!(
        "{:-<source_width$}  {:-<label_width$}  {}\n",
        "",
        "",
        "-".repeat(40)
    ));
    for (source, label, target) in &rows {
        out.push_str(&format!(
            "{:<source_width$}  {:<label_width$}  {}\n",
            source, label, target
        ));
    }
    out.push_str(&format!(
        "\n{} nodes, {} edges\n",
        graph.nodes.len(),
        graph.edges.len()
    ));
    out
}

fn display_name(node: &GraphNode) -> String {
    match node.kind {
        NodeKind::External => format!("{} ({})", node.namespace, node.category),
        NodeKind::Internal if node.is_missing() => format!("{} (not found)", node.id),
        NodeKind::Internal => node.id.to_string(),
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
