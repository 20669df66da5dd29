//! List command implementation

use anyhow::{Context, Result};
use dg_core::{CatalogIndex, CatalogRow, DependencyDescriptor, NodeKind};
use dg_ddl::ddl_dependencies;
use serde::Serialize;

use crate::cli::{GlobalArgs, LsArgs, LsOutput};
use crate::context::RuntimeContext;

/// Execute the ls command
pub fn execute(args: &LsArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;

    let rows = match &args.database {
        Some(database) => ctx.index.rows_in_database(database),
        None => ctx.index.rows(),
    };
    ctx.verbose(&format!("Listing {} catalog objects", rows.len()));

    let objects: Vec<ObjectInfo> = rows
        .into_iter()
        .map(|row| ObjectInfo::from_row(row, &ctx.index))
        .collect();

    match args.output {
        LsOutput::Table => print!("{}", render_table(&objects)),
        LsOutput::Json => print_json(&objects)?,
    }

    Ok(())
}

/// Catalog object information for display
#[derive(Debug, Serialize)]
struct ObjectInfo {
    name: String,
    engine: String,
    /// Structured dependency columns followed by DDL-derived dependencies
    dependencies: Vec<DependencyDescriptor>,
}

impl ObjectInfo {
    fn from_row(row: &CatalogRow, index: &CatalogIndex) -> Self {
        let dependencies = row
            .structured_dependencies()
            .into_iter()
            .map(|(database, table)| DependencyDescriptor::internal(database, table))
            .chain(ddl_dependencies(row, index))
            .collect();

        Self {
            name: row.id().into_inner(),
            engine: row.engine.clone(),
            dependencies,
        }
    }
}

/// Render objects as an aligned text table
fn render_table(objects: &[ObjectInfo]) -> String {
    if objects.is_empty() {
        return "No catalog objects found.\n".to_string();
    }

    let name_width = objects.iter().map(|o| o.name.len()).max().unwrap_or(4).max(4);
    let engine_width = objects
        .iter()
        .map(|o| o.engine.len())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut out = format!(
        "{:<name_width$}  {:<engine_width$}  DEPENDS_ON\n",
        "NAME", "ENGINE"
    );
    out.push_str(&format!(
        "{:-<name_width$}  {:-<engine_width$}  {}\n",
        "",
        "",
        "-".repeat(40)
    ));

    for object in objects {
        let deps: Vec<String> = object.dependencies.iter().map(describe).collect();
        let deps_str = if deps.is_empty() {
            "-".to_string()
        } else {
            deps.join(", ")
        };
        out.push_str(&format!(
            "{:<name_width$}  {:<engine_width$}  {}\n",
            object.name, object.engine, deps_str
        ));
    }

    out.push_str(&format!("\n{} objects found\n", objects.len()));
    out
}

fn describe(descriptor: &DependencyDescriptor) -> String {
    match descriptor.kind {
        NodeKind::Internal => format!("{}.{}", descriptor.namespace, descriptor.name),
        NodeKind::External => format!(
            "{} ({}, external)",
            descriptor.namespace, descriptor.category
        ),
    }
}

/// Print objects in JSON format
fn print_json(objects: &[ObjectInfo]) -> Result<()> {
    let json = serde_json::to_string_pretty(objects).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
#[path = "ls_test.rs"]
mod tests;
