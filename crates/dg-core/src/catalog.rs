//! Catalog index and catalog file loading.
//!
//! The index answers two questions in O(1): "which row is `database.name`?"
//! and "which row is the backing table registered under this inner key?".
//! It is built once from the full row set and never mutated afterwards.

use crate::error::{CoreError, CoreResult};
use crate::node_id::NodeId;
use crate::row::CatalogRow;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Query the fetch side must run to produce a complete catalog.
///
/// Inner (backing) tables of materialized views are included on purpose:
/// implicit sink resolution depends on them.
pub const CATALOG_QUERY: &str = "SELECT database, name, uuid, engine, create_table_query, \
dependencies_database, dependencies_table, metadata_modification_time \
FROM system.tables ORDER BY database, name";

/// Lookup maps over a catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    by_full_name: HashMap<NodeId, CatalogRow>,
    by_inner_key: HashMap<String, CatalogRow>,
}

impl CatalogIndex {
    /// Build both lookup maps from a row set.
    ///
    /// Rows are expected to be unique by id; if not, the last row wins.
    pub fn new(rows: impl IntoIterator<Item = CatalogRow>) -> Self {
        let mut by_full_name = HashMap::new();
        let mut by_inner_key = HashMap::new();

        for row in rows {
            if row.is_inner_table() {
                by_inner_key.insert(row.name.clone(), row.clone());
            }
            if let Some(previous) = by_full_name.insert(row.id(), row) {
                log::warn!("Duplicate catalog row '{}', keeping the last one", previous.id());
            }
        }

        Self {
            by_full_name,
            by_inner_key,
        }
    }

    /// Assemble an index from prebuilt maps.
    pub fn from_maps(
        by_full_name: HashMap<NodeId, CatalogRow>,
        by_inner_key: HashMap<String, CatalogRow>,
    ) -> Self {
        Self {
            by_full_name,
            by_inner_key,
        }
    }

    /// Resolve a fully-qualified `database.name`.
    pub fn get(&self, full_name: &str) -> Option<&CatalogRow> {
        self.by_full_name.get(full_name)
    }

    /// Resolve a backing-table key such as `.inner_id.<uuid>` or `.inner.<name>`.
    pub fn get_inner(&self, inner_key: &str) -> Option<&CatalogRow> {
        self.by_inner_key.get(inner_key)
    }

    /// All rows of one database, sorted by id for stable traversal order.
    pub fn rows_in_database(&self, database: &str) -> Vec<&CatalogRow> {
        let mut rows: Vec<&CatalogRow> = self
            .by_full_name
            .values()
            .filter(|row| row.database == database)
            .collect();
        rows.sort_by(|a, b| a.database.cmp(&b.database).then_with(|| a.name.cmp(&b.name)));
        rows
    }

    /// All rows, sorted by id.
    pub fn rows(&self) -> Vec<&CatalogRow> {
        let mut rows: Vec<&CatalogRow> = self.by_full_name.values().collect();
        rows.sort_by(|a, b| a.database.cmp(&b.database).then_with(|| a.name.cmp(&b.name)));
        rows
    }

    /// Number of indexed rows.
    pub fn len(&self) -> usize {
        self.by_full_name.len()
    }

    /// Whether the index holds no rows.
    pub fn is_empty(&self) -> bool {
        self.by_full_name.is_empty()
    }
}

/// Envelope returned by the engine's `FORMAT JSON` output.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    Rows(Vec<CatalogRow>),
    Envelope { data: Vec<CatalogRow> },
}

/// Load catalog rows from a file exported by the fetch side.
///
/// The format is chosen by extension: `.json` (array, or `{"data": [...]}`),
/// `.jsonl` / `.ndjson` (one row per line), `.yml` / `.yaml` (array).
pub fn load_catalog(path: &Path) -> CoreResult<Vec<CatalogRow>> {
    if !path.exists() {
        return Err(CoreError::CatalogNotFound {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let rows = match extension.as_str() {
        "json" => match serde_json::from_str::<JsonCatalog>(&content)? {
            JsonCatalog::Rows(rows) => rows,
            JsonCatalog::Envelope { data } => data,
        },
        "jsonl" | "ndjson" => parse_json_lines(path, &content)?,
        "yml" | "yaml" => serde_yaml::from_str(&content)?,
        _ => {
            return Err(CoreError::CatalogUnsupportedFormat {
                path: path.display().to_string(),
                extension,
            })
        }
    };

    log::debug!("Loaded {} catalog rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn parse_json_lines(path: &Path, content: &str) -> CoreResult<Vec<CatalogRow>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|e| CoreError::CatalogParseError {
                path: path.display().to_string(),
                line: idx + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
