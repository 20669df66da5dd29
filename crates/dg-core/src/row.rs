//! Catalog rows as exported from the engine's table catalog.
//!
//! One row describes one object (table, view, dictionary, ...). Rows are
//! read-only input: the graph builder resolves against them but never
//! changes them.

use crate::node_id::NodeId;
use crate::serde_helpers::{lenient_datetime, lenient_uuid};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Engine name of materialized views.
pub const MATERIALIZED_VIEW_ENGINE: &str = "MaterializedView";

/// Engine name of plain views.
pub const VIEW_ENGINE: &str = "View";

/// Name prefix of a materialized view's backing table keyed by view UUID.
pub const INNER_ID_PREFIX: &str = ".inner_id.";

/// Name prefix of a materialized view's backing table keyed by view name.
pub const INNER_PREFIX: &str = ".inner.";

/// One object in the catalog.
///
/// Field names follow the columns of the engine's `system.tables`; the
/// camel-case names used by web clients are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    /// Database (namespace) the object lives in
    pub database: String,

    /// Object name within its database
    pub name: String,

    /// Object UUID as exported; empty or all-zero when the database engine
    /// does not assign one
    #[serde(default, deserialize_with = "lenient_uuid::deserialize")]
    pub uuid: String,

    /// Engine name, e.g. `MergeTree`, `MaterializedView`, `Kafka`
    #[serde(default)]
    pub engine: String,

    /// Raw `CREATE ...` statement
    #[serde(
        default,
        rename = "create_table_query",
        alias = "ddlText",
        alias = "ddl_text"
    )]
    pub ddl_text: String,

    /// Databases of objects this row has a structured dependency on
    #[serde(
        default,
        rename = "dependencies_database",
        alias = "dependencyDatabases"
    )]
    pub dependency_databases: DependencyList,

    /// Tables of objects this row has a structured dependency on
    #[serde(default, rename = "dependencies_table", alias = "dependencyTables")]
    pub dependency_tables: DependencyList,

    /// Last metadata modification time
    #[serde(
        default,
        rename = "metadata_modification_time",
        alias = "lastModified",
        with = "lenient_datetime"
    )]
    pub last_modified: Option<NaiveDateTime>,
}

impl CatalogRow {
    /// Create a row with the given database, name and engine.
    pub fn new(database: impl Into<String>, name: impl Into<String>, engine: &str) -> Self {
        Self {
            database: database.into(),
            name: name.into(),
            engine: engine.to_string(),
            ..Self::default()
        }
    }

    /// Builder-style setter for the DDL text.
    pub fn with_ddl(mut self, ddl: impl Into<String>) -> Self {
        self.ddl_text = ddl.into();
        self
    }

    /// Builder-style setter for the UUID.
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = uuid.into();
        self
    }

    /// Builder-style setter for structured dependencies (current array shape).
    pub fn with_dependencies<'a>(
        mut self,
        deps: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let (dbs, tables): (Vec<String>, Vec<String>) = deps
            .into_iter()
            .map(|(db, table)| (db.to_string(), table.to_string()))
            .unzip();
        self.dependency_databases = DependencyList::Many(dbs);
        self.dependency_tables = DependencyList::Many(tables);
        self
    }

    /// Fully-qualified identifier, `database.name`.
    pub fn id(&self) -> NodeId {
        NodeId::qualified(&self.database, &self.name)
    }

    /// Whether this row is a materialized view.
    pub fn is_materialized_view(&self) -> bool {
        self.engine == MATERIALIZED_VIEW_ENGINE
    }

    /// Whether this row is a plain view.
    pub fn is_view(&self) -> bool {
        self.engine == VIEW_ENGINE
    }

    /// Key under which this row's implicit backing table is registered, if
    /// this row is a materialized view without an explicit sink.
    ///
    /// Uses `.inner_id.<uuid>` with the UUID text as exported, or
    /// `.inner.<name>` when the UUID is the nil sentinel.
    pub fn inner_key(&self) -> String {
        if self.has_nil_uuid() {
            format!("{INNER_PREFIX}{}", self.name)
        } else {
            format!("{INNER_ID_PREFIX}{}", self.uuid)
        }
    }

    /// Whether the UUID is empty or the all-zero sentinel.
    ///
    /// Any other text counts as an assigned UUID, canonical or not.
    pub fn has_nil_uuid(&self) -> bool {
        self.uuid.is_empty() || Uuid::parse_str(&self.uuid).is_ok_and(|uuid| uuid.is_nil())
    }

    /// Whether this row is itself a backing table of some materialized view.
    pub fn is_inner_table(&self) -> bool {
        self.name.starts_with(INNER_ID_PREFIX) || self.name.starts_with(INNER_PREFIX)
    }

    /// Structured `(database, table)` dependency pairs carried on the row.
    ///
    /// Array shapes are zipped pairwise; a length mismatch drops the whole
    /// structured channel for this row. A legacy single-string pair yields
    /// at most one dependency. Any other combination yields nothing.
    pub fn structured_dependencies(&self) -> Vec<(String, String)> {
        match (&self.dependency_databases, &self.dependency_tables) {
            (DependencyList::Many(dbs), DependencyList::Many(tables)) => {
                if dbs.len() != tables.len() {
                    log::warn!(
                        "Skipping structured dependencies of '{}': {} databases vs {} tables",
                        self.id(),
                        dbs.len(),
                        tables.len()
                    );
                    return Vec::new();
                }
                dbs.iter()
                    .zip(tables)
                    .filter(|(db, table)| !db.is_empty() && !table.is_empty())
                    .map(|(db, table)| (db.clone(), table.clone()))
                    .collect()
            }
            (DependencyList::Legacy(db), DependencyList::Legacy(table)) => {
                if db.is_empty() || table.is_empty() {
                    Vec::new()
                } else {
                    vec![(db.clone(), table.clone())]
                }
            }
            (DependencyList::Absent, DependencyList::Absent) => Vec::new(),
            _ => {
                log::debug!(
                    "Skipping structured dependencies of '{}': mismatched shapes",
                    self.id()
                );
                Vec::new()
            }
        }
    }
}

/// Shape of a structured dependency column.
///
/// Newer engine versions export arrays; older exports carry one string.
/// Values of any other shape are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDependencyList", untagged)]
pub enum DependencyList {
    /// Column missing, null, or of an unrecognised shape
    #[default]
    Absent,
    /// Array of names
    Many(Vec<String>),
    /// Legacy single name
    Legacy(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDependencyList {
    Many(Vec<String>),
    Legacy(String),
    Other(serde::de::IgnoredAny),
}

impl From<RawDependencyList> for DependencyList {
    fn from(raw: RawDependencyList) -> Self {
        match raw {
            RawDependencyList::Many(v) => DependencyList::Many(v),
            RawDependencyList::Legacy(s) => DependencyList::Legacy(s),
            RawDependencyList::Other(_) => DependencyList::Absent,
        }
    }
}

#[cfg(test)]
#[path = "row_test.rs"]
mod tests;
