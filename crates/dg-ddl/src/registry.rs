//! Engine-name dispatch table for DDL extractors.

use crate::connectors;
use crate::sink::materialized_view_sink;
use dg_core::{CatalogIndex, CatalogRow, DependencyDescriptor};
use std::collections::HashMap;
use std::sync::OnceLock;

/// A pure DDL extractor: catalog row in, dependency descriptors out.
pub type Extractor = fn(&CatalogRow) -> Vec<DependencyDescriptor>;

fn registry() -> &'static HashMap<&'static str, Extractor> {
    static REGISTRY: OnceLock<HashMap<&'static str, Extractor>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        HashMap::from([
            ("MySQL", connectors::mysql as Extractor),
            ("PostgreSQL", connectors::postgresql as Extractor),
            ("Kafka", connectors::kafka as Extractor),
            ("URL", connectors::url as Extractor),
            ("Dictionary", connectors::dictionary as Extractor),
            ("Distributed", connectors::distributed as Extractor),
            ("Buffer", connectors::buffer as Extractor),
        ])
    })
}

/// Extractor registered for an engine name (exact, case-sensitive match).
pub fn extractor_for(engine: &str) -> Option<Extractor> {
    registry().get(engine).copied()
}

/// Engine names with a registered extractor, sorted.
pub fn registered_engines() -> Vec<&'static str> {
    let mut engines: Vec<&'static str> = registry().keys().copied().collect();
    engines.sort_unstable();
    engines
}

/// Run the registered extractor for the row's engine, if any.
pub fn extract_dependencies(row: &CatalogRow) -> Vec<DependencyDescriptor> {
    extractor_for(&row.engine)
        .map(|extract| extract(row))
        .unwrap_or_default()
}

/// All dependencies implied by a row's DDL text.
///
/// Materialized views go through sink resolution, which needs the catalog
/// index; every other engine goes through the registry.
pub fn ddl_dependencies(row: &CatalogRow, index: &CatalogIndex) -> Vec<DependencyDescriptor> {
    if row.is_materialized_view() {
        materialized_view_sink(row, index)
    } else {
        extract_dependencies(row)
    }
}
