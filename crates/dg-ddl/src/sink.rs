//! Materialized-view sink resolution.
//!
//! A materialized view writes into either an explicit `TO <target>` table or
//! an implicit backing table (`.inner_id.<uuid>` / `.inner.<name>`). The
//! second case needs the catalog index, which is why this lives outside the
//! engine registry.

use dg_core::{labels, CatalogIndex, CatalogRow, DependencyDescriptor};
use regex::Regex;
use std::sync::OnceLock;

const IDENT: &str = r"(?:`[^`]*`|[\w$]+)";

/// `CREATE MATERIALIZED VIEW [IF NOT EXISTS] [db.]name [UUID '...'] [ON CLUSTER c]`
fn view_header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"(?is)^\s*CREATE\s+MATERIALIZED\s+VIEW\s+(?:IF\s+NOT\s+EXISTS\s+)?(?:{IDENT}\.)?{IDENT}(?:\s+UUID\s+'[^']*')?(?:\s+ON\s+CLUSTER\s+{IDENT})?"
        ))
        .expect("valid regex literal")
    })
}

fn refresh_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s+REFRESH\b").expect("valid regex literal"))
}

/// First unquoted `TO` or `AS` keyword; quoted text is matched and skipped.
fn refresh_end_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)'(?:[^'\\]|\\.)*'|`[^`]*`|\b(TO|AS)\b").expect("valid regex literal")
    })
}

fn sink_target_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"(?is)^\s*TO\s+(?:({IDENT})\.)?({IDENT})"))
            .expect("valid regex literal")
    })
}

/// The explicit `TO <target>` sink of a materialized view, as
/// `(database, table)`. An unqualified target defaults to the view's own
/// database.
///
/// Refreshable views carry `REFRESH EVERY|AFTER ... [APPEND]` between the
/// view name and `TO`.
pub fn explicit_sink(row: &CatalogRow) -> Option<(String, String)> {
    let ddl = &row.ddl_text;
    let header = view_header_regex().find(ddl)?;
    let mut rest = &ddl[header.end()..];

    if let Some(refresh) = refresh_regex().find(rest) {
        rest = &rest[refresh.end()..];
        let keyword = refresh_end_regex()
            .captures_iter(rest)
            .find_map(|caps| caps.get(1))?;
        if !keyword.as_str().eq_ignore_ascii_case("TO") {
            return None;
        }
        rest = &rest[keyword.start()..];
    }

    let caps = sink_target_regex().captures(rest)?;
    let database = caps
        .get(1)
        .map(|m| strip_backticks(m.as_str()))
        .unwrap_or_else(|| row.database.clone());
    let table = strip_backticks(&caps[2]);
    Some((database, table))
}

/// Resolve the sink of a materialized view.
///
/// An explicit `TO` target wins. Otherwise the implicit backing table is
/// looked up by the view's inner key; if no such row exists the relationship
/// cannot be represented and nothing is returned.
pub fn materialized_view_sink(row: &CatalogRow, index: &CatalogIndex) -> Vec<DependencyDescriptor> {
    if let Some((database, table)) = explicit_sink(row) {
        return vec![DependencyDescriptor::internal(database, table).with_label(labels::SINK_TO)];
    }

    let key = row.inner_key();
    match index.get_inner(&key) {
        Some(inner) => vec![
            DependencyDescriptor::internal(inner.database.clone(), inner.name.clone())
                .with_label(labels::SINK_TO),
        ],
        None => {
            log::debug!("No backing table '{}' for materialized view '{}'", key, row.id());
            Vec::new()
        }
    }
}

fn strip_backticks(ident: &str) -> String {
    ident.trim_matches('`').to_string()
}

#[cfg(test)]
#[path = "sink_test.rs"]
mod tests;
