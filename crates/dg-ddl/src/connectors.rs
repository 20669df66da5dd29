//! Per-engine dependency extractors.
//!
//! Every function here has the [`Extractor`](crate::registry::Extractor)
//! signature and is registered under its engine name. All captures an
//! extractor needs must succeed together; partial matches yield nothing.

use crate::args::{call_arguments, engine_call_regex, unquote};
use dg_core::{labels, CatalogRow, DependencyDescriptor};
use regex::Regex;
use std::sync::OnceLock;

/// Category of remote MySQL servers.
pub const MYSQL_SERVER: &str = "MySQL Server";
/// Category of remote PostgreSQL servers.
pub const POSTGRESQL_SERVER: &str = "PostgreSQL Server";
/// Category of message brokers.
pub const KAFKA_SERVER: &str = "Kafka Server";
/// Category of HTTP endpoints.
pub const HTTP_SERVER: &str = "HTTP Server";
/// Category of remote catalog servers feeding dictionaries.
pub const CLICKHOUSE_SERVER: &str = "ClickHouse Server";

/// Database argument that means "the database of the defining object".
const CURRENT_DATABASE: &str = "currentDatabase()";

fn mysql_call() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| engine_call_regex("MySQL"))
}

fn postgresql_call() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| engine_call_regex("PostgreSQL"))
}

fn kafka_call() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| engine_call_regex("Kafka"))
}

fn url_call() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| engine_call_regex("URL"))
}

fn distributed_call() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| engine_call_regex("Distributed"))
}

fn buffer_call() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| engine_call_regex("Buffer"))
}

fn kafka_broker_setting() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\bkafka_broker_list\s*=\s*'([^']*)'").expect("valid regex literal")
    })
}

fn kafka_topic_setting() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\bkafka_topic_list\s*=\s*'([^']*)'").expect("valid regex literal")
    })
}

fn dictionary_source() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)\bSOURCE\s*\(\s*CLICKHOUSE\s*\((.*?)\)\s*\)")
            .expect("valid regex literal")
    })
}

fn dictionary_key(key: &'static str) -> &'static Regex {
    static HOST: OnceLock<Regex> = OnceLock::new();
    static PORT: OnceLock<Regex> = OnceLock::new();
    static DB: OnceLock<Regex> = OnceLock::new();
    static TABLE: OnceLock<Regex> = OnceLock::new();
    let cell = match key {
        "HOST" => &HOST,
        "PORT" => &PORT,
        "DB" => &DB,
        _ => &TABLE,
    };
    cell.get_or_init(|| {
        // HOST and PORT may be quoted or bare; DB and TABLE are always quoted.
        let value = match key {
            "HOST" | "PORT" => r#"'?([^'\s)]+)'?"#,
            _ => r"'([^']+)'",
        };
        Regex::new(&format!(r"(?i)\b{key}\s+{value}")).expect("valid regex literal")
    })
}

/// `MySQL('host:port', 'database', 'table', ...)`
pub fn mysql(row: &CatalogRow) -> Vec<DependencyDescriptor> {
    foreign_database(row, mysql_call(), MYSQL_SERVER)
}

/// `PostgreSQL('host:port', 'database', 'table', ...)`
pub fn postgresql(row: &CatalogRow) -> Vec<DependencyDescriptor> {
    foreign_database(row, postgresql_call(), POSTGRESQL_SERVER)
}

fn foreign_database(row: &CatalogRow, call: &Regex, category: &str) -> Vec<DependencyDescriptor> {
    let Some(args) = call_arguments(&row.ddl_text, call) else {
        return Vec::new();
    };
    if args.len() < 3 {
        return Vec::new();
    }

    let host = unquote(&args[0]);
    let database = unquote(&args[1]);
    let table = unquote(&args[2]);
    if host.is_empty() {
        return Vec::new();
    }

    vec![DependencyDescriptor::external(category, host)
        .with_name(format!("{database}.{table}"))
        .with_label(format!("[Table]{database}.{table}"))]
}

/// Kafka engine: `SETTINGS kafka_broker_list = '...', kafka_topic_list = '...'`,
/// or the positional `Kafka('brokers', 'topics', ...)` form.
///
/// Only the first broker of a list becomes the node's address.
pub fn kafka(row: &CatalogRow) -> Vec<DependencyDescriptor> {
    let ddl = &row.ddl_text;
    let settings = kafka_broker_setting()
        .captures(ddl)
        .zip(kafka_topic_setting().captures(ddl))
        .map(|(brokers, topics)| (brokers[1].to_string(), topics[1].to_string()));

    let positional = || {
        let args = call_arguments(ddl, kafka_call())?;
        match args.as_slice() {
            [brokers, topics, ..] => Some((unquote(brokers), unquote(topics))),
            _ => None,
        }
    };

    let Some((brokers, topics)) = settings.or_else(positional) else {
        return Vec::new();
    };

    let broker = brokers.split(',').next().unwrap_or_default().trim();
    if broker.is_empty() || topics.is_empty() {
        return Vec::new();
    }

    vec![DependencyDescriptor::external(KAFKA_SERVER, broker)
        .with_name(topics.clone())
        .with_label(format!("[Topic]{topics}"))]
}

/// `URL('http://...', ...)`
pub fn url(row: &CatalogRow) -> Vec<DependencyDescriptor> {
    let Some(args) = call_arguments(&row.ddl_text, url_call()) else {
        return Vec::new();
    };
    match args.first().map(|a| unquote(a)) {
        Some(url) if !url.is_empty() => vec![DependencyDescriptor::external(HTTP_SERVER, url)],
        _ => Vec::new(),
    }
}

/// Dictionary whose `SOURCE(CLICKHOUSE(HOST ... PORT ... DB ... TABLE ...))`
/// points at a remote catalog server. The clause may span lines and the
/// keys may appear in any order.
pub fn dictionary(row: &CatalogRow) -> Vec<DependencyDescriptor> {
    let Some(clause) = dictionary_source().captures(&row.ddl_text) else {
        return Vec::new();
    };
    let clause = &clause[1];

    let capture = |key| {
        dictionary_key(key)
            .captures(clause)
            .map(|c| c[1].to_string())
    };

    match (capture("HOST"), capture("PORT"), capture("DB"), capture("TABLE")) {
        (Some(host), Some(port), Some(database), Some(table)) => {
            vec![
                DependencyDescriptor::external(CLICKHOUSE_SERVER, format!("{host}:{port}"))
                    .with_name(format!("{database}.{table}"))
                    .with_label(labels::LOAD_FROM),
            ]
        }
        _ => Vec::new(),
    }
}

/// `Distributed(cluster, database, table[, sharding_key[, policy]])`
///
/// The sharding key expression, verbatim, becomes the edge label.
pub fn distributed(row: &CatalogRow) -> Vec<DependencyDescriptor> {
    let Some(args) = call_arguments(&row.ddl_text, distributed_call()) else {
        return Vec::new();
    };
    if args.len() < 3 {
        return Vec::new();
    }

    let database = resolve_database(row, &args[1]);
    let table = unquote(&args[2]);
    if table.is_empty() {
        return Vec::new();
    }
    let sharding_key = args.get(3).cloned().unwrap_or_default();

    vec![DependencyDescriptor::internal(database, table).with_label(sharding_key)]
}

/// `Buffer(database, table, ...)`
pub fn buffer(row: &CatalogRow) -> Vec<DependencyDescriptor> {
    let Some(args) = call_arguments(&row.ddl_text, buffer_call()) else {
        return Vec::new();
    };
    if args.len() < 2 {
        return Vec::new();
    }

    let database = resolve_database(row, &args[0]);
    let table = unquote(&args[1]);
    if table.is_empty() {
        return Vec::new();
    }

    vec![DependencyDescriptor::internal(database, table)]
}

/// An empty or `currentDatabase()` database argument refers to the row's own database.
fn resolve_database(row: &CatalogRow, arg: &str) -> String {
    let database = unquote(arg);
    if database.is_empty() || database.eq_ignore_ascii_case(CURRENT_DATABASE) {
        row.database.clone()
    } else {
        database
    }
}

#[cfg(test)]
#[path = "connectors_test.rs"]
mod tests;
