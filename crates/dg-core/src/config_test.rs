use super::*;
use tempfile::TempDir;

#[test]
fn test_parse_minimal_config() {
    let config: Config = serde_yaml::from_str("database: analytics").unwrap();
    assert_eq!(config.database.as_deref(), Some("analytics"));
    assert!(config.catalog.is_none());
    assert_eq!(config.output, OutputFormat::Json);
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
catalog: exports/tables.jsonl
database: analytics
output: dot
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.output, OutputFormat::Dot);
    let root = PathBuf::from("/srv/console");
    assert_eq!(
        config.catalog_path_absolute(&root),
        Some(root.join("exports/tables.jsonl"))
    );
}

#[test]
fn test_absolute_catalog_path_is_kept() {
    let config = Config {
        catalog: Some("/data/tables.json".to_string()),
        ..Config::default()
    };
    assert_eq!(
        config.catalog_path_absolute(Path::new("/elsewhere")),
        Some(PathBuf::from("/data/tables.json"))
    );
}

#[test]
fn test_unknown_fields_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("databse: typo");
    assert!(result.is_err());
}

#[test]
fn test_output_format_display() {
    assert_eq!(OutputFormat::Json.to_string(), "json");
    assert_eq!(OutputFormat::Dot.to_string(), "dot");
    assert_eq!(OutputFormat::Table.to_string(), "table");
}

#[test]
fn test_load_missing_file() {
    let err = Config::load(Path::new("/nonexistent/dg.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_from_dir_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_from_dir_prefers_yml() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("dg.yml"), "database: first").unwrap();
    std::fs::write(dir.path().join("dg.yaml"), "database: second").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.database.as_deref(), Some("first"));
}

#[test]
fn test_load_empty_file_is_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dg.yaml");
    std::fs::write(&path, "\n").unwrap();
    assert_eq!(Config::load(&path).unwrap(), Config::default());
}

#[test]
fn test_validate_rejects_qualified_database() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dg.yml");
    std::fs::write(&path, "database: db.table").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_validate_rejects_empty_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dg.yml");
    std::fs::write(&path, "catalog: \"  \"").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}
