//! Error types for dg-core

use thiserror::Error;

/// Core error type for ddlgraph
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Invalid configuration value
    #[error("[C002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C003: Catalog file not found
    #[error("[C003] Catalog file not found: {path}")]
    CatalogNotFound { path: String },

    /// C004: Catalog file has an extension we cannot read
    #[error("[C004] Unsupported catalog format '{extension}' for {path}. Use .json, .jsonl, .ndjson, .yml or .yaml")]
    CatalogUnsupportedFormat { path: String, extension: String },

    /// C005: A catalog row failed to deserialize
    #[error("[C005] Failed to parse catalog {path} at line {line}: {message}")]
    CatalogParseError {
        path: String,
        line: usize,
        message: String,
    },

    /// C006: IO error with file path context
    #[error("[C006] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C007: YAML parse error
    #[error("[C007] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
