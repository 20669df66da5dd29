//! Configuration types and parsing for dg.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names searched by [`Config::load_from_dir`], in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["dg.yml", "dg.yaml"];

/// Configuration from dg.yml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path of the catalog export, relative to the config directory
    #[serde(default)]
    pub catalog: Option<String>,

    /// Default database to seed the graph from
    #[serde(default)]
    pub database: Option<String>,

    /// Default output format for `dg graph`
    #[serde(default)]
    pub output: OutputFormat,
}

/// Output format of a rendered graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `{nodes, edges}` JSON for graph renderers
    #[default]
    Json,
    /// Graphviz DOT
    Dot,
    /// Human-readable edge table
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Dot => write!(f, "dot"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        // An empty file is a valid, all-defaults config
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory.
    /// Looks for dg.yml or dg.yaml and falls back to defaults when neither exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
        {
            Some(path) => Self::load(&path),
            None => {
                log::debug!("No config file in {}, using defaults", dir.display());
                Ok(Self::default())
            }
        }
    }

    /// Catalog path resolved against `root`, if configured
    pub fn catalog_path_absolute(&self, root: &Path) -> Option<PathBuf> {
        self.catalog.as_ref().map(|c| {
            let path = Path::new(c);
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                root.join(path)
            }
        })
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if let Some(catalog) = &self.catalog {
            if catalog.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: "catalog path cannot be empty".to_string(),
                });
            }
        }

        if let Some(database) = &self.database {
            if database.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: "database cannot be empty".to_string(),
                });
            }
            if database.contains('.') {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "database '{}' must be a bare database name, not a qualified object",
                        database
                    ),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
