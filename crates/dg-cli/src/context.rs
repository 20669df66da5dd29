//! Runtime context for CLI commands

use anyhow::{Context, Result};
use dg_core::{load_catalog, CatalogIndex, Config};
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Runtime context containing the loaded config and catalog index
pub struct RuntimeContext {
    /// Effective configuration
    pub config: Config,

    /// Index over every loaded catalog row
    pub index: CatalogIndex,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        // Load config from custom path or the working directory
        let (config, root) = if let Some(config_path) = &args.config {
            let path = Path::new(config_path);
            let config = Config::load(path).context("Failed to load configuration file")?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (config, root)
        } else {
            let root = PathBuf::from(".");
            let config = Config::load_from_dir(&root).context("Failed to load configuration")?;
            (config, root)
        };

        let catalog_path = resolve_catalog_path(args, &config, &root)?;
        if args.verbose {
            eprintln!("[verbose] Loading catalog from {}", catalog_path.display());
        }

        let rows = load_catalog(&catalog_path)
            .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;
        let index = CatalogIndex::new(rows);
        if args.verbose {
            eprintln!("[verbose] Indexed {} catalog rows", index.len());
        }

        Ok(Self {
            config,
            index,
            verbose: args.verbose,
        })
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }

    /// Seed database from the command line, else from dg.yml
    pub fn seed_database(&self, database: Option<&str>) -> Result<String> {
        database
            .or(self.config.database.as_deref())
            .map(str::to_string)
            .context("No database given; pass one on the command line or set `database` in dg.yml")
    }
}

/// `--catalog` (relative to the working directory) wins over `catalog` in
/// dg.yml (relative to the config file).
fn resolve_catalog_path(args: &GlobalArgs, config: &Config, root: &Path) -> Result<PathBuf> {
    if let Some(catalog) = &args.catalog {
        return Ok(PathBuf::from(catalog));
    }
    config
        .catalog_path_absolute(root)
        .context("No catalog file given; pass --catalog or set `catalog` in dg.yml")
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
