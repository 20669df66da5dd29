//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use dg_core::OutputFormat;

/// ddlgraph - Table dependency graphs from a database catalog export
#[derive(Parser, Debug)]
#[command(name = "dg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Catalog export file (.json, .jsonl, .ndjson, .yml); overrides `catalog` in dg.yml
    #[arg(long, global = true, env = "DG_CATALOG")]
    pub catalog: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the dependency graph of a database or a single object
    Graph(GraphArgs),

    /// List catalog objects and their dependencies
    Ls(LsArgs),
}

/// Arguments for the graph command
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Database to seed from (default: `database` in dg.yml)
    pub database: Option<String>,

    /// Seed from this single object instead of the whole database
    #[arg(short, long)]
    pub table: Option<String>,

    /// Output format (default: `output` in dg.yml, else json)
    #[arg(short, long, value_enum)]
    pub output: Option<GraphOutput>,
}

/// Graph output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphOutput {
    /// `{nodes, edges}` JSON
    Json,
    /// Graphviz DOT
    Dot,
    /// Human-readable edge table
    Table,
}

impl From<OutputFormat> for GraphOutput {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => GraphOutput::Json,
            OutputFormat::Dot => GraphOutput::Dot,
            OutputFormat::Table => GraphOutput::Table,
        }
    }
}

/// Arguments for the ls command
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Only list objects of this database
    pub database: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: LsOutput,
}

/// Ls output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsOutput {
    /// Human-readable table
    Table,
    /// JSON array
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
