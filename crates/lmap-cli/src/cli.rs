//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// lineage-mapper - table-level lineage from a folder of SQL files
#[derive(Parser, Debug)]
#[command(name = "lmap")]
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
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: lineage.yml or lineage.yaml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the lineage graph and write lineage.md / lineage.json
    Lineage(LineageArgs),

    /// Show what each SQL file produces and reads
    Parse(ParseArgs),

    /// Convert a Mermaid lineage markdown file into the JSON payload
    Render(RenderArgs),
}

/// Arguments for the lineage command
#[derive(Args, Debug)]
pub struct LineageArgs {
    /// SQL folder (overrides sql_folder_path)
    #[arg(short, long)]
    pub sql_dir: Option<String>,

    /// Output directory (overrides lineage_output)
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Also print the graph to stdout in this format
    #[arg(short, long, value_enum)]
    pub format: Option<LineageFormat>,

    /// Only print this table and its lineage
    #[arg(short, long)]
    pub model: Option<String>,

    /// Which side of --model to include
    #[arg(short, long, value_enum, default_value = "both")]
    pub direction: LineageDirectionArg,

    /// Override the tokenizer dialect
    #[arg(long)]
    pub dialect: Option<String>,

    /// Do not write lineage.md / lineage.json
    #[arg(long)]
    pub no_write: bool,

    /// Exit with code 1 if any file was skipped
    #[arg(long)]
    pub fail_on_skip: bool,
}

/// Stdout formats for the lineage command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineageFormat {
    /// Mermaid flowchart text
    Mermaid,
    /// Node/edge JSON payload
    Json,
    /// Graphviz DOT
    Dot,
    /// Human-readable table
    Table,
}

/// Lineage direction for --model
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineageDirectionArg {
    /// Tables the model reads from
    Upstream,
    /// Tables reading from the model
    Downstream,
    /// Both directions
    Both,
}

/// Arguments for the parse command
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// SQL folder (overrides sql_folder_path)
    #[arg(short, long)]
    pub sql_dir: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "deps")]
    pub output: ParseOutput,

    /// Override the tokenizer dialect
    #[arg(long)]
    pub dialect: Option<String>,
}

/// Parse output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutput {
    /// Produced table, CTEs and upstream tables per file
    Deps,
    /// JSON output
    Json,
}

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Markdown file containing a ```mermaid block
    #[arg(short, long)]
    pub input: String,

    /// Write the JSON payload here instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
