//! CLI argument parsing for the phased retrieval workflow.
//!
//! The CLI is intentionally thin: the phase table, retry policy, and report
//! layout live in the core modules, so the same logic serves every command.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint for the phased retrieval workflow.
#[derive(Parser, Debug)]
#[command(
    name = "sfpull",
    version,
    about = "Phased Salesforce metadata retrieval with summary reports",
    after_help = "Commands:\n  run        Retrieve all six phases and write summary reports\n  summarize  Regenerate one phase's summary from disk (no retrieval)\n  phases     Print the fixed phase table\n\nExamples:\n  sfpull run\n  sfpull run --project-dir ~/org-snapshot --tool \"npx sf\"\n  sfpull summarize --phase 2\n  sfpull phases",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level workflow commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Run(RunArgs),
    Summarize(SummarizeArgs),
    Phases,
}

/// Run command inputs for a full six-phase retrieval.
#[derive(Parser, Debug)]
#[command(about = "Retrieve all phases sequentially and write summary reports")]
pub struct RunArgs {
    /// Project root containing the manifest, source, and reports directories
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Path to a JSON run config (defaults to <project-dir>/sfpull.config.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Retrieval CLI command, overriding the configured one
    #[arg(long, value_name = "CMD")]
    pub tool: Option<String>,

    /// Echo failed-attempt log tails to the console
    #[arg(long)]
    pub verbose: bool,
}

/// Summarize command inputs for regenerating a single phase report.
#[derive(Parser, Debug)]
#[command(about = "Regenerate one phase summary from the target directory")]
pub struct SummarizeArgs {
    /// Phase ordinal (1-6)
    #[arg(long, value_name = "N")]
    pub phase: u8,

    /// Project root containing the manifest, source, and reports directories
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Path to a JSON run config (defaults to <project-dir>/sfpull.config.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
