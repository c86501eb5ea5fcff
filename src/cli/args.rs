//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    depreciate::DepreciateCommands, fees::FeesCommands, load::LoadCommands,
    report::ReportCommands, storage::StorageArgs, workflow::WorkflowCommands,
};

#[derive(Parser)]
#[command(name = "fcore")]
#[command(author, version, about = "Freight ERP calculation core")]
#[command(long_about = "Depreciation runs, customs fee and container storage roll-ups, dashboard reports and heavy-lift load checks over YAML or JSON record files.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Extra config file, applied over the user and working-directory configs
    #[arg(long, global = true, env = "FCORE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Monthly depreciation runs and schedules
    #[command(subcommand)]
    Depreciate(DepreciateCommands),

    /// Container free time and storage charges
    Storage(StorageArgs),

    /// Customs and port fee totals and form checks
    #[command(subcommand)]
    Fees(FeesCommands),

    /// Dashboard reports (pipeline, payments, catalogue)
    #[command(subcommand)]
    Report(ReportCommands),

    /// Crane lift and axle load checks
    #[command(subcommand)]
    Load(LoadCommands),

    /// Assessment status transitions
    #[command(subcommand)]
    Workflow(WorkflowCommands),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables and summaries
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
}
