use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "waybill",
    about = "Waybill — conservation checks for item transfer plans",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Validator settings file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Reject staging points that reuse a declared pick-up location
    #[arg(long, global = true)]
    pub strict_staging: bool,

    /// Reject plans with more trips than this
    #[arg(long, global = true)]
    pub max_trips: Option<usize>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check that a plan delivers every item to its final destinations
    Validate(PlanArgs),
    /// Show the ledger after each trip of a plan
    Replay(PlanArgs),
}

#[derive(Args)]
pub struct PlanArgs {
    /// Plan document (.json or .toml)
    pub plan: PathBuf,
}
