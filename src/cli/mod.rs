//! Command-line interface definitions

pub mod report;
pub mod summary;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    /// All failure classes are terminal and map to the same code
    pub const FAILURE: i32 = 1;
}

#[derive(Debug, Parser)]
#[command(
    name = "cursor-usage",
    version,
    about = "Inspect Cursor AI usage from locally stored credentials"
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit machine-readable JSON where supported
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to Cursor's state database (defaults to the standard location)
    #[arg(long, global = true, value_name = "PATH", env = "CURSOR_STATE_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the current usage summary (default)
    Summary,
    /// Per-day usage report
    Daily(DailyArgs),
    /// Per-month usage report
    Monthly(MonthlyArgs),
    /// Usage report for the current UTC day
    Today(TodayArgs),
}

#[derive(Debug, Args)]
pub struct DailyArgs {
    /// Number of days to cover
    #[arg(long, default_value_t = 7)]
    pub days: u32,

    /// Include a per-model breakdown
    #[arg(long)]
    pub breakdown: bool,
}

#[derive(Debug, Args)]
pub struct MonthlyArgs {
    /// Number of months to cover
    #[arg(long, default_value_t = 3)]
    pub months: u32,

    /// Include a per-model breakdown
    #[arg(long)]
    pub breakdown: bool,
}

#[derive(Debug, Args)]
pub struct TodayArgs {
    /// Include a per-model breakdown
    #[arg(long)]
    pub breakdown: bool,
}
