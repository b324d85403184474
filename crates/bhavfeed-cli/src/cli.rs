//! CLI argument definitions for bhavfeed.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `indices` | Download and normalize the NSE Indices feed |
//! | `equities` | Download and normalize the NSE Equities feed |
//! | `futures` | Download and normalize the NSE Futures feed |
//! | `all` | Run all three feeds for the same dates |
//!
//! # Examples
//!
//! ```bash
//! # One trading day
//! bhavfeed equities 2014-05-28
//!
//! # A date range, weekends skipped
//! bhavfeed all 2014-05-01 --end 2014-05-31
//!
//! # Muhurat trading falls on a Saturday some years
//! bhavfeed indices 2014-10-23 --include-weekends
//!
//! # See what would be downloaded
//! bhavfeed futures 2014-05-28 --dry-run
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Download and normalize NSE end-of-day market data.
///
/// Fetches the exchange's daily files, folds their inconsistent raw
/// shapes into one canonical CSV table per category and date, and prints
/// a JSON summary of each run.
#[derive(Debug, Parser)]
#[command(
    name = "bhavfeed",
    author,
    version,
    about = "NSE end-of-day market-data pipeline"
)]
pub struct Cli {
    /// Directory for the processed output tables.
    #[arg(long, global = true, default_value = "processed_data")]
    pub output_dir: PathBuf,

    /// Log planned downloads without fetching or writing anything.
    #[arg(long, global = true, default_value_t = false)]
    pub dry_run: bool,

    /// Pretty-print the JSON run summaries.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat runs that produced warnings as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Fetch timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 30_000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download and normalize the NSE Indices feed.
    Indices(RangeArgs),

    /// Download and normalize the NSE Equities feed.
    Equities(RangeArgs),

    /// Download and normalize the NSE Futures feed.
    Futures(RangeArgs),

    /// Run all three category feeds for the same dates.
    All(RangeArgs),
}

/// Date-range arguments shared by every command.
#[derive(Debug, Args)]
pub struct RangeArgs {
    /// First trading date to process (YYYY-MM-DD).
    pub start: String,

    /// Last trading date to process; defaults to the start date.
    #[arg(long)]
    pub end: Option<String>,

    /// Also process Saturdays and Sundays (special sessions).
    #[arg(long, default_value_t = false)]
    pub include_weekends: bool,
}
