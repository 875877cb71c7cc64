use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use stockmatrix_observability::LogFormat;

/// Inventory policy engine: ABC/LMH classification, safety stock, reorder
/// point, EOQ and a replenishment action per part.
#[derive(Debug, Parser)]
#[command(name = "stockmatrix", version)]
pub struct Cli {
    /// Log output format (logs go to stderr).
    #[arg(long, global = true, default_value = "json", value_parser = parse_log_format)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the analysis over transaction and inventory CSV files.
    Run(RunArgs),

    /// Generate a seeded sample dataset and run the analysis on it.
    Demo(DemoArgs),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full-precision report document.
    Json,
    /// One row per part, values rounded to 2 decimals.
    Csv,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Transactions CSV (part_id, date, quantity, unit_price).
    #[arg(long)]
    pub transactions: PathBuf,

    /// Inventory CSV (part_id, on_hand, unit_cost, lead_time_days, ...).
    #[arg(long)]
    pub inventory: PathBuf,

    /// Analysis date, YYYY-MM-DD (defaults to today).
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// JSON configuration file; absent fields keep their defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Abort on the first malformed record.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Number of sample parts.
    #[arg(long, default_value_t = 200)]
    pub parts: usize,

    #[arg(long, default_value_t = 7)]
    pub seed: u64,

    /// Analysis date, YYYY-MM-DD (defaults to today).
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

fn parse_log_format(raw: &str) -> Result<LogFormat, String> {
    raw.parse().map_err(|e: stockmatrix_observability::ParseLogFormatError| e.to_string())
}
