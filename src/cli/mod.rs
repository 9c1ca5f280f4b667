//! Command-line parsing for the `lens` binary.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! statistics code; dispatch lives in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::RegimeSource;
use crate::indicators::Category;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "lens", version, about = "Economic dashboard statistics over dated indicator snapshots")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize one indicator, or every indicator of a dataset.
    Summary(SummaryArgs),
    /// Print the up/down/neutral label of an indicator.
    Trend(KeyArgs),
    /// Min-max normalize one field, or every field of the dataset.
    Normalize(NormalizeArgs),
    /// Clip an indicator to mean ± z·std.
    Winsorize(WinsorizeArgs),
    /// Stitch the last 12 actual records onto a forecast series.
    Combine(CombineArgs),
    /// List known indicators.
    Indicators(IndicatorArgs),
}

/// Where to read a dataset from.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Snapshot JSON or CSV file (defaults to $LENS_SNAPSHOT_PATH).
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Dataset name inside a multi-dataset snapshot (e.g. markets, economics).
    #[arg(short = 'd', long)]
    pub dataset: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Indicator key; omit to summarize every indicator.
    #[arg(short = 'k', long)]
    pub key: Option<String>,

    /// Regime column used for expansion/recession statistics (defaults to $LENS_REGIME or us).
    #[arg(short = 'r', long, value_enum)]
    pub regime: Option<RegimeSource>,

    /// Write the dataset report as JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct KeyArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Indicator key.
    #[arg(short = 'k', long)]
    pub key: String,
}

#[derive(Debug, Args, Clone)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only normalize this field; omit to normalize every field.
    #[arg(short = 'k', long)]
    pub key: Option<String>,

    /// Rows to print.
    #[arg(long, default_value_t = 20)]
    pub rows: usize,

    /// Write the normalized series as CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct WinsorizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Indicator key.
    #[arg(short = 'k', long)]
    pub key: String,

    /// Clipping threshold in standard deviations (defaults to $LENS_Z_THRESHOLD or 3).
    #[arg(short = 'z', long)]
    pub z: Option<f64>,

    /// Rows to print.
    #[arg(long, default_value_t = 20)]
    pub rows: usize,

    /// Write the winsorized series as CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct CombineArgs {
    /// File holding the actual series.
    #[arg(long, value_name = "FILE")]
    pub actual: PathBuf,

    /// Dataset name inside the actual file.
    #[arg(long)]
    pub actual_dataset: Option<String>,

    /// File holding the forecast series.
    #[arg(long, value_name = "FILE")]
    pub forecast: PathBuf,

    /// Dataset name inside the forecast file.
    #[arg(long)]
    pub forecast_dataset: Option<String>,

    /// Rows to print.
    #[arg(long, default_value_t = 40)]
    pub rows: usize,

    /// Write the combined series as CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct IndicatorArgs {
    /// Only list recommended indicators.
    #[arg(long)]
    pub recommended: bool,

    /// Only list indicators in this category.
    #[arg(short = 'c', long, value_enum)]
    pub category: Option<Category>,
}
