//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

use crate::data::loader::DEFAULT_DATA_PATH;

/// Electric vehicle population dashboard
///
/// Loads a registration table (CSV, JSON or Parquet), computes headline
/// metrics and grouped counts, and shows them in a window.
///
/// Examples:
///   ev-dashboard
///   ev-dashboard data/Electric_Vehicle_Population_Data.csv
///   ev-dashboard ev.parquet --headless
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Dataset to load
    #[arg(
        value_name = "FILE",
        default_value = DEFAULT_DATA_PATH,
        env = "EV_DASHBOARD_DATA"
    )]
    pub data: PathBuf,

    /// Print a plain-text report to stdout instead of opening a window
    #[arg(long)]
    pub headless: bool,

    /// Initial window width in points
    #[arg(long, default_value = "1200", value_name = "POINTS")]
    pub width: f32,

    /// Initial window height in points
    #[arg(long, default_value = "800", value_name = "POINTS")]
    pub height: f32,
}
