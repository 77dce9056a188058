use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Upcoming-execution timeline for a directory of per-system crontabs.
///
/// Reads one crontab file per system, computes each job's next firing
/// instants from a reference instant, and presents them on a single
/// windowed timeline grouped by job.
#[derive(Parser, Debug)]
#[command(name = "crontide", version, about = "Per-system cron job timeline")]
pub struct CliArgs {
    /// Directory of per-system crontab files (one `<system>.txt` each).
    #[arg(long, env = "CRONTIDE_DIR", default_value = "./crons")]
    pub crons_dir: PathBuf,

    /// Reference instant, `YYYY-MM-DD HH:MM[:SS]` or RFC 3339
    /// (default: current local time).
    #[arg(long)]
    pub at: Option<String>,

    /// Only include jobs belonging to this system.
    #[arg(long)]
    pub system: Option<String>,

    /// Occurrences to compute per job.
    #[arg(long, env = "CRONTIDE_COUNT", default_value_t = 72)]
    pub count: usize,

    /// Timeline window length in days from the reference instant.
    #[arg(long, env = "CRONTIDE_DAYS", default_value_t = 3)]
    pub days: i64,

    /// Write the timeline rows to this file.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Row export format.
    #[arg(long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Chart width in time columns.
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Skip the terminal chart.
    #[arg(long)]
    pub no_chart: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}
