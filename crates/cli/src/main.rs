mod cli;
mod export;
mod loader;
mod render;

use std::fs::File;
use std::io;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::Parser;
use tracing::{info, warn};

use crontide_timeline::{build_timeline, Window};

use crate::cli::{CliArgs, ExportFormat};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    // Resolve "now" exactly once; everything downstream takes the anchor
    // as an explicit parameter. A bad reference instant aborts the run
    // before any output is produced.
    let anchor = match &args.at {
        Some(text) => parse_anchor(text)
            .with_context(|| format!("invalid reference instant '{}'", text))?,
        None => Local::now().naive_local(),
    };

    let mut jobs = loader::load_dir(&args.crons_dir).with_context(|| {
        format!(
            "failed to read crontab directory '{}'",
            args.crons_dir.display()
        )
    })?;

    if let Some(system) = &args.system {
        // Filter before evaluation so excluded systems never surface
        // schedule errors.
        jobs.retain(|job| &job.system == system);
    }
    info!(jobs = jobs.len(), anchor = %anchor, "loaded crontab entries");

    let window = Window::spanning_days(anchor, args.days);
    let timeline = build_timeline(&jobs, anchor, args.count, window);

    if !timeline.diagnostics.is_empty() {
        warn!(
            skipped = timeline.diagnostics.len(),
            "some jobs were dropped; see warnings above"
        );
    }

    if let Some(path) = &args.export {
        let mut file = File::create(path)
            .with_context(|| format!("failed to create '{}'", path.display()))?;
        match args.format {
            ExportFormat::Csv => export::write_csv(&mut file, &timeline.entries)
                .context("failed to write CSV export")?,
            ExportFormat::Json => export::write_json(&mut file, &timeline.entries)
                .context("failed to write JSON export")?,
        }
        info!(
            path = %path.display(),
            rows = timeline.entries.len(),
            "exported timeline"
        );
    }

    if !args.no_chart {
        let mut stdout = io::stdout();
        render::render(
            &mut stdout,
            &timeline,
            &window,
            args.system.as_deref(),
            args.width,
        )
        .context("failed to render timeline chart")?;
    }

    Ok(())
}

/// Parse a user-supplied reference instant.
fn parse_anchor(text: &str) -> Result<NaiveDateTime> {
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(t);
        }
    }
    if let Ok(t) = chrono::DateTime::parse_from_rfc3339(text) {
        return Ok(t.naive_local());
    }
    bail!("expected 'YYYY-MM-DD HH:MM[:SS]' or an RFC 3339 timestamp")
}

// ── Tests ───────────────────────────────────────────────────────────
