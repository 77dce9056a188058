//! Colored terminal chart for the computed timeline.
//!
//! One visual row per display rank, in the aggregator's rank order;
//! occurrences are placed into time columns by linear interpolation over
//! the window. Ordering and windowing are consumed verbatim from the
//! aggregator, never re-derived.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

use chrono::NaiveDateTime;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crontide_timeline::{Timeline, Window};

/// Color palette cycled over systems in sorted order.
const PALETTE: &[Color] = &[
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
    Color::Red,
    Color::DarkCyan,
    Color::DarkGreen,
    Color::DarkYellow,
    Color::DarkMagenta,
];

const LABEL_WIDTH: usize = 32;
const MIN_WIDTH: usize = 24;

// ── Rendering ───────────────────────────────────────────────────────

/// Render the timeline as a per-job scatter chart, `width` time columns
/// wide. `filter` is the active system-name filter, shown in the
/// heading when set.
pub fn render<W: Write>(
    out: &mut W,
    timeline: &Timeline,
    window: &Window,
    filter: Option<&str>,
    width: usize,
) -> io::Result<()> {
    let width = width.max(MIN_WIDTH);

    match filter {
        Some(system) => execute!(
            out,
            Print(format!("upcoming cron executions for '{}'\n\n", system))
        )?,
        None => execute!(out, Print("upcoming cron executions by system\n\n"))?,
    }

    if timeline.entries.is_empty() {
        execute!(out, Print("no scheduled executions inside the window\n"))?;
        return Ok(());
    }

    let color_of = system_colors(timeline);
    let rows = layout_rows(timeline, window, width);

    // Time axis: start stamp left, end stamp right, ruler beneath.
    let start = window.start.format("%m-%d %H:%M").to_string();
    let end = window.end.format("%m-%d %H:%M").to_string();
    let gap = width.saturating_sub(start.len() + end.len());
    execute!(
        out,
        Print(" ".repeat(LABEL_WIDTH + 2)),
        Print(&start),
        Print(" ".repeat(gap)),
        Print(&end),
        Print("\n"),
        Print(" ".repeat(LABEL_WIDTH + 2)),
        Print(format!("|{}|\n", "-".repeat(width.saturating_sub(2)))),
    )?;

    for row in &rows {
        execute!(out, Print(format!("{:<1$}  ", fit_label(&row.label), LABEL_WIDTH)))?;
        for cell in &row.cells {
            match cell {
                Some(system) => {
                    let color = color_of.get(system.as_str()).copied().unwrap_or(Color::White);
                    execute!(out, SetForegroundColor(color), Print("●"), ResetColor)?;
                }
                None => execute!(out, Print(" "))?,
            }
        }
        execute!(out, Print("\n"))?;
    }

    // Legend: one colored marker per system.
    execute!(out, Print("\nsystems:"))?;
    for (system, color) in &color_of {
        execute!(
            out,
            Print("  "),
            SetForegroundColor(*color),
            Print("●"),
            ResetColor,
            Print(format!(" {}", system)),
        )?;
    }
    execute!(out, Print("\n"))?;

    Ok(())
}

// ── Layout ──────────────────────────────────────────────────────────

struct Row {
    label: String,
    /// One cell per time column; occupied cells carry the system name.
    cells: Vec<Option<String>>,
}

/// Map systems to palette colors in sorted order, so colors are stable
/// across runs with the same system set.
fn system_colors(timeline: &Timeline) -> BTreeMap<String, Color> {
    let systems: BTreeSet<&str> = timeline.entries.iter().map(|e| e.system.as_str()).collect();
    systems
        .into_iter()
        .enumerate()
        .map(|(i, system)| (system.to_string(), PALETTE[i % PALETTE.len()]))
        .collect()
}

fn layout_rows(timeline: &Timeline, window: &Window, width: usize) -> Vec<Row> {
    let mut rows: Vec<Row> = (0..timeline.row_count())
        .map(|_| Row {
            label: String::new(),
            cells: vec![None; width],
        })
        .collect();

    for entry in &timeline.entries {
        let row = &mut rows[entry.row];
        if row.label.is_empty() {
            row.label = entry.label.clone();
        }
        let col = column_for(entry.execution_time, window, width);
        row.cells[col] = Some(entry.system.clone());
    }

    rows
}

/// Column index for an in-window instant: linear interpolation over the
/// window span. Zero-length windows collapse to column 0.
fn column_for(t: NaiveDateTime, window: &Window, width: usize) -> usize {
    let span = (window.end - window.start).num_minutes();
    if span <= 0 || width < 2 {
        return 0;
    }
    let offset = (t - window.start).num_minutes().clamp(0, span);
    ((offset as f64 / span as f64) * (width - 1) as f64).round() as usize
}

/// Truncate a label to the label column, marking the cut with an
/// ellipsis.
fn fit_label(label: &str) -> String {
    if label.chars().count() <= LABEL_WIDTH {
        return label.to_string();
    }
    let mut fitted: String = label.chars().take(LABEL_WIDTH - 1).collect();
    fitted.push('…');
    fitted
}

// ── Tests ───────────────────────────────────────────────────────────
