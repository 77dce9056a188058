//! Windowed timeline merge across many jobs.
//!
//! Each job is parsed and evaluated independently (failure drops that job
//! only), occurrences are filtered to the window, and a single ordering
//! pass assigns display ranks and sequences the entries:
//!
//! - distinct labels are ranked by their earliest in-window occurrence
//!   (ties broken by label text), giving every job one stable visual row;
//! - entries are sequenced chronologically (ties broken by rank).

use std::collections::HashMap;

use chrono::NaiveDateTime;
use rayon::prelude::*;
use tracing::{debug, warn};

use crontide_schedule::ScheduleError;

use crate::entry::{Occurrence, TimelineEntry};
use crate::record::{JobSpec, ScheduleRecord};
use crate::window::Window;

// ── Result types ────────────────────────────────────────────────────

/// One dropped job and the error that dropped it.
#[derive(Debug, Clone)]
pub struct JobDiagnostic {
    pub system: String,
    pub schedule: String,
    pub command: String,
    pub error: ScheduleError,
}

/// The artifact of one aggregation run: ordered entries plus a
/// diagnostic per dropped job, in job input order.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pub entries: Vec<TimelineEntry>,
    pub diagnostics: Vec<JobDiagnostic>,
}

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct display rows.
    pub fn row_count(&self) -> usize {
        self.entries.iter().map(|e| e.row + 1).max().unwrap_or(0)
    }
}

// ── Aggregation ─────────────────────────────────────────────────────

/// Compute the windowed timeline for `jobs` from the reference instant
/// `anchor`, evaluating up to `per_job_limit` occurrences per job.
///
/// Jobs whose schedule fails to parse or evaluate are skipped and
/// reported in `Timeline::diagnostics`; one bad job never aborts the
/// run. Callers filtering by system must do so on `jobs` before calling,
/// so excluded systems never surface errors.
pub fn build_timeline(
    jobs: &[JobSpec],
    anchor: NaiveDateTime,
    per_job_limit: usize,
    window: Window,
) -> Timeline {
    // Independent, pure per-job evaluation; collect preserves input
    // order so diagnostics and the merge are deterministic.
    let evaluated: Vec<std::result::Result<Vec<Occurrence>, JobDiagnostic>> = jobs
        .par_iter()
        .map(|job| evaluate_job(job, anchor, per_job_limit))
        .collect();

    let mut occurrences = Vec::new();
    let mut diagnostics = Vec::new();
    for result in evaluated {
        match result {
            Ok(job_occurrences) => occurrences.extend(job_occurrences),
            Err(diag) => {
                warn!(
                    system = %diag.system,
                    schedule = %diag.schedule,
                    error = %diag.error,
                    "skipping job"
                );
                diagnostics.push(diag);
            }
        }
    }

    let windowed: Vec<Occurrence> = occurrences
        .into_iter()
        .filter(|o| window.contains(o.execution_time))
        .collect();
    debug!(entries = windowed.len(), "occurrences inside window");

    Timeline {
        entries: rank_and_order(windowed),
        diagnostics,
    }
}

fn evaluate_job(
    job: &JobSpec,
    anchor: NaiveDateTime,
    per_job_limit: usize,
) -> std::result::Result<Vec<Occurrence>, JobDiagnostic> {
    let diag = |error: ScheduleError| JobDiagnostic {
        system: job.system.clone(),
        schedule: job.schedule.clone(),
        command: job.command.clone(),
        error,
    };

    let record = ScheduleRecord::parse(job).map_err(&diag)?;
    let times = record
        .expression
        .next_occurrences(anchor, per_job_limit)
        .map_err(&diag)?;

    Ok(times
        .into_iter()
        .map(|execution_time| Occurrence {
            system: record.system.clone(),
            schedule: record.expression.source().to_string(),
            command: record.command.clone(),
            execution_time,
        })
        .collect())
}

// ── Ordering pass ───────────────────────────────────────────────────

/// Assign display ranks and sequence entries.
///
/// Ranking orders distinct labels only; it never reorders occurrences.
/// The entry sequence is chronological with rank as the tie-break.
fn rank_and_order(windowed: Vec<Occurrence>) -> Vec<TimelineEntry> {
    let mut earliest: HashMap<String, NaiveDateTime> = HashMap::new();
    for occurrence in &windowed {
        let label = label_of(occurrence);
        earliest
            .entry(label)
            .and_modify(|t| {
                if occurrence.execution_time < *t {
                    *t = occurrence.execution_time;
                }
            })
            .or_insert(occurrence.execution_time);
    }

    let mut labels: Vec<(String, NaiveDateTime)> = earliest.into_iter().collect();
    labels.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    let rank: HashMap<String, usize> = labels
        .into_iter()
        .enumerate()
        .map(|(row, (label, _))| (label, row))
        .collect();

    let mut entries: Vec<TimelineEntry> = windowed
        .into_iter()
        .map(|o| {
            let label = label_of(&o);
            let row = rank[&label];
            TimelineEntry {
                system: o.system,
                schedule: o.schedule,
                command: o.command,
                label,
                execution_time: o.execution_time,
                row,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        a.execution_time
            .cmp(&b.execution_time)
            .then_with(|| a.row.cmp(&b.row))
    });

    entries
}

fn label_of(occurrence: &Occurrence) -> String {
    format!("{}: {}", occurrence.system, occurrence.command)
}

// ── Tests ───────────────────────────────────────────────────────────
