//! Job definitions: raw crontab triples and their parsed form.

use crontide_schedule::{CronExpression, Result};

// ── Raw job definition ──────────────────────────────────────────────

/// A raw (system, schedule, command) triple as read from a crontab
/// source. Parsing happens per job during aggregation so that malformed
/// schedules surface as diagnostics instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    /// Owning system, e.g. the crontab file's stem.
    pub system: String,
    /// Five-field cron expression text.
    pub schedule: String,
    /// Command text, opaque to the evaluator.
    pub command: String,
}

impl JobSpec {
    pub fn new(
        system: impl Into<String>,
        schedule: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            system: system.into(),
            schedule: schedule.into(),
            command: command.into(),
        }
    }
}

// ── Parsed schedule record ──────────────────────────────────────────

/// A parsed schedule record. Immutable once constructed; owned by the
/// aggregator for the duration of one run.
#[derive(Debug, Clone)]
pub struct ScheduleRecord {
    pub system: String,
    pub expression: CronExpression,
    pub command: String,
}

impl ScheduleRecord {
    /// Parse a raw job's schedule text.
    pub fn parse(spec: &JobSpec) -> Result<Self> {
        Ok(Self {
            system: spec.system.clone(),
            expression: spec.schedule.parse()?,
            command: spec.command.clone(),
        })
    }

    /// Display label shared by all of this job's occurrences.
    pub fn label(&self) -> String {
        format!("{}: {}", self.system, self.command)
    }
}

// ── Tests ───────────────────────────────────────────────────────────
