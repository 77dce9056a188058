//! Occurrence and timeline entry types.

use chrono::NaiveDateTime;
use serde::Serialize;

/// One concrete future firing of a job. Transient: produced by
/// evaluation, consumed by the windowing merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub system: String,
    /// Original expression text.
    pub schedule: String,
    pub command: String,
    pub execution_time: NaiveDateTime,
}

/// The aggregator's externally visible unit: one windowed occurrence
/// carrying its label's display rank.
///
/// Labels are not unique per entry (the same job recurs at multiple
/// times), but every entry of a label shares one `row`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub system: String,
    pub schedule: String,
    pub command: String,
    /// `"system: command"`.
    pub label: String,
    pub execution_time: NaiveDateTime,
    /// Stable display rank: labels ordered by earliest occurrence, ties
    /// broken by label text.
    pub row: usize,
}
