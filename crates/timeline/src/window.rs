//! Inclusive time window for occurrence filtering.

use chrono::{Duration, NaiveDateTime};

/// A time range, inclusive on both ends. Callers must supply
/// `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Window {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        debug_assert!(start <= end, "window start must not exceed end");
        Self { start, end }
    }

    /// Window of `days` days starting at `anchor`.
    pub fn spanning_days(anchor: NaiveDateTime, days: i64) -> Self {
        Self::new(anchor, anchor + Duration::days(days))
    }

    /// Whether `t` falls inside the window, both endpoints included.
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t <= self.end
    }
}

// ── Tests ───────────────────────────────────────────────────────────
