//! Lazy occurrence stream for a cron expression.
//!
//! The search walks the calendar forward from the starting instant,
//! skipping whole days and hours that cannot match, and yields qualifying
//! minutes in strictly increasing order. Nonexistent dates (Feb 31 and
//! friends) are never visited because the candidate advances through the
//! real calendar.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{Result, ScheduleError};
use crate::expr::CronExpression;

/// Forward-search horizon for a single next-occurrence search, measured
/// from the previous occurrence (or the starting instant). Ten years
/// clears the longest gap between leap days across a century boundary
/// (eight years); anything that fails to match within the horizon can
/// never match.
pub const MAX_SEARCH_DAYS: i64 = 3_660;

// ── Occurrence iterator ─────────────────────────────────────────────

/// Strictly increasing stream of firing instants, each `> after`.
///
/// Yields `Err(ScheduleError::Unsatisfiable)` once and then fuses if a
/// single search exhausts the horizon.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    expr: &'a CronExpression,
    /// Next candidate minute to examine. Always minute-aligned.
    cursor: NaiveDateTime,
    done: bool,
}

impl<'a> Occurrences<'a> {
    pub(crate) fn new(expr: &'a CronExpression, after: NaiveDateTime) -> Self {
        Self {
            expr,
            cursor: next_minute_boundary(after),
            done: false,
        }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Result<NaiveDateTime>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match find_from(self.expr, self.cursor) {
            Ok(t) => {
                self.cursor = t + Duration::minutes(1);
                Some(Ok(t))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

// ── Search ──────────────────────────────────────────────────────────

/// Round `after` up to the next whole minute, exclusive: an instant
/// exactly on a minute boundary still advances to the following minute,
/// so the starting instant is never re-emitted.
fn next_minute_boundary(after: NaiveDateTime) -> NaiveDateTime {
    let floor = after
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .expect("zero seconds is always a valid time");
    floor + Duration::minutes(1)
}

/// Find the first qualifying minute at or after `start` (minute-aligned).
fn find_from(expr: &CronExpression, start: NaiveDateTime) -> Result<NaiveDateTime> {
    let horizon = start + Duration::days(MAX_SEARCH_DAYS);
    let mut t = start;

    while t <= horizon {
        if !expr.date_matches(t.date()) {
            match t.date().succ_opt() {
                Some(next_day) => t = next_day.and_time(NaiveTime::MIN),
                None => break,
            }
            continue;
        }

        if !expr.hour.matches(t.hour() as u8) {
            t = t
                .date()
                .and_hms_opt(t.hour(), 0, 0)
                .expect("current hour is always a valid time")
                + Duration::hours(1);
            continue;
        }

        if !expr.minute.matches(t.minute() as u8) {
            t += Duration::minutes(1);
            continue;
        }

        return Ok(t);
    }

    Err(ScheduleError::Unsatisfiable {
        expression: expr.source().to_string(),
        horizon_days: MAX_SEARCH_DAYS,
    })
}

// ── Tests ───────────────────────────────────────────────────────────
