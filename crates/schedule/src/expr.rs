//! Five-field cron expression: parsing and instant matching.
//!
//! Field order is `minute hour day-of-month month day-of-week`. Day
//! selection follows the conventional cron OR rule: when both day fields
//! are restricted, a day qualifies if either matches; when exactly one is
//! restricted, that field alone governs.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{Result, ScheduleError};
use crate::field::{self, CronField};
use crate::occurrences::Occurrences;

// ── Cron expression ─────────────────────────────────────────────────

/// A parsed five-field cron expression.
///
/// Immutable once parsed. Every field's accepted set is non-empty; an
/// empty match is a parse error, never a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronExpression {
    pub(crate) minute: CronField,
    pub(crate) hour: CronField,
    pub(crate) day_of_month: CronField,
    pub(crate) month: CronField,
    pub(crate) day_of_week: CronField,
    source: String,
}

impl CronExpression {
    /// Parse expression text into its five fields.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(ScheduleError::InvalidExpression {
                expression: trimmed.to_string(),
                found: fields.len(),
            });
        }

        Ok(Self {
            minute: CronField::parse(fields[0], field::MINUTE)?,
            hour: CronField::parse(fields[1], field::HOUR)?,
            day_of_month: CronField::parse(fields[2], field::DAY_OF_MONTH)?,
            month: CronField::parse(fields[3], field::MONTH)?,
            day_of_week: CronField::parse(fields[4], field::DAY_OF_WEEK)?,
            source: trimmed.to_string(),
        })
    }

    /// The original expression text, whitespace-trimmed.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the expression fires at `t` (minute resolution; seconds
    /// are ignored).
    pub fn matches(&self, t: NaiveDateTime) -> bool {
        self.date_matches(t.date())
            && self.hour.matches(t.hour() as u8)
            && self.minute.matches(t.minute() as u8)
    }

    /// Whether `date` qualifies: its month matches and the day passes the
    /// day-of-month/day-of-week OR rule.
    pub(crate) fn date_matches(&self, date: NaiveDate) -> bool {
        if !self.month.matches(date.month() as u8) {
            return false;
        }

        let dom = self.day_of_month.matches(date.day() as u8);
        let dow = self
            .day_of_week
            .matches(date.weekday().num_days_from_sunday() as u8);

        match (
            self.day_of_month.is_restricted(),
            self.day_of_week.is_restricted(),
        ) {
            (true, true) => dom || dow,
            (true, false) => dom,
            (false, true) => dow,
            (false, false) => true,
        }
    }

    /// Lazy stream of firing instants strictly after `after`.
    ///
    /// Restartable: evaluating again from a later instant is consistent
    /// with evaluating once and discarding earlier elements.
    pub fn occurrences_after(&self, after: NaiveDateTime) -> Occurrences<'_> {
        Occurrences::new(self, after)
    }

    /// Collect up to `limit` occurrences strictly after `after`.
    pub fn next_occurrences(&self, after: NaiveDateTime, limit: usize) -> Result<Vec<NaiveDateTime>> {
        self.occurrences_after(after).take(limit).collect()
    }
}

impl FromStr for CronExpression {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CronExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    // ── Parsing ─────────────────────────────────────────────────────

    #[test]
    fn four_fields_is_invalid_expression() {
        let err = CronExpression::parse("* * * *").unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidExpression {
                expression: "* * * *".to_string(),
                found: 4,
            }
        );
    }

    #[test]
    fn six_fields_is_invalid_expression() {
        let err = CronExpression::parse("0 * * * * *").unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidExpression { found: 6, .. }));
    }

    #[test]
    fn field_errors_propagate() {
        let err = CronExpression::parse("60 * * * *").unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidField { field: "minute", .. }));
    }

    #[test]
    fn source_is_trimmed_original_text() {
        let expr = CronExpression::parse("  */5 8-18 * * 1-5  ").unwrap();
        assert_eq!(expr.source(), "*/5 8-18 * * 1-5");
        assert_eq!(expr.to_string(), "*/5 8-18 * * 1-5");
    }

    #[test]
    fn parse_roundtrips_through_fromstr() {
        let expr: CronExpression = "30 2 1 * *".parse().unwrap();
        assert_eq!(expr.source(), "30 2 1 * *");
    }

    // ── Minute/hour/month matching ──────────────────────────────────

    #[test]
    fn matches_exact_minute_and_hour() {
        let expr = CronExpression::parse("30 14 * * *").unwrap();
        assert!(expr.matches(at(2025, 6, 15, 14, 30)));
        assert!(!expr.matches(at(2025, 6, 15, 14, 31)));
        assert!(!expr.matches(at(2025, 6, 15, 15, 30)));
    }

    #[test]
    fn month_restriction_applies() {
        let expr = CronExpression::parse("0 0 * 6 *").unwrap();
        assert!(expr.matches(at(2025, 6, 15, 0, 0)));
        assert!(!expr.matches(at(2025, 7, 15, 0, 0)));
    }

    #[test]
    fn seconds_are_ignored() {
        let expr = CronExpression::parse("30 14 * * *").unwrap();
        let t = NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(14, 30, 45)
            .unwrap();
        assert!(expr.matches(t));
    }

    // ── Day OR rule ─────────────────────────────────────────────────

    // 2025-06-01 is a Sunday, 2025-06-16 a Monday.

    #[test]
    fn both_day_fields_restricted_either_matches() {
        let expr = CronExpression::parse("0 0 1 * 1").unwrap();
        // The 1st, not a Monday.
        assert!(expr.matches(at(2025, 6, 1, 0, 0)));
        // A Monday, not the 1st.
        assert!(expr.matches(at(2025, 6, 16, 0, 0)));
        // Neither (a Tuesday, the 3rd).
        assert!(!expr.matches(at(2025, 6, 3, 0, 0)));
    }

    #[test]
    fn only_day_of_month_restricted_governs_alone() {
        let expr = CronExpression::parse("0 0 1 * *").unwrap();
        assert!(expr.matches(at(2025, 6, 1, 0, 0)));
        // Monday the 16th does not qualify: day-of-week is unrestricted.
        assert!(!expr.matches(at(2025, 6, 16, 0, 0)));
    }

    #[test]
    fn only_day_of_week_restricted_governs_alone() {
        let expr = CronExpression::parse("0 0 * * 1").unwrap();
        assert!(expr.matches(at(2025, 6, 16, 0, 0)));
        assert!(!expr.matches(at(2025, 6, 1, 0, 0)));
    }

    #[test]
    fn neither_day_field_restricted_every_day_qualifies() {
        let expr = CronExpression::parse("0 0 * * *").unwrap();
        assert!(expr.matches(at(2025, 6, 1, 0, 0)));
        assert!(expr.matches(at(2025, 6, 3, 0, 0)));
        assert!(expr.matches(at(2025, 6, 16, 0, 0)));
    }

    #[test]
    fn day_of_week_seven_equals_zero() {
        let with_seven = CronExpression::parse("0 12 * * 7").unwrap();
        let with_zero = CronExpression::parse("0 12 * * 0").unwrap();
        // 2025-06-15 is a Sunday.
        let sunday_noon = at(2025, 6, 15, 12, 0);
        assert!(with_seven.matches(sunday_noon));
        assert!(with_zero.matches(sunday_noon));
    }
}
