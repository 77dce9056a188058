//! Single cron field parsing and matching.
//!
//! A field is a comma-separated list of tokens, each one of `*`, `N`,
//! `N-M`, `*/K`, `N-M/K`, or `N/K`. The parsed form is the union of all
//! tokens' contributions as an ordered set of accepted values.

use std::collections::BTreeSet;

use crate::error::{Result, ScheduleError};

// ── Field domains ───────────────────────────────────────────────────

/// Value domain of one cron field position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDomain {
    /// Field name used in error messages.
    pub name: &'static str,
    pub min: u8,
    pub max: u8,
    /// Raw value accepted as an alias for `min`. Cron's day-of-week
    /// allows both 0 and 7 for Sunday; 7 normalizes to 0.
    alias_of_min: Option<u8>,
}

pub const MINUTE: FieldDomain = FieldDomain {
    name: "minute",
    min: 0,
    max: 59,
    alias_of_min: None,
};

pub const HOUR: FieldDomain = FieldDomain {
    name: "hour",
    min: 0,
    max: 23,
    alias_of_min: None,
};

pub const DAY_OF_MONTH: FieldDomain = FieldDomain {
    name: "day-of-month",
    min: 1,
    max: 31,
    alias_of_min: None,
};

pub const MONTH: FieldDomain = FieldDomain {
    name: "month",
    min: 1,
    max: 12,
    alias_of_min: None,
};

pub const DAY_OF_WEEK: FieldDomain = FieldDomain {
    name: "day-of-week",
    min: 0,
    max: 6,
    alias_of_min: Some(7),
};

impl FieldDomain {
    /// Highest raw value accepted in field text, alias included.
    fn raw_max(&self) -> u8 {
        self.alias_of_min.map_or(self.max, |a| self.max.max(a))
    }

    /// Map an accepted raw value onto its canonical domain value.
    fn normalize(&self, value: u8) -> u8 {
        match self.alias_of_min {
            Some(alias) if value == alias => self.min,
            _ => value,
        }
    }
}

// ── Cron field ──────────────────────────────────────────────────────

/// Parsed accepted-value set for a single cron field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronField {
    values: BTreeSet<u8>,
    restricted: bool,
}

impl CronField {
    /// Parse one field's text against its domain.
    ///
    /// The accepted set is the union of all comma-separated tokens and is
    /// guaranteed non-empty on success: every token either contributes at
    /// least one value or fails the parse.
    pub fn parse(text: &str, domain: FieldDomain) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(invalid(domain, text, "empty field"));
        }

        let mut values = BTreeSet::new();
        for token in text.split(',') {
            expand_token(token, domain, &mut values)?;
        }

        Ok(Self {
            values,
            restricted: text != "*",
        })
    }

    /// Whether `value` is in the accepted set.
    pub fn matches(&self, value: u8) -> bool {
        self.values.contains(&value)
    }

    /// `false` only for the bare wildcard `*`. Drives the day-selection
    /// OR rule: an unrestricted day field never vetoes the other one.
    pub fn is_restricted(&self) -> bool {
        self.restricted
    }

    /// Accepted values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.values.iter().copied()
    }
}

// ── Token expansion ─────────────────────────────────────────────────

/// Expand one token (`*`, `N`, `N-M`, optionally `/K`) into `out`.
fn expand_token(token: &str, domain: FieldDomain, out: &mut BTreeSet<u8>) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        return Err(invalid(domain, token, "empty token"));
    }

    let (range_part, step) = match token.split_once('/') {
        Some((range, step)) => (range, Some(parse_step(step, domain, token)?)),
        None => (token, None),
    };

    let (lo, hi) = if range_part == "*" {
        (domain.min, domain.max)
    } else if let Some((start, end)) = range_part.split_once('-') {
        let start = parse_value(start, domain, token)?;
        let end = parse_value(end, domain, token)?;
        if start > end {
            return Err(invalid(domain, token, "range start exceeds range end"));
        }
        (start, end)
    } else {
        let value = parse_value(range_part, domain, token)?;
        match step {
            // `N/K` steps from N to the end of the domain.
            Some(_) => (value, domain.raw_max()),
            None => (value, value),
        }
    };

    let step = step.unwrap_or(1);
    let mut v = lo as i64;
    while v <= hi as i64 {
        out.insert(domain.normalize(v as u8));
        v += step;
    }

    Ok(())
}

/// Parse a single numeric value and check it against the domain.
fn parse_value(text: &str, domain: FieldDomain, token: &str) -> Result<u8> {
    let value: u8 = text
        .trim()
        .parse()
        .map_err(|_| invalid(domain, token, format!("'{}' is not a number", text.trim())))?;

    if value < domain.min || value > domain.raw_max() {
        return Err(invalid(
            domain,
            token,
            format!(
                "value {} outside domain {}-{}",
                value, domain.min, domain.max
            ),
        ));
    }

    Ok(value)
}

/// Parse a step suffix. Steps must be strictly positive.
fn parse_step(text: &str, domain: FieldDomain, token: &str) -> Result<i64> {
    let step: i64 = text
        .trim()
        .parse()
        .map_err(|_| invalid(domain, token, format!("'{}' is not a valid step", text.trim())))?;

    if step <= 0 {
        return Err(invalid(domain, token, "step must be positive"));
    }

    Ok(step)
}

fn invalid(domain: FieldDomain, token: &str, reason: impl Into<String>) -> ScheduleError {
    ScheduleError::InvalidField {
        field: domain.name,
        token: token.to_string(),
        reason: reason.into(),
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn values(field: &CronField) -> Vec<u8> {
        field.values().collect()
    }

    // ── Wildcards ───────────────────────────────────────────────────

    #[test]
    fn wildcard_covers_entire_domain() {
        let field = CronField::parse("*", HOUR).unwrap();
        assert_eq!(values(&field), (0..=23).collect::<Vec<u8>>());
        assert!(!field.is_restricted());
    }

    #[test]
    fn stepped_wildcard_is_restricted() {
        let field = CronField::parse("*/1", MINUTE).unwrap();
        assert_eq!(values(&field), (0..=59).collect::<Vec<u8>>());
        assert!(field.is_restricted());
    }

    #[test]
    fn wildcard_with_step() {
        let field = CronField::parse("*/15", MINUTE).unwrap();
        assert_eq!(values(&field), vec![0, 15, 30, 45]);
    }

    // ── Single values and lists ─────────────────────────────────────

    #[test]
    fn single_value() {
        let field = CronField::parse("5", MINUTE).unwrap();
        assert_eq!(values(&field), vec![5]);
        assert!(field.matches(5));
        assert!(!field.matches(6));
        assert!(field.is_restricted());
    }

    #[test]
    fn comma_list_unions_tokens() {
        let field = CronField::parse("1,3,5", HOUR).unwrap();
        assert_eq!(values(&field), vec![1, 3, 5]);
    }

    #[test]
    fn duplicates_collapse() {
        let field = CronField::parse("1,1-2,2", HOUR).unwrap();
        assert_eq!(values(&field), vec![1, 2]);
    }

    // ── Ranges and steps ────────────────────────────────────────────

    #[test]
    fn inclusive_range() {
        let field = CronField::parse("1-5", MONTH).unwrap();
        assert_eq!(values(&field), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn range_with_step() {
        let field = CronField::parse("1-10/3", MINUTE).unwrap();
        assert_eq!(values(&field), vec![1, 4, 7, 10]);
    }

    #[test]
    fn value_with_step_runs_to_domain_end() {
        let field = CronField::parse("3/20", MINUTE).unwrap();
        assert_eq!(values(&field), vec![3, 23, 43]);
    }

    #[test]
    fn oversized_step_keeps_range_start() {
        let field = CronField::parse("*/100", MINUTE).unwrap();
        assert_eq!(values(&field), vec![0]);
    }

    // ── Day-of-week normalization ───────────────────────────────────

    #[test]
    fn day_of_week_seven_means_sunday() {
        let field = CronField::parse("7", DAY_OF_WEEK).unwrap();
        assert_eq!(values(&field), vec![0]);
    }

    #[test]
    fn day_of_week_range_through_seven() {
        let field = CronField::parse("5-7", DAY_OF_WEEK).unwrap();
        assert_eq!(values(&field), vec![0, 5, 6]);
    }

    #[test]
    fn seven_rejected_outside_day_of_week() {
        assert!(CronField::parse("7", DAY_OF_WEEK).is_ok());
        assert!(CronField::parse("13", MONTH).is_err());
    }

    // ── Invalid input ───────────────────────────────────────────────

    #[test]
    fn out_of_domain_value_fails() {
        let err = CronField::parse("60", MINUTE).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidField { field: "minute", .. }));
    }

    #[test]
    fn zero_step_fails() {
        let err = CronField::parse("0-59/0", MINUTE).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidField { .. }));
    }

    #[test]
    fn negative_step_fails() {
        assert!(CronField::parse("*/-2", MINUTE).is_err());
    }

    #[test]
    fn reversed_range_fails() {
        let err = CronField::parse("5-1", HOUR).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidField { .. }));
    }

    #[test]
    fn non_numeric_fails() {
        assert!(CronField::parse("mon", DAY_OF_WEEK).is_err());
        assert!(CronField::parse("1-x", HOUR).is_err());
        assert!(CronField::parse("*/x", HOUR).is_err());
    }

    #[test]
    fn empty_tokens_fail() {
        assert!(CronField::parse("", MINUTE).is_err());
        assert!(CronField::parse("1,,2", MINUTE).is_err());
        assert!(CronField::parse("1-", MINUTE).is_err());
    }
}
