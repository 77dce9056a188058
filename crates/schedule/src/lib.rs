//! Five-field cron expression parsing and evaluation.
//!
//! This crate provides:
//! - Per-field grammar parsing (wildcards, lists, ranges, steps) into
//!   accepted-value sets
//! - The day-of-month/day-of-week OR rule of conventional cron
//! - Lazy, strictly increasing occurrence streams at minute resolution
//!
//! Evaluation is pure: no clocks, no I/O, no shared state. Callers supply
//! the starting instant explicitly.

pub mod error;
pub mod expr;
pub mod field;
pub mod occurrences;

pub use error::{Result, ScheduleError};
pub use expr::CronExpression;
pub use field::CronField;
pub use occurrences::Occurrences;
