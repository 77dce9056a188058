//! Error taxonomy for cron parsing and evaluation.

use thiserror::Error;

/// Errors from parsing or evaluating a cron schedule.
///
/// All variants are per-schedule: one bad schedule never has to abort
/// processing of others.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The expression text does not split into exactly five fields.
    #[error("expected 5 cron fields, found {found} in '{expression}'")]
    InvalidExpression { expression: String, found: usize },

    /// A field token is out of domain, non-numeric, a reversed range, or
    /// carries a non-positive step.
    #[error("invalid {field} field token '{token}': {reason}")]
    InvalidField {
        field: &'static str,
        token: String,
        reason: String,
    },

    /// No qualifying instant exists within the forward-search horizon.
    #[error("no occurrence of '{expression}' within {horizon_days} days")]
    Unsatisfiable {
        expression: String,
        horizon_days: i64,
    },
}

/// Result alias for schedule operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;
