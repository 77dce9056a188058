//! Timeline aggregation over many cron jobs.
//!
//! This crate provides:
//! - The (system, schedule, command) job model
//! - Per-job occurrence evaluation with failure isolation
//! - The windowed, labeled, display-ranked timeline merge
//!
//! Jobs are evaluated independently (in parallel via `rayon`) and merged
//! in a single ordering pass, so concurrent and sequential runs produce
//! identical output.

pub mod aggregator;
pub mod entry;
pub mod record;
pub mod window;

pub use aggregator::{build_timeline, JobDiagnostic, Timeline};
pub use entry::{Occurrence, TimelineEntry};
pub use record::{JobSpec, ScheduleRecord};
pub use window::Window;
