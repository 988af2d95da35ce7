//! Scheduler and cleanup jobs plus the process-boundary entry points.

pub mod confirm;
pub mod entry;
pub mod jobs;

pub use confirm::{is_affirmative, Confirmation, FixedConfirmation, StdinConfirmation};
pub use entry::{cleanup_entry, schedule_entry};
pub use jobs::{
    occurrence_filter, run_cleanup, run_schedule, template_filter, CleanupReport, ScheduleReport,
};
