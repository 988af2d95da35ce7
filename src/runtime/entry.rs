//! Process-boundary entry points shared by the binaries.
//!
//! Configuration is checked before any HTTP client exists, so a missing
//! credential never results in network traffic.

use chrono::NaiveDate;

use crate::builders::build_store;
use crate::config::{AppConfig, SchedulerConfig};
use crate::runtime::confirm::Confirmation;
use crate::runtime::jobs::{run_cleanup, run_schedule, CleanupReport, ScheduleReport};

fn load_config<F>(lookup: F, policy: SchedulerConfig) -> Option<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    match AppConfig::from_lookup_with_policy(lookup, policy) {
        Ok(cfg) => {
            tracing::info!(
                database_id = %cfg.store.database_id,
                daily_cap = cfg.scheduler.daily_cap,
                "configuration loaded"
            );
            Some(cfg)
        }
        Err(e) => {
            tracing::error!(error = %e, "configuration error; cannot continue");
            None
        }
    }
}

/// Run the scheduler against the store described by `lookup`.
pub async fn schedule_entry<F>(lookup: F, policy: SchedulerConfig, today: NaiveDate) -> ScheduleReport
where
    F: Fn(&str) -> Option<String>,
{
    let Some(cfg) = load_config(lookup, policy) else {
        return ScheduleReport::default();
    };
    let store = match build_store(&cfg.store) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "failed to build store client");
            return ScheduleReport::default();
        }
    };
    run_schedule(&store, &cfg.scheduler, today).await
}

/// Run the cleanup against the store described by `lookup`.
pub async fn cleanup_entry<F>(lookup: F, confirmation: &mut dyn Confirmation) -> CleanupReport
where
    F: Fn(&str) -> Option<String>,
{
    let Some(cfg) = load_config(lookup, SchedulerConfig::default()) else {
        return CleanupReport::default();
    };
    let store = match build_store(&cfg.store) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "failed to build store client");
            return CleanupReport::default();
        }
    };
    run_cleanup(&store, &cfg.scheduler.fields, confirmation).await
}
