//! Creates dated occurrences of templated tasks for the rest of the current month.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;

use task_recurrence::config::{env_lookup, SchedulerConfig};
use task_recurrence::core::AppResult;
use task_recurrence::runtime::schedule_entry;
use task_recurrence::util::init_tracing_with_log_file;

#[derive(Debug, Parser)]
#[command(name = "schedule-tasks", version, about = "Schedule recurring templated tasks")]
struct Args {
    /// Day to schedule from (YYYY-MM-DD); defaults to the local date.
    #[arg(long)]
    today: Option<NaiveDate>,
    /// JSON file with the scheduling policy (daily cap, pause, field names).
    #[arg(long)]
    policy: Option<PathBuf>,
    /// Directory for per-run log files.
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

fn load_policy(path: &Path) -> AppResult<SchedulerConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading policy file {}", path.display()))?;
    SchedulerConfig::from_json_str(&raw)
        .map_err(|e| anyhow::anyhow!("invalid policy file {}: {e}", path.display()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> AppResult<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();
    init_tracing_with_log_file(&args.log_dir, "task_scheduler");
    tracing::info!("starting task scheduler");

    let policy = match &args.policy {
        Some(path) => load_policy(path)?,
        None => SchedulerConfig::default(),
    };
    let today = args
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let report = schedule_entry(env_lookup, policy, today).await;
    tracing::info!(created = report.created.len(), "script completed");
    println!("{}", report.summary());
    Ok(())
}
