//! Archives every dated templated task after an interactive confirmation.

use std::path::PathBuf;

use clap::Parser;

use task_recurrence::config::env_lookup;
use task_recurrence::core::AppResult;
use task_recurrence::runtime::{cleanup_entry, StdinConfirmation};
use task_recurrence::util::init_tracing_with_log_file;

#[derive(Debug, Parser)]
#[command(name = "clean-tasks", version, about = "Archive generated templated tasks")]
struct Args {
    /// Directory for per-run log files.
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> AppResult<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();
    init_tracing_with_log_file(&args.log_dir, "task_cleaner");
    tracing::info!("starting task cleaner");

    let mut confirmation = StdinConfirmation;
    let report = cleanup_entry(env_lookup, &mut confirmation).await;
    tracing::info!(archived = report.archived, "script completed");
    println!("{}", report.summary());
    Ok(())
}
