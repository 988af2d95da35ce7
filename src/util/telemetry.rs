//! Telemetry helpers for structured logging and tracing.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing/telemetry. Users can install their own subscriber; this
/// helper installs a default env-based subscriber if none is set.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .try_init();
}

/// Path of the log file for a run started now.
pub fn log_file_path(dir: &Path, prefix: &str) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("{prefix}_{stamp}.log"))
}

/// Like [`init_tracing`], but also writes every event to a per-run file in `dir`.
///
/// Returns the file path when file logging is active. If the file cannot be
/// created, logging stays console-only.
pub fn init_tracing_with_log_file(dir: &Path, prefix: &str) -> Option<PathBuf> {
    if tracing::dispatcher::has_been_set() {
        return None;
    }
    let path = log_file_path(dir, prefix);
    let file = fs::create_dir_all(dir).and_then(|()| File::create(&path));
    match file {
        Ok(file) => {
            let writer = std::io::stderr.and(Mutex::new(file));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(default_filter())
                .with_ansi(false)
                .with_writer(writer)
                .try_init();
            Some(path)
        }
        Err(e) => {
            init_tracing();
            tracing::warn!(dir = %dir.display(), error = %e, "log file unavailable; logging to console only");
            None
        }
    }
}
