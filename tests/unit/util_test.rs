//! Tests for telemetry helpers

use std::path::Path;

use task_recurrence::util::{init_tracing, log_file_path};

#[test]
fn test_log_file_path_in_dir() {
    let path = log_file_path(Path::new("/tmp/runs"), "task_cleaner");
    assert_eq!(path.parent(), Some(Path::new("/tmp/runs")));
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("log"));
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
    tracing::info!("tracing initialised twice without panicking");
}

#[test]
fn test_log_file_created_in_temp_dir() {
    let dir = tempfile::tempdir().unwrap();
    let logs = dir.path().join("nested");
    let path = task_recurrence::util::init_tracing_with_log_file(&logs, "task_scheduler");
    // Another test may have installed the global subscriber first.
    if let Some(path) = path {
        assert!(path.exists());
        assert!(path.starts_with(&logs));
    }
}
