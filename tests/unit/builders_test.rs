//! Tests for store builders

use task_recurrence::builders::{build_client, build_store};
use task_recurrence::config::StoreConfig;
use task_recurrence::core::StoreError;

#[test]
fn test_build_store_keeps_config() {
    let cfg = StoreConfig::new("secret_abc", "db1").with_base_url("http://localhost:8080/");
    let store = build_store(&cfg).unwrap();
    assert_eq!(store.config().base_url, "http://localhost:8080");
    assert_eq!(store.config().database_id, "db1");
}

#[test]
fn test_build_store_rejects_empty_base_url() {
    let mut cfg = StoreConfig::new("secret_abc", "db1");
    cfg.base_url = String::new();
    assert!(matches!(build_store(&cfg), Err(StoreError::Transport(_))));
}

#[test]
fn test_build_client_rejects_bad_version() {
    let mut cfg = StoreConfig::new("secret_abc", "db1");
    cfg.api_version = "2022\n06".into();
    assert!(build_client(&cfg).is_err());
}
