//! Tests for configuration validation

use std::collections::HashMap;

use task_recurrence::config::{env_lookup, AppConfig, FieldNames, SchedulerConfig, StoreConfig};
use task_recurrence::core::ConfigError;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

const CREDENTIALS: [(&str, &str); 2] = [
    ("NOTION_API_TOKEN", "secret_abc"),
    ("NOTION_DATABASE_ID", "db1"),
];

#[test]
fn test_scheduler_config_defaults() {
    let cfg = SchedulerConfig::default();
    assert_eq!(cfg.daily_cap, 3);
    assert_eq!(cfg.template_pause_ms, 1000);
    assert_eq!(cfg.fields.templated_marker, "Templated task");
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_scheduler_config_invalid_cap() {
    let cfg = SchedulerConfig {
        daily_cap: 0,
        ..SchedulerConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_scheduler_config_invalid_field_name() {
    let cfg = SchedulerConfig {
        fields: FieldNames {
            date: " ".into(),
            ..FieldNames::default()
        },
        ..SchedulerConfig::default()
    };
    let err = cfg.validate().unwrap_err();
    assert!(err.contains("date"));
}

#[test]
fn test_scheduler_config_from_json() {
    let cfg = SchedulerConfig::from_json_str(
        r#"{"daily_cap": 5, "fields": {"date": "Due", "title": "Name"}}"#,
    )
    .unwrap();
    assert_eq!(cfg.daily_cap, 5);
    assert_eq!(cfg.template_pause_ms, 1000);
    assert_eq!(cfg.fields.date, "Due");
    assert_eq!(cfg.fields.title, "Name");
    assert_eq!(cfg.fields.task_type, "Task Type");
}

#[test]
fn test_scheduler_config_from_json_rejects_invalid() {
    assert!(SchedulerConfig::from_json_str(r#"{"daily_cap": 0}"#).is_err());
    assert!(SchedulerConfig::from_json_str("daily_cap = 3").is_err());
}

#[test]
fn test_app_config_from_lookup() {
    let cfg = AppConfig::from_lookup(lookup(&CREDENTIALS)).unwrap();
    assert_eq!(cfg.store.api_token, "secret_abc");
    assert_eq!(cfg.store.database_id, "db1");
    assert_eq!(cfg.store.base_url, "https://api.notion.com");
    assert_eq!(cfg.store.api_version, "2022-06-28");
    assert_eq!(cfg.scheduler, SchedulerConfig::default());
}

#[test]
fn test_app_config_missing_token() {
    let err = AppConfig::from_lookup(lookup(&[("NOTION_DATABASE_ID", "db1")])).unwrap_err();
    assert!(matches!(err, ConfigError::MissingVar(ref v) if v == "NOTION_API_TOKEN"));
}

#[test]
fn test_app_config_blank_database_id() {
    let err = AppConfig::from_lookup(lookup(&[
        ("NOTION_API_TOKEN", "secret_abc"),
        ("NOTION_DATABASE_ID", ""),
    ]))
    .unwrap_err();
    assert!(matches!(err, ConfigError::MissingVar(ref v) if v == "NOTION_DATABASE_ID"));
}

#[test]
fn test_app_config_env_overrides() {
    let mut pairs = CREDENTIALS.to_vec();
    pairs.extend([
        ("NOTION_BASE_URL", "http://127.0.0.1:9000/"),
        ("NOTION_VERSION", "2025-09-03"),
        ("MAX_TASKS_PER_DAY", "5"),
        ("TEMPLATE_PAUSE_MS", "0"),
    ]);
    let cfg = AppConfig::from_lookup(lookup(&pairs)).unwrap();
    assert_eq!(cfg.store.base_url, "http://127.0.0.1:9000");
    assert_eq!(cfg.store.api_version, "2025-09-03");
    assert_eq!(cfg.scheduler.daily_cap, 5);
    assert_eq!(cfg.scheduler.template_pause_ms, 0);
}

#[test]
fn test_app_config_overrides_layer_on_policy() {
    let policy = SchedulerConfig {
        daily_cap: 7,
        template_pause_ms: 250,
        ..SchedulerConfig::default()
    };
    let mut pairs = CREDENTIALS.to_vec();
    pairs.push(("TEMPLATE_PAUSE_MS", "10"));
    let cfg = AppConfig::from_lookup_with_policy(lookup(&pairs), policy).unwrap();
    assert_eq!(cfg.scheduler.daily_cap, 7);
    assert_eq!(cfg.scheduler.template_pause_ms, 10);
}

#[test]
fn test_app_config_rejects_unparseable_cap() {
    let mut pairs = CREDENTIALS.to_vec();
    pairs.push(("MAX_TASKS_PER_DAY", "three"));
    let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_store_config_debug_redacts_token() {
    let cfg = StoreConfig::new("secret_abc", "db1");
    let debug = format!("{:?}", cfg);
    assert!(!debug.contains("secret_abc"));
    assert!(debug.contains("db1"));
}

#[test]
fn test_env_lookup_reads_process_environment() {
    assert_eq!(env_lookup("PATH"), std::env::var("PATH").ok());
    assert_eq!(env_lookup("TASK_RECURRENCE_UNSET_VARIABLE_FOR_TESTS"), None);
}

#[test]
fn test_app_config_from_env_lookup_requires_credentials() {
    let result = AppConfig::from_lookup(|key: &str| {
        env_lookup(&format!("TASK_RECURRENCE_UNSET_{key}"))
    });
    assert!(matches!(result, Err(ConfigError::MissingVar(_))));
}
