//! Store credentials and scheduling policy.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// Environment variable holding the integration token.
pub const ENV_API_TOKEN: &str = "NOTION_API_TOKEN";
/// Environment variable holding the target database id.
pub const ENV_DATABASE_ID: &str = "NOTION_DATABASE_ID";
/// Optional override of the API base URL.
pub const ENV_BASE_URL: &str = "NOTION_BASE_URL";
/// Optional override of the API version header.
pub const ENV_API_VERSION: &str = "NOTION_VERSION";
/// Optional override of the daily cap.
pub const ENV_DAILY_CAP: &str = "MAX_TASKS_PER_DAY";
/// Optional override of the pause between templates, in milliseconds.
pub const ENV_TEMPLATE_PAUSE_MS: &str = "TEMPLATE_PAUSE_MS";

const DEFAULT_BASE_URL: &str = "https://api.notion.com";
const DEFAULT_API_VERSION: &str = "2022-06-28";

/// Connection settings for the hosted store.
#[derive(Clone)]
pub struct StoreConfig {
    /// Bearer token.
    pub api_token: String,
    /// Target database id.
    pub database_id: String,
    /// API base URL without trailing slash.
    pub base_url: String,
    /// Value of the `Notion-Version` header.
    pub api_version: String,
}

impl StoreConfig {
    /// Settings with default endpoint and version.
    pub fn new(api_token: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            database_id: database_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Point the store at a different base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("api_token", &"<redacted>")
            .field("database_id", &self.database_id)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Names of the well-known database properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    /// Title property.
    pub title: String,
    /// Numeric interval property, in days.
    pub regularity: String,
    /// Select property classifying records.
    pub task_type: String,
    /// Due date property.
    pub date: String,
    /// Completion checkbox.
    pub done: String,
    /// Task type option marking templated records.
    pub templated_marker: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            title: "Task".into(),
            regularity: "Regularity (days)".into(),
            task_type: "Task Type".into(),
            date: "Date".into(),
            done: "Done".into(),
            templated_marker: "Templated task".into(),
        }
    }
}

/// Scheduling policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Maximum occurrences per calendar day, across all templates.
    pub daily_cap: u32,
    /// Pause between templates, in milliseconds.
    pub template_pause_ms: u64,
    /// Property names of the target database.
    pub fields: FieldNames,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            daily_cap: 3,
            template_pause_ms: 1000,
            fields: FieldNames::default(),
        }
    }
}

impl SchedulerConfig {
    /// Validate policy values.
    pub fn validate(&self) -> Result<(), String> {
        if self.daily_cap == 0 {
            return Err("daily_cap must be greater than 0".into());
        }
        let f = &self.fields;
        for (label, value) in [
            ("title", &f.title),
            ("regularity", &f.regularity),
            ("task_type", &f.task_type),
            ("date", &f.date),
            ("templated_marker", &f.templated_marker),
        ] {
            if value.trim().is_empty() {
                return Err(format!("field name `{label}` must not be empty"));
            }
        }
        Ok(())
    }

    /// Parse a policy from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Pause inserted between templates.
    pub const fn template_pause(&self) -> Duration {
        Duration::from_millis(self.template_pause_ms)
    }

    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = non_blank(lookup, ENV_DAILY_CAP) {
            self.daily_cap = raw
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("{ENV_DAILY_CAP}={raw}: {e}")))?;
        }
        if let Some(raw) = non_blank(lookup, ENV_TEMPLATE_PAUSE_MS) {
            self.template_pause_ms = raw
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("{ENV_TEMPLATE_PAUSE_MS}={raw}: {e}")))?;
        }
        Ok(())
    }
}

/// Complete runtime configuration, built once per process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Store connection.
    pub store: StoreConfig,
    /// Scheduling policy.
    pub scheduler: SchedulerConfig,
}

impl AppConfig {
    /// Build from an arbitrary variable lookup.
    ///
    /// Both credentials are checked before anything else is read.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_with_policy(lookup, SchedulerConfig::default())
    }

    /// Build from a lookup, layering env overrides on top of `policy`.
    pub fn from_lookup_with_policy<F>(
        lookup: F,
        mut policy: SchedulerConfig,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = non_blank(&lookup, ENV_API_TOKEN)
            .ok_or_else(|| ConfigError::MissingVar(ENV_API_TOKEN.into()))?;
        let database_id = non_blank(&lookup, ENV_DATABASE_ID)
            .ok_or_else(|| ConfigError::MissingVar(ENV_DATABASE_ID.into()))?;

        let mut store = StoreConfig::new(api_token, database_id);
        if let Some(url) = non_blank(&lookup, ENV_BASE_URL) {
            store = store.with_base_url(url);
        }
        if let Some(version) = non_blank(&lookup, ENV_API_VERSION) {
            store.api_version = version;
        }

        policy.apply_overrides(&lookup)?;
        policy.validate().map_err(ConfigError::Invalid)?;

        Ok(Self {
            store,
            scheduler: policy,
        })
    }
}

/// Variable lookup backed by the process environment.
///
/// Unset and non-UTF-8 variables both read as absent.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
