//! Configuration models for store access and scheduling policy.

pub mod settings;

pub use settings::{env_lookup, AppConfig, FieldNames, SchedulerConfig, StoreConfig};
