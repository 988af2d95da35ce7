//! # Task Recurrence
//!
//! Generates dated occurrences of recurring "template" tasks in a Notion
//! database, and purges generated occurrences on request.
//!
//! ## How scheduling works
//!
//! - **Schema-driven mapping**: the database schema decides how each template
//!   property is read and how it is written onto new occurrences.
//! - **Interval walk**: every template steps from today to the end of the
//!   month by its own interval in days.
//! - **Shared daily cap**: existing and newly planned occurrences together may
//!   not exceed the cap on any day; a full day is skipped, not retried.
//! - **Best effort I/O**: each store call stands alone. Failures are logged and
//!   replaced by safe defaults, except for schema retrieval, which stops the run.
//!
//! ```rust,ignore
//! use task_recurrence::config::SchedulerConfig;
//! use task_recurrence::infra::InMemoryStore;
//! use task_recurrence::runtime::run_schedule;
//!
//! let store = InMemoryStore::new(schema);
//! let report = run_schedule(&store, &SchedulerConfig::default(), today).await;
//! println!("{}", report.summary());
//! ```
//!
//! For complete examples, see `tests/allocator_test.rs` and `tests/jobs_test.rs`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling abstractions and capacity accounting.
pub mod core;
/// Configuration models for store access and scheduling policy.
pub mod config;
/// Builders to construct store clients from configuration.
pub mod builders;
/// Infrastructure adapters for the hosted task store.
pub mod infra;
/// Jobs and process entry points.
pub mod runtime;
/// Shared utilities.
pub mod util;
