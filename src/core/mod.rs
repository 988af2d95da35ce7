//! Core scheduling abstractions, property mapping, and capacity accounting.

pub mod allocator;
pub mod audit;
pub mod calendar;
pub mod codec;
pub mod error;
pub mod occupancy;
pub mod records;
pub mod schema;
pub mod store;

pub use allocator::{Allocation, Allocator};
pub use audit::{AuditAction, AuditEvent, AuditSink, InMemoryAuditSink, NullAuditSink};
pub use calendar::{end_of_month, Window};
pub use codec::{PropertyCodec, PropertyMap, PropertyValue};
pub use error::{AppResult, CodecError, ConfigError, StoreError};
pub use occupancy::{count_existing, DayCounts};
pub use records::{archive_record, create_occurrence};
pub use schema::{PropertyKind, Schema};
pub use store::{Filter, Page, TaskStore};
