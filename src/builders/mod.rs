//! Builders to construct store clients from configuration.

pub mod store_builder;

pub use store_builder::{build_client, build_store};
