//! Infrastructure adapters for the hosted task store.

pub mod memory;
pub mod notion;

pub use memory::{CallCounts, InMemoryStore};
pub use notion::NotionStore;
