//! In-memory task store for development and testing.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::core::{Filter, Page, Schema, StoreError, TaskStore};

type CreatePredicate = Box<dyn Fn(&Map<String, Value>) -> bool + Send + Sync>;

/// Number of calls received per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// `fetch_schema` calls.
    pub schema: usize,
    /// `query` calls.
    pub query: usize,
    /// `create` calls.
    pub create: usize,
    /// `archive` calls.
    pub archive: usize,
}

impl CallCounts {
    /// Sum of all calls.
    pub const fn total(&self) -> usize {
        self.schema + self.query + self.create + self.archive
    }
}

#[derive(Default)]
struct StoreState {
    pages: Vec<Page>,
    calls: CallCounts,
    last_filter: Option<Filter>,
}

/// Store keeping records in memory, evaluating filters locally.
///
/// Failures can be injected per operation to exercise fallback paths.
pub struct InMemoryStore {
    schema: Option<Schema>,
    state: Mutex<StoreState>,
    fail_queries: bool,
    reject_create: Option<CreatePredicate>,
    reject_archive: HashSet<String>,
}

impl InMemoryStore {
    /// Create an empty store that reports `schema`.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema: Some(schema),
            state: Mutex::new(StoreState::default()),
            fail_queries: false,
            reject_create: None,
            reject_archive: HashSet::new(),
        }
    }

    /// Create a store whose schema call always fails.
    pub fn without_schema() -> Self {
        Self {
            schema: None,
            ..Self::new(Schema::default())
        }
    }

    /// Make every query fail with a transport error.
    #[must_use]
    pub const fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    /// Reject creations whose payload satisfies `predicate`.
    #[must_use]
    pub fn rejecting_creates<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> bool + Send + Sync + 'static,
    {
        self.reject_create = Some(Box::new(predicate));
        self
    }

    /// Reject archive calls for `page_id`.
    #[must_use]
    pub fn rejecting_archive(mut self, page_id: impl Into<String>) -> Self {
        self.reject_archive.insert(page_id.into());
        self
    }

    /// Seed a record directly, bypassing call accounting. Returns its id.
    pub fn seed(&self, properties: Value) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let properties = match properties {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.state.lock().pages.push(Page {
            id: id.clone(),
            properties,
            archived: false,
        });
        id
    }

    /// Snapshot of every record, archived ones included.
    pub fn pages(&self) -> Vec<Page> {
        self.state.lock().pages.clone()
    }

    /// Snapshot of non-archived records.
    pub fn live_pages(&self) -> Vec<Page> {
        self.state
            .lock()
            .pages
            .iter()
            .filter(|p| !p.archived)
            .cloned()
            .collect()
    }

    /// Calls received so far.
    pub fn calls(&self) -> CallCounts {
        self.state.lock().calls
    }

    /// Filter passed to the most recent query.
    pub fn last_filter(&self) -> Option<Filter> {
        self.state.lock().last_filter.clone()
    }
}

#[async_trait]
impl TaskStore for InMemoryStore {
    async fn fetch_schema(&self) -> Result<Schema, StoreError> {
        self.state.lock().calls.schema += 1;
        self.schema
            .clone()
            .ok_or_else(|| StoreError::Transport("schema unavailable".into()))
    }

    async fn query(&self, filter: &Filter) -> Result<Vec<Page>, StoreError> {
        let mut state = self.state.lock();
        state.calls.query += 1;
        state.last_filter = Some(filter.clone());
        if self.fail_queries {
            return Err(StoreError::Transport("query unavailable".into()));
        }
        Ok(state
            .pages
            .iter()
            .filter(|p| !p.archived && filter.matches(p))
            .cloned()
            .collect())
    }

    async fn create(&self, properties: Map<String, Value>) -> Result<Page, StoreError> {
        let mut state = self.state.lock();
        state.calls.create += 1;
        if self.reject_create.as_ref().is_some_and(|reject| reject(&properties)) {
            return Err(StoreError::Status {
                status: 400,
                body: r#"{"object":"error","code":"validation_error"}"#.into(),
            });
        }
        let page = Page {
            id: uuid::Uuid::new_v4().to_string(),
            properties,
            archived: false,
        };
        state.pages.push(page.clone());
        Ok(page)
    }

    async fn archive(&self, page_id: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        state.calls.archive += 1;
        if self.reject_archive.contains(page_id) {
            return Err(StoreError::Status {
                status: 409,
                body: "conflict".into(),
            });
        }
        let page = state
            .pages
            .iter_mut()
            .find(|p| p.id == page_id)
            .ok_or_else(|| StoreError::Status {
                status: 404,
                body: format!("page {page_id} not found"),
            })?;
        page.archived = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PropertyKind;
    use serde_json::json;

    fn store() -> InMemoryStore {
        InMemoryStore::new(Schema::from_pairs([("Date", PropertyKind::Date)]))
    }

    #[tokio::test]
    async fn query_excludes_archived_records() {
        let store = store();
        let keep = store.seed(json!({"Date": {"date": {"start": "2026-10-20"}}}));
        let gone = store.seed(json!({"Date": {"date": {"start": "2026-10-21"}}}));
        store.archive(&gone).await.unwrap();

        let filter = Filter::DateIsNotEmpty { property: "Date".into() };
        let found = store.query(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, keep);
        assert_eq!(store.calls().archive, 1);
        assert_eq!(store.calls().query, 1);
    }

    #[tokio::test]
    async fn archive_unknown_record_fails() {
        let err = store().archive("nope").await.unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn injected_failures_surface_as_errors() {
        let store = InMemoryStore::without_schema().failing_queries();
        assert!(store.fetch_schema().await.is_err());
        assert!(store
            .query(&Filter::DateIsEmpty { property: "Date".into() })
            .await
            .is_err());
        assert_eq!(store.calls().total(), 2);
    }

    #[tokio::test]
    async fn rejected_creates_are_not_stored() {
        let store = store().rejecting_creates(|props| props.contains_key("Poison"));
        let mut bad = Map::new();
        bad.insert("Poison".into(), json!(true));
        assert!(store.create(bad).await.is_err());
        assert!(store.create(Map::new()).await.is_ok());
        assert_eq!(store.pages().len(), 1);
        assert_eq!(store.calls().create, 2);
    }
}
