//! Notion REST adapter implementing [`TaskStore`].

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::config::StoreConfig;
use crate::core::{Filter, Page, Schema, StoreError, TaskStore};

/// Largest page size the query endpoint accepts.
pub const QUERY_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

/// Task store backed by one Notion database.
#[derive(Debug, Clone)]
pub struct NotionStore {
    client: Client,
    config: StoreConfig,
}

impl NotionStore {
    /// Wrap a client that already carries the auth and version headers.
    pub const fn new(client: Client, config: StoreConfig) -> Self {
        Self { client, config }
    }

    /// Settings this store was built from.
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.config.base_url)
    }

    async fn error_from(response: Response) -> StoreError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        StoreError::Status { status, body }
    }

    async fn query_page(
        &self,
        filter: &Filter,
        cursor: Option<&str>,
    ) -> Result<QueryResponse, StoreError> {
        let mut body = json!({
            "filter": filter.to_json(),
            "page_size": QUERY_PAGE_SIZE,
        });
        if let Some(cursor) = cursor {
            body["start_cursor"] = Value::String(cursor.to_string());
        }

        let url = self.url(&format!("databases/{}/query", self.config.database_id));
        let response = self.client.post(&url).json(&body).send().await?;
        if response.status() != StatusCode::OK {
            return Err(Self::error_from(response).await);
        }
        response
            .json::<QueryResponse>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

/// Decode one query result; a record that does not fit [`Page`] is logged and dropped.
fn decode_page(raw: Value) -> Option<Page> {
    let id = raw.get("id").and_then(Value::as_str).map(str::to_string);
    match serde_json::from_value::<Page>(raw) {
        Ok(page) => Some(page),
        Err(e) => {
            tracing::warn!(page_id = ?id, error = %e, "skipping malformed query result");
            None
        }
    }
}

#[async_trait]
impl TaskStore for NotionStore {
    async fn fetch_schema(&self) -> Result<Schema, StoreError> {
        let url = self.url(&format!("databases/{}", self.config.database_id));
        let response = self.client.get(&url).send().await?;
        if response.status() != StatusCode::OK {
            let err = Self::error_from(response).await;
            tracing::error!(error = %err, "error fetching database schema");
            return Err(err);
        }
        let database: Value = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        let schema = Schema::from_database_json(&database);
        tracing::info!(properties = schema.len(), "database schema retrieved");
        Ok(schema)
    }

    async fn query(&self, filter: &Filter) -> Result<Vec<Page>, StoreError> {
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let batch = self.query_page(filter, cursor.as_deref()).await?;
            pages.extend(batch.results.into_iter().filter_map(decode_page));
            match (batch.has_more, batch.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }
        tracing::debug!(count = pages.len(), "query complete");
        Ok(pages)
    }

    async fn create(&self, properties: Map<String, Value>) -> Result<Page, StoreError> {
        let body = json!({
            "parent": { "database_id": self.config.database_id },
            "properties": properties,
        });
        let response = self.client.post(self.url("pages")).json(&body).send().await?;
        if !matches!(response.status(), StatusCode::OK | StatusCode::CREATED) {
            return Err(Self::error_from(response).await);
        }
        response
            .json::<Page>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn archive(&self, page_id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(self.url(&format!("pages/{page_id}")))
            .json(&json!({ "archived": true }))
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }
}
