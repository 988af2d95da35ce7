//! Single-call wrappers that create or archive one record.

use chrono::NaiveDate;

use crate::core::codec::{PropertyCodec, PropertyMap};
use crate::core::store::{Page, TaskStore};

/// Create one occurrence of `template` due on `due`.
///
/// Returns `None` on any failure; the error is logged, never propagated.
pub async fn create_occurrence<S>(
    store: &S,
    codec: &PropertyCodec<'_>,
    template: &PropertyMap,
    due: NaiveDate,
) -> Option<Page>
where
    S: TaskStore + ?Sized,
{
    tracing::info!(task = %template.name, %due, "creating task");
    let properties = codec.inject(template, due);
    tracing::debug!(
        properties = %serde_json::Value::Object(properties.clone()),
        "task creation payload"
    );

    match store.create(properties).await {
        Ok(page) => {
            tracing::info!(task = %template.name, id = %page.id, %due, "created task");
            Some(page)
        }
        Err(e) => {
            tracing::error!(task = %template.name, %due, error = %e, "failed to create task");
            None
        }
    }
}

/// Archive the record `page_id`. Returns whether the store accepted the call.
pub async fn archive_record<S>(store: &S, page_id: &str, name: &str) -> bool
where
    S: TaskStore + ?Sized,
{
    tracing::info!(task = name, id = page_id, "archiving task");
    match store.archive(page_id).await {
        Ok(()) => {
            tracing::info!(task = name, id = page_id, "archived task");
            true
        }
        Err(e) => {
            tracing::error!(task = name, id = page_id, error = %e, "failed to archive task");
            false
        }
    }
}
