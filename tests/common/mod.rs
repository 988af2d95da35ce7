//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use serde_json::{json, Value};

use task_recurrence::config::SchedulerConfig;
use task_recurrence::core::{Page, PropertyKind, Schema};

/// Day in October 2026.
pub fn oct(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
}

/// Schema of the task database used throughout the tests.
pub fn task_schema() -> Schema {
    Schema::from_pairs([
        ("Task", PropertyKind::Title),
        ("Regularity (days)", PropertyKind::Number),
        ("Task Type", PropertyKind::Select),
        ("Date", PropertyKind::Date),
        ("Done", PropertyKind::Checkbox),
        ("Notes", PropertyKind::RichText),
        ("Link", PropertyKind::Url),
        ("Priority", PropertyKind::Select),
        ("Deadline", PropertyKind::Date),
        ("Assignee", PropertyKind::Other("people".into())),
    ])
}

/// Database description as returned by the schema endpoint.
pub fn database_json() -> Value {
    json!({
        "object": "database",
        "id": "db1",
        "properties": {
            "Task": {"id": "title", "type": "title", "title": {}},
            "Regularity (days)": {"id": "r", "type": "number", "number": {"format": "number"}},
            "Task Type": {"id": "t", "type": "select", "select": {"options": []}},
            "Date": {"id": "d", "type": "date", "date": {}},
            "Done": {"id": "x", "type": "checkbox", "checkbox": {}},
            "Link": {"id": "l", "type": "url", "url": {}}
        }
    })
}

/// Policy with no pause between templates.
pub fn fast_policy() -> SchedulerConfig {
    SchedulerConfig {
        template_pause_ms: 0,
        ..SchedulerConfig::default()
    }
}

/// Properties of an undated template.
pub fn template_props(name: &str, regularity: Value) -> Value {
    json!({
        "Task": {"type": "title", "title": [{"type": "text", "text": {"content": name}, "plain_text": name}]},
        "Regularity (days)": {"type": "number", "number": regularity},
        "Task Type": {"type": "select", "select": {"name": "Templated task", "color": "blue"}},
        "Date": {"type": "date", "date": null},
        "Done": {"type": "checkbox", "checkbox": true},
        "Link": {"type": "url", "url": null},
        "Priority": {"type": "select", "select": {"name": "High"}},
        "Notes": {"type": "rich_text", "rich_text": [{"type": "text", "text": {"content": "bring gloves"}}]}
    })
}

/// Properties of a generated occurrence due on `date`.
pub fn occurrence_props(name: &str, date: &str) -> Value {
    json!({
        "Task": {"type": "title", "title": [{"type": "text", "text": {"content": name}}]},
        "Task Type": {"type": "select", "select": {"name": "Templated task"}},
        "Date": {"type": "date", "date": {"start": date, "end": null}},
        "Done": {"type": "checkbox", "checkbox": false}
    })
}

/// Properties of an unrelated, manually created task due on `date`.
pub fn manual_task_props(name: &str, date: &str) -> Value {
    json!({
        "Task": {"type": "title", "title": [{"type": "text", "text": {"content": name}}]},
        "Task Type": {"type": "select", "select": {"name": "Personal"}},
        "Date": {"type": "date", "date": {"start": date}}
    })
}

/// Page wrapping the given properties.
pub fn page(id: &str, properties: Value) -> Page {
    Page {
        id: id.to_string(),
        properties: properties.as_object().cloned().unwrap_or_default(),
        archived: false,
    }
}

/// Due dates of created pages whose title is `name`, in creation order.
pub fn due_dates(pages: &[Page], name: &str) -> Vec<NaiveDate> {
    pages
        .iter()
        .filter(|p| p.title("Task") == Some(name))
        .filter_map(|p| p.date_day("Date"))
        .collect()
}
