//! Tests for report summaries and confirmation handling

use chrono::NaiveDate;
use task_recurrence::core::{Page, Window};
use task_recurrence::runtime::{is_affirmative, CleanupReport, ScheduleReport};

fn blank_page(id: &str) -> Page {
    Page {
        id: id.to_string(),
        properties: serde_json::Map::new(),
        archived: false,
    }
}

#[test]
fn test_schedule_summary_names_month() {
    let today = NaiveDate::from_ymd_opt(2027, 2, 10).unwrap();
    let report = ScheduleReport {
        window: Some(Window::current_month(today)),
        created: vec![blank_page("a"), blank_page("b")],
        ..ScheduleReport::default()
    };
    assert_eq!(report.summary(), "Created 2 tasks for 2/2027");
}

#[test]
fn test_schedule_summary_without_window() {
    assert_eq!(ScheduleReport::default().summary(), "Created 0 tasks");
}

#[test]
fn test_cleanup_summary() {
    let report = CleanupReport {
        found: 4,
        archived: 3,
        ..CleanupReport::default()
    };
    assert_eq!(report.summary(), "Successfully deleted 3 of 4 tasks.");
}

#[test]
fn test_cleanup_summary_cancelled() {
    let report = CleanupReport {
        found: 4,
        cancelled: true,
        ..CleanupReport::default()
    };
    assert_eq!(report.summary(), "Deletion cancelled.");
}

#[test]
fn test_affirmative_answers() {
    assert!(is_affirmative("yes"));
    assert!(is_affirmative("Y\n"));
    assert!(!is_affirmative("no"));
    assert!(!is_affirmative(""));
}
