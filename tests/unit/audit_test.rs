//! Tests for audit sink

use chrono::NaiveDate;
use task_recurrence::core::{AuditAction, AuditEvent, AuditSink, InMemoryAuditSink, NullAuditSink};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

#[test]
fn test_in_memory_audit_sink() {
    let mut sink = InMemoryAuditSink::new(10);

    sink.record(AuditEvent::dated("Journal", day(18), AuditAction::Created).with_record("p1"));
    sink.record(AuditEvent::dated("Journal", day(19), AuditAction::CapSkipped));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].name, "Journal");
    assert_eq!(events[0].record_id.as_deref(), Some("p1"));
    assert_eq!(events[1].date, Some(day(19)));
    assert_eq!(sink.with_action(AuditAction::CapSkipped).len(), 1);
}

#[test]
fn test_audit_sink_overflow() {
    let mut sink = InMemoryAuditSink::new(2);

    sink.record(AuditEvent::undated("a", AuditAction::Archived));
    sink.record(AuditEvent::undated("b", AuditAction::Archived));
    sink.record(AuditEvent::undated("c", AuditAction::ArchiveFailed));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].name, "b"); // First one popped
    assert_eq!(events[1].name, "c");
}

#[test]
fn test_take_drains() {
    let mut sink = InMemoryAuditSink::new(4);
    sink.record(AuditEvent::undated("Broken", AuditAction::TemplateSkipped));

    assert_eq!(sink.take().len(), 1);
    assert!(sink.events().is_empty());
}

#[test]
fn test_zero_capacity_keeps_nothing() {
    let mut sink = InMemoryAuditSink::new(0);
    sink.record(AuditEvent::undated("a", AuditAction::Created));
    assert!(sink.events().is_empty());
}

#[test]
fn test_null_sink_accepts_events() {
    let mut sink = NullAuditSink;
    sink.record(AuditEvent::undated("a", AuditAction::Created));
}

#[test]
fn test_action_display() {
    assert_eq!(AuditAction::CapSkipped.to_string(), "cap_skipped");
    assert_eq!(AuditAction::CreateFailed.to_string(), "create_failed");
    assert_eq!(AuditAction::Archived.to_string(), "archived");
}
