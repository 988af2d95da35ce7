//! Audit trail of scheduling and cleanup decisions.

use std::collections::VecDeque;
use std::fmt;

use chrono::NaiveDate;

/// Decision taken for one template/date pair or one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    /// An occurrence was created.
    Created,
    /// The day was already at the cap; no call was made.
    CapSkipped,
    /// The creation call failed.
    CreateFailed,
    /// The template was not scheduled at all.
    TemplateSkipped,
    /// A record was archived.
    Archived,
    /// The archive call failed.
    ArchiveFailed,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::CapSkipped => "cap_skipped",
            Self::CreateFailed => "create_failed",
            Self::TemplateSkipped => "template_skipped",
            Self::Archived => "archived",
            Self::ArchiveFailed => "archive_failed",
        };
        f.write_str(s)
    }
}

/// Audit event structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Template or record display name.
    pub name: String,
    /// Due date the decision concerns, if any.
    pub date: Option<NaiveDate>,
    /// Action taken.
    pub action: AuditAction,
    /// Record id, when the store assigned or reported one.
    pub record_id: Option<String>,
}

impl AuditEvent {
    /// Event for a template/date decision.
    pub fn dated(name: impl Into<String>, date: NaiveDate, action: AuditAction) -> Self {
        Self {
            name: name.into(),
            date: Some(date),
            action,
            record_id: None,
        }
    }

    /// Event with no date attached.
    pub fn undated(name: impl Into<String>, action: AuditAction) -> Self {
        Self {
            name: name.into(),
            date: None,
            action,
            record_id: None,
        }
    }

    /// Attach a record id.
    #[must_use]
    pub fn with_record(mut self, id: impl Into<String>) -> Self {
        self.record_id = Some(id.into());
        self
    }
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: AuditEvent);
}

/// In-memory audit sink with a bounded buffer; the oldest events are dropped first.
pub struct InMemoryAuditSink {
    events: VecDeque<AuditEvent>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events.min(1024)),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.iter().cloned().collect()
    }

    /// Stored events with the given action.
    pub fn with_action(&self, action: AuditAction) -> Vec<AuditEvent> {
        self.events
            .iter()
            .filter(|e| e.action == action)
            .cloned()
            .collect()
    }

    /// Drain all stored events.
    pub fn take(&mut self) -> Vec<AuditEvent> {
        self.events.drain(..).collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: AuditEvent) {
        if self.max_events == 0 {
            return;
        }
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAuditSink;

impl AuditSink for NullAuditSink {
    fn record(&mut self, _event: AuditEvent) {}
}
