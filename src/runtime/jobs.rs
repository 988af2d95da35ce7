//! Scheduler and cleanup passes over one task store.

use chrono::{Datelike, NaiveDate};

use crate::config::{FieldNames, SchedulerConfig};
use crate::core::{
    archive_record, count_existing, AuditAction, AuditEvent, AuditSink, Allocator, DayCounts,
    Filter, InMemoryAuditSink, Page, PropertyCodec, TaskStore, Window,
};
use crate::runtime::confirm::Confirmation;

/// Upper bound on audit events kept per run.
const AUDIT_CAPACITY: usize = 10_000;

/// Result of a scheduler pass.
#[derive(Debug, Clone, Default)]
pub struct ScheduleReport {
    /// Window the pass covered; `None` when the pass never started.
    pub window: Option<Window>,
    /// Records created, in creation order.
    pub created: Vec<Page>,
    /// Existing plus newly created records per day.
    pub per_day: DayCounts,
    /// Decisions taken during allocation.
    pub events: Vec<AuditEvent>,
}

impl ScheduleReport {
    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        match self.window {
            Some(w) => format!(
                "Created {} tasks for {}/{}",
                self.created.len(),
                w.start.month(),
                w.start.year()
            ),
            None => format!("Created {} tasks", self.created.len()),
        }
    }
}

/// Result of a cleanup pass.
#[derive(Debug, Clone, Default)]
pub struct CleanupReport {
    /// Dated templated records found.
    pub found: usize,
    /// Records successfully archived.
    pub archived: usize,
    /// True when the operator declined.
    pub cancelled: bool,
    /// Archive outcomes.
    pub events: Vec<AuditEvent>,
}

impl CleanupReport {
    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        if self.cancelled {
            return "Deletion cancelled.".to_string();
        }
        format!(
            "Successfully deleted {} of {} tasks.",
            self.archived, self.found
        )
    }
}

/// Filter selecting templates: marked as templated and without a date.
pub fn template_filter(fields: &FieldNames) -> Filter {
    Filter::And(vec![
        Filter::SelectEquals {
            property: fields.task_type.clone(),
            value: fields.templated_marker.clone(),
        },
        Filter::DateIsEmpty {
            property: fields.date.clone(),
        },
    ])
}

/// Filter selecting generated occurrences: marked as templated and dated.
pub fn occurrence_filter(fields: &FieldNames) -> Filter {
    Filter::And(vec![
        Filter::SelectEquals {
            property: fields.task_type.clone(),
            value: fields.templated_marker.clone(),
        },
        Filter::DateIsNotEmpty {
            property: fields.date.clone(),
        },
    ])
}

/// Create occurrences of every template from `today` to the end of its month.
///
/// Schema retrieval is the only step whose failure stops the pass; every other
/// store failure degrades to an empty result for that step.
pub async fn run_schedule<S>(store: &S, policy: &SchedulerConfig, today: NaiveDate) -> ScheduleReport
where
    S: TaskStore + ?Sized,
{
    let fields = &policy.fields;
    let window = Window::current_month(today);
    let mut report = ScheduleReport {
        window: Some(window),
        ..ScheduleReport::default()
    };
    tracing::info!(
        start = %window.start,
        end = %window.end,
        daily_cap = policy.daily_cap,
        "scheduling tasks"
    );

    let schema = match store.fetch_schema().await {
        Ok(schema) if !schema.is_empty() => schema,
        Ok(_) => {
            tracing::error!("database schema is empty; cannot continue");
            return report;
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to retrieve database schema; cannot continue");
            return report;
        }
    };

    let existing = count_existing(store, &fields.date, window).await;

    tracing::info!("fetching templated tasks");
    let templates = match store.query(&template_filter(fields)).await {
        Ok(pages) => pages,
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch templated tasks");
            Vec::new()
        }
    };
    if templates.is_empty() {
        tracing::warn!("no templated tasks found; nothing to schedule");
        report.per_day = existing;
        return report;
    }
    tracing::info!(count = templates.len(), "found templated tasks");

    let codec = PropertyCodec::new(&schema, fields);
    let maps: Vec<_> = templates.iter().map(|page| codec.extract(page)).collect();

    let mut audit = InMemoryAuditSink::new(AUDIT_CAPACITY);
    let allocation = Allocator::new(store, codec, policy)
        .allocate(&maps, &existing, window, &mut audit)
        .await;

    report.per_day = existing.merged(&allocation.planned);
    report.created = allocation.created;
    report.events = audit.take();
    tracing::info!(
        created = report.created.len(),
        month = today.month(),
        year = today.year(),
        "completed scheduling"
    );
    report
}

/// Archive every dated templated record after an operator confirmation.
pub async fn run_cleanup<S>(
    store: &S,
    fields: &FieldNames,
    confirmation: &mut dyn Confirmation,
) -> CleanupReport
where
    S: TaskStore + ?Sized,
{
    let mut report = CleanupReport::default();

    tracing::info!("fetching templated tasks with dates");
    let pages = match store.query(&occurrence_filter(fields)).await {
        Ok(pages) => pages,
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch templated tasks with dates");
            return report;
        }
    };
    report.found = pages.len();
    if pages.is_empty() {
        tracing::info!("no templated tasks with dates found; nothing to delete");
        return report;
    }
    tracing::info!(count = pages.len(), "found templated tasks with dates to delete");

    let prompt = format!(
        "About to delete {} templated tasks with dates.\nAre you sure you want to continue? (yes/no): ",
        pages.len()
    );
    if !confirmation.confirm(&prompt) {
        tracing::info!("deletion cancelled by user");
        report.cancelled = true;
        return report;
    }

    let mut audit = InMemoryAuditSink::new(AUDIT_CAPACITY);
    for page in &pages {
        let name = page.title(&fields.title).unwrap_or("Unnamed Task");
        let event = if archive_record(store, &page.id, name).await {
            report.archived += 1;
            AuditEvent::undated(name, AuditAction::Archived)
        } else {
            AuditEvent::undated(name, AuditAction::ArchiveFailed)
        };
        audit.record(event.with_record(&page.id));
    }
    report.events = audit.take();

    tracing::info!(
        archived = report.archived,
        found = report.found,
        "task deletion complete"
    );
    report
}
