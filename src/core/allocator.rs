//! Allocation of template occurrences onto calendar days under a shared daily cap.
//!
//! Each template walks the window from its start in steps of its own interval.
//! A day whose existing plus planned count has reached the cap is passed over,
//! and the walk continues at the next step rather than the next calendar day.
//! Planned counts are shared across templates, so earlier templates claim
//! scarce slots first.

use std::time::Duration;

use chrono::Days;

use crate::config::SchedulerConfig;
use crate::core::audit::{AuditAction, AuditEvent, AuditSink};
use crate::core::calendar::Window;
use crate::core::codec::{PropertyCodec, PropertyMap};
use crate::core::occupancy::DayCounts;
use crate::core::records::create_occurrence;
use crate::core::store::{Page, TaskStore};

/// Outcome of one allocation pass.
#[derive(Debug, Clone, Default)]
pub struct Allocation {
    /// Records created, in creation order.
    pub created: Vec<Page>,
    /// Occurrences created per day by this pass.
    pub planned: DayCounts,
}

/// Schedules template occurrences through a [`TaskStore`].
pub struct Allocator<'a, S: ?Sized> {
    store: &'a S,
    codec: PropertyCodec<'a>,
    daily_cap: u32,
    pause: Duration,
}

impl<'a, S> Allocator<'a, S>
where
    S: TaskStore + ?Sized,
{
    /// Create an allocator using the cap and pause from `policy`.
    pub fn new(store: &'a S, codec: PropertyCodec<'a>, policy: &SchedulerConfig) -> Self {
        Self {
            store,
            codec,
            daily_cap: policy.daily_cap,
            pause: policy.template_pause(),
        }
    }

    /// Override the pause inserted between templates.
    #[must_use]
    pub const fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Place occurrences of every template inside `window`.
    ///
    /// Templates are processed in order. `existing` is never modified; the
    /// returned [`Allocation::planned`] holds what this pass added.
    pub async fn allocate(
        &self,
        templates: &[PropertyMap],
        existing: &DayCounts,
        window: Window,
        audit: &mut dyn AuditSink,
    ) -> Allocation {
        let mut allocation = Allocation::default();
        tracing::info!(
            templates = templates.len(),
            start = %window.start,
            end = %window.end,
            days = window.days(),
            "allocating occurrences"
        );

        for (index, template) in templates.iter().enumerate() {
            tracing::info!(
                template = %template.name,
                position = index + 1,
                of = templates.len(),
                every_days = template.regularity_days,
                "processing template"
            );
            self.allocate_template(template, existing, window, &mut allocation, audit)
                .await;

            if index + 1 < templates.len() && !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }
        }

        tracing::info!(
            created = allocation.created.len(),
            per_day = ?existing.merged(&allocation.planned),
            "allocation complete"
        );
        allocation
    }

    async fn allocate_template(
        &self,
        template: &PropertyMap,
        existing: &DayCounts,
        window: Window,
        allocation: &mut Allocation,
        audit: &mut dyn AuditSink,
    ) {
        if template.regularity_days == 0 {
            tracing::info!(template = %template.name, "skipping template without regularity");
            audit.record(AuditEvent::undated(&template.name, AuditAction::TemplateSkipped));
            return;
        }
        let step = Days::new(u64::from(template.regularity_days));

        let mut cursor = window.start;
        let mut created = 0_usize;
        while cursor <= window.end {
            let total = existing.get(cursor) + allocation.planned.get(cursor);

            if total >= self.daily_cap {
                tracing::info!(
                    template = %template.name,
                    date = %cursor,
                    cap = self.daily_cap,
                    "daily limit reached, skipping date"
                );
                audit.record(AuditEvent::dated(&template.name, cursor, AuditAction::CapSkipped));
            } else {
                tracing::debug!(
                    template = %template.name,
                    date = %cursor,
                    day_total = total,
                    cap = self.daily_cap,
                    "creating occurrence"
                );
                match create_occurrence(self.store, &self.codec, template, cursor).await {
                    Some(page) => {
                        audit.record(
                            AuditEvent::dated(&template.name, cursor, AuditAction::Created)
                                .with_record(&page.id),
                        );
                        allocation.planned.increment(cursor);
                        allocation.created.push(page);
                        created += 1;
                    }
                    None => {
                        audit.record(AuditEvent::dated(
                            &template.name,
                            cursor,
                            AuditAction::CreateFailed,
                        ));
                    }
                }
            }

            match cursor.checked_add_days(step) {
                Some(next) => cursor = next,
                None => break,
            }
        }

        tracing::info!(template = %template.name, created, "template done");
    }
}
