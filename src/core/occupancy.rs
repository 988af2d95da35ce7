//! Per-day occurrence counts and the counter that builds them from the store.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use crate::core::calendar::Window;
use crate::core::store::{parse_day, Filter, TaskStore};

/// Count of records per calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayCounts {
    counts: BTreeMap<NaiveDate, u32>,
}

impl DayCounts {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for `date`, zero when absent.
    pub fn get(&self, date: NaiveDate) -> u32 {
        self.counts.get(&date).copied().unwrap_or(0)
    }

    /// Add one to `date`.
    pub fn increment(&mut self, date: NaiveDate) {
        *self.counts.entry(date).or_insert(0) += 1;
    }

    /// Set the count for `date`.
    pub fn set(&mut self, date: NaiveDate, count: u32) {
        self.counts.insert(date, count);
    }

    /// Sum of all counts.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Days with a non-zero count, in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u32)> + '_ {
        self.counts.iter().map(|(d, c)| (*d, *c))
    }

    /// True when no day has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Per-day sum of two tables.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (date, count) in other.iter() {
            *out.counts.entry(date).or_insert(0) += count;
        }
        out
    }
}

impl FromIterator<(NaiveDate, u32)> for DayCounts {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, u32)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Count records whose `date_property` falls inside `window`.
///
/// A failed query is logged and treated as an empty table; a record whose date
/// cannot be read is logged and skipped. Days outside `window` are not counted.
pub async fn count_existing<S>(store: &S, date_property: &str, window: Window) -> DayCounts
where
    S: TaskStore + ?Sized,
{
    let filter = Filter::And(vec![
        Filter::DateOnOrAfter {
            property: date_property.to_string(),
            date: window.start,
        },
        Filter::DateOnOrBefore {
            property: date_property.to_string(),
            date: window.end,
        },
    ]);
    tracing::info!(start = %window.start, end = %window.end, "fetching existing tasks");

    let pages = match store.query(&filter).await {
        Ok(pages) => pages,
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch existing tasks; assuming none");
            return DayCounts::new();
        }
    };

    let mut counts = DayCounts::new();
    for page in &pages {
        let start = page
            .properties
            .get(date_property)
            .and_then(|p| p.get("date"))
            .and_then(|d| d.get("start"));
        let day = match start {
            None | Some(Value::Null) => continue,
            Some(Value::String(raw)) => parse_day(raw),
            Some(_) => None,
        };
        match day {
            Some(day) if window.contains(day) => counts.increment(day),
            Some(day) => {
                tracing::debug!(page_id = %page.id, %day, "ignoring task outside window");
            }
            None => tracing::warn!(
                page_id = %page.id,
                start = ?start,
                "skipping task with unreadable date"
            ),
        }
    }

    tracing::info!(found = pages.len(), per_day = ?counts, "counted existing tasks");
    counts
}
