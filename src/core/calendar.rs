//! Calendar helpers for the scheduling window.

use chrono::{Datelike, Days, NaiveDate};

/// Last calendar day of the month containing `today`.
///
/// Jumps to day 28, adds four days to land in the following month, then steps
/// back from that month's first day.
pub fn end_of_month(today: NaiveDate) -> NaiveDate {
    let day_28 = today.with_day(28).unwrap_or(today);
    day_28
        .checked_add_days(Days::new(4))
        .and_then(|next_month| next_month.with_day(1))
        .and_then(|first| first.pred_opt())
        .unwrap_or(day_28)
}

/// Closed date interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First day in the window.
    pub start: NaiveDate,
    /// Last day in the window (inclusive).
    pub end: NaiveDate,
}

impl Window {
    /// Window from `today` through the last day of its month.
    pub fn current_month(today: NaiveDate) -> Self {
        Self {
            start: today,
            end: end_of_month(today),
        }
    }

    /// True when `date` lies inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, zero when `end` precedes `start`.
    pub fn days(&self) -> u64 {
        u64::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }
}
