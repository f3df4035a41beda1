/// Filter stage: narrow record sets to a user and a date interval
///
/// This is the first step of every dashboard computation. It is infallible:
/// an absent user means "all users" and an empty input yields empty output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{HealthRecord, UserId};

/// An inclusive calendar-date interval
///
/// The constructor accepts its bounds in either order and normalizes so the
/// earlier date is the start; a single date is both start and end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range from two dates supplied in either order
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Build a single-day range
    pub fn single(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive on both ends
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Keep records matching the optional user and the date interval
///
/// Output preserves the input's relative ordering; records arrive pre-sorted
/// from the store and are not re-sorted here.
pub fn filter_records<R: HealthRecord + Clone>(
    records: &[R],
    user_id: Option<&UserId>,
    range: DateRange,
) -> Vec<R> {
    records
        .iter()
        .filter(|r| user_id.map_or(true, |u| r.user_id() == u))
        .filter(|r| range.contains(r.date()))
        .cloned()
        .collect()
}
