use crate::core::calendar::DateTime;
use serde::Serialize;

pub const DEFAULT_COMPARE_OFFSET_DAYS: i64 = 365;

/// A primary or comparison range. `from <= to` is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: DateTime,
    pub to: DateTime,
}

impl DateRange {
    pub fn new(from: DateTime, to: DateTime) -> Self {
        Self { from, to }
    }

    pub fn shift_days(self, delta: i64) -> Self {
        Self {
            from: self.from.add_days(delta),
            to: self.to.add_days(delta),
        }
    }

    /// `Jan 1, 2023 - Dec 31, 2023`; a single day shows once.
    pub fn label(&self) -> String {
        if self.from.date == self.to.date {
            self.from.date.to_label()
        } else {
            format!("{} - {}", self.from.date.to_label(), self.to.date.to_label())
        }
    }
}

/// Payload handed to the consumer when a selection is confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeUpdate {
    pub range: DateRange,
    pub range_compare: Option<DateRange>,
}

/// Derives the comparison period that precedes a primary range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeComparator {
    offset_days: i64,
}

impl Default for RangeComparator {
    fn default() -> Self {
        Self::new(DEFAULT_COMPARE_OFFSET_DAYS)
    }
}

impl RangeComparator {
    pub fn new(offset_days: i64) -> Self {
        Self { offset_days }
    }

    /// Both ends moved back by the offset; length and time of day are kept.
    pub fn default_compare(&self, range: &DateRange) -> DateRange {
        range.shift_days(-self.offset_days)
    }
}
