use crate::core::calendar::{DateTime, Date, date_from_unix_days, days_from_civil};
use std::ops::RangeInclusive;

/// Bound applied to each component before lenient date construction.
const LENIENT_YEARS: i64 = 1_000_000;

/// One editable field of a [`DateParts`] triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Month,
    Day,
    Year,
}

impl DateField {
    /// Focus order of the fields within a date input.
    pub const ORDER: [DateField; 3] = [DateField::Month, DateField::Day, DateField::Year];

    pub fn index(self) -> usize {
        match self {
            DateField::Month => 0,
            DateField::Day => 1,
            DateField::Year => 2,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::ORDER.get(self.index() + 1).copied()
    }

    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).map(|idx| Self::ORDER[idx])
    }

    /// Values a typed edit may hold before it is checked as a calendar date.
    pub fn accepted_range(self) -> RangeInclusive<i64> {
        match self {
            DateField::Month => 1..=12,
            DateField::Day => 1..=31,
            DateField::Year => 1000..=9999,
        }
    }

    pub fn max_len(self) -> usize {
        match self {
            DateField::Year => 4,
            _ => 2,
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            DateField::Month => "MM",
            DateField::Day => "DD",
            DateField::Year => "YYYY",
        }
    }
}

/// A calendar date split into the fields a user edits.
///
/// Fields are signed and unbounded so that a half-typed or out-of-range value
/// can be held while the user is still editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateParts {
    pub day: i64,
    pub month: i64,
    pub year: i64,
}

impl DateParts {
    pub fn new(year: i64, month: i64, day: i64) -> Self {
        Self { day, month, year }
    }

    pub fn from_date(date: Date) -> Self {
        Self {
            day: date.day as i64,
            month: date.month as i64,
            year: date.year as i64,
        }
    }

    pub fn from_datetime(value: DateTime) -> Self {
        Self::from_date(value.date)
    }

    pub fn get(&self, field: DateField) -> i64 {
        match field {
            DateField::Month => self.month,
            DateField::Day => self.day,
            DateField::Year => self.year,
        }
    }

    pub fn set(&mut self, field: DateField, value: i64) {
        match field {
            DateField::Month => self.month = value,
            DateField::Day => self.day = value,
            DateField::Year => self.year = value,
        }
    }

    pub fn with(mut self, field: DateField, value: i64) -> Self {
        self.set(field, value);
        self
    }

    /// Builds a date the way a lenient calendar constructor does: months past
    /// December roll into the next year and days past the end of the month
    /// roll into the next month (day 0 is the last day of the previous one).
    ///
    /// Each component is clamped to a million years' worth first so the
    /// result always fits in a [`Date`].
    pub fn to_date(self) -> Date {
        let year = self.year.clamp(-LENIENT_YEARS, LENIENT_YEARS);
        let month = self.month.clamp(-LENIENT_YEARS * 12, LENIENT_YEARS * 12);
        let day = self.day.clamp(-LENIENT_YEARS * 366, LENIENT_YEARS * 366);
        let months = year * 12 + (month - 1);
        let year = months.div_euclid(12) as i32;
        let month = (months.rem_euclid(12) + 1) as u8;
        date_from_unix_days(days_from_civil(year, month, day))
    }

    pub fn to_datetime(self) -> DateTime {
        self.to_date().at_midnight()
    }

    pub fn field_text(&self, field: DateField) -> String {
        self.get(field).to_string()
    }
}

impl From<DateTime> for DateParts {
    fn from(value: DateTime) -> Self {
        Self::from_datetime(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{DateField, DateParts};
    use crate::core::calendar::Date;

    #[test]
    fn fields_are_ordered_month_day_year() {
        assert_eq!(DateField::Month.next(), Some(DateField::Day));
        assert_eq!(DateField::Day.next(), Some(DateField::Year));
        assert_eq!(DateField::Year.next(), None);
        assert_eq!(DateField::Year.prev(), Some(DateField::Day));
        assert_eq!(DateField::Month.prev(), None);
    }

    #[test]
    fn to_date_normalizes_overflow() {
        let april_31 = DateParts::new(2023, 4, 31);
        assert_eq!(
            april_31.to_date(),
            Date {
                year: 2023,
                month: 5,
                day: 1
            }
        );

        let month_13 = DateParts::new(2023, 13, 1);
        assert_eq!(
            month_13.to_date(),
            Date {
                year: 2024,
                month: 1,
                day: 1
            }
        );

        let day_zero = DateParts::new(2024, 3, 0);
        assert_eq!(
            day_zero.to_date(),
            Date {
                year: 2024,
                month: 2,
                day: 29
            }
        );
    }

    #[test]
    fn with_replaces_a_single_field() {
        let parts = DateParts::new(2023, 1, 15).with(DateField::Month, 7);
        assert_eq!(parts, DateParts::new(2023, 7, 15));
    }
}
