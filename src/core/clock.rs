//! Calendar arithmetic over [`DateParts`].
//!
//! Every function here is pure: parts go in by value and new parts come out.
//! Storing the latest value and deciding what to emit is left to the widget.

use crate::core::calendar::days_in_month;
use crate::core::date_parts::{DateField, DateParts};

/// Result of replacing one field with a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOutcome {
    pub parts: DateParts,
    pub valid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// How a field wraps and which coarser field absorbs the carry.
struct Rollover {
    carry: Option<DateField>,
    low: i64,
    high: fn(&DateParts) -> Option<i64>,
}

fn rollover(field: DateField) -> Rollover {
    match field {
        DateField::Day => Rollover {
            carry: Some(DateField::Month),
            low: 1,
            high: |parts| Some(last_day_of(parts.month, parts.year)),
        },
        DateField::Month => Rollover {
            carry: Some(DateField::Year),
            low: 1,
            high: |_| Some(12),
        },
        DateField::Year => Rollover {
            carry: None,
            low: i64::MIN,
            high: |_| None,
        },
    }
}

pub fn last_day_of(month: i64, year: i64) -> i64 {
    let month = u8::try_from(month).unwrap_or(0);
    // Leap years repeat every 400 years.
    let year = year.rem_euclid(400) as i32;
    days_in_month(year, month) as i64
}

/// True when the triple names a real calendar day: building a date from it
/// and reading the fields back gives the same triple.
pub fn validate(parts: DateParts) -> bool {
    if !(1..=12).contains(&parts.month) || !(1..=31).contains(&parts.day) {
        return false;
    }
    DateParts::from_date(parts.to_date()) == parts
}

/// Replaces `field` with `raw` and reports whether the result may be emitted.
///
/// The edit is always kept so the caller can keep showing what was typed.
/// Values outside the field's accepted range are never valid, even when the
/// lenient date construction would absorb them.
pub fn apply_edit(parts: DateParts, field: DateField, raw: i64) -> EditOutcome {
    let parts = parts.with(field, raw);
    EditOutcome {
        parts,
        valid: is_acceptable(parts),
    }
}

/// Every field inside its accepted range and the triple a real date.
pub fn is_acceptable(parts: DateParts) -> bool {
    DateField::ORDER
        .iter()
        .all(|field| field.accepted_range().contains(&parts.get(*field)))
        && validate(parts)
}

/// Reads a field's text the way the edit path sees it; empty or non-numeric
/// text reads as zero, which no field accepts.
pub fn parse_field(text: &str) -> i64 {
    text.trim().parse().unwrap_or(0)
}

pub fn increment(parts: DateParts, field: DateField) -> DateParts {
    step(parts, field, Direction::Up)
}

pub fn decrement(parts: DateParts, field: DateField) -> DateParts {
    step(parts, field, Direction::Down)
}

fn step(parts: DateParts, field: DateField, direction: Direction) -> DateParts {
    let rule = rollover(field);
    let value = parts.get(field);

    match (direction, (rule.high)(&parts)) {
        (Direction::Up, Some(high)) if value == high => {
            let next = parts.with(field, rule.low);
            match rule.carry {
                Some(carry) => step(next, carry, Direction::Up),
                None => next,
            }
        }
        (Direction::Down, Some(_)) if value == rule.low => {
            let next = match rule.carry {
                Some(carry) => step(parts, carry, Direction::Down),
                None => parts,
            };
            let wrapped = (rule.high)(&next).unwrap_or(rule.low);
            next.with(field, wrapped)
        }
        (Direction::Up, _) => parts.with(field, value.saturating_add(1)),
        (Direction::Down, _) => parts.with(field, value.saturating_sub(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        apply_edit, decrement, increment, is_acceptable, last_day_of, parse_field, validate,
    };
    use crate::core::date_parts::{DateField, DateParts};

    fn parts(year: i64, month: i64, day: i64) -> DateParts {
        DateParts::new(year, month, day)
    }

    #[test]
    fn last_day_respects_leap_years() {
        assert_eq!(last_day_of(2, 2024), 29);
        assert_eq!(last_day_of(2, 2023), 28);
        assert_eq!(last_day_of(2, 2000), 29);
        assert_eq!(last_day_of(2, 1900), 28);
        assert_eq!(last_day_of(4, 2023), 30);
        assert_eq!(last_day_of(12, 2023), 31);
    }

    #[test]
    fn validate_detects_overflowing_days() {
        assert!(validate(parts(2023, 4, 30)));
        assert!(!validate(parts(2023, 4, 31)));
        assert!(validate(parts(2024, 2, 29)));
        assert!(!validate(parts(2023, 2, 29)));
        assert!(!validate(parts(1900, 2, 29)));
        assert!(validate(parts(2000, 2, 29)));
        assert!(!validate(parts(2023, 0, 10)));
        assert!(!validate(parts(2023, 13, 10)));
        assert!(!validate(parts(2023, 5, 0)));
    }

    #[test]
    fn apply_edit_matches_calendar_validity() {
        let base = parts(2023, 1, 31);
        let cases = [
            (DateField::Month, 2, false),
            (DateField::Month, 3, true),
            (DateField::Month, 0, false),
            (DateField::Month, 13, false),
            (DateField::Day, 1, true),
            (DateField::Day, 32, false),
            (DateField::Day, 0, false),
            (DateField::Year, 2024, true),
            (DateField::Year, 999, false),
            (DateField::Year, 10_000, false),
        ];
        for (field, value, expected) in cases {
            let outcome = apply_edit(base, field, value);
            assert_eq!(outcome.valid, expected, "{field:?} = {value}");
            assert_eq!(outcome.parts.get(field), value);
        }
    }

    #[test]
    fn apply_edit_keeps_other_fields() {
        let outcome = apply_edit(parts(2023, 6, 15), DateField::Day, 45);
        assert_eq!(outcome.parts, parts(2023, 6, 45));
    }

    // Out-of-range keystrokes are accepted into the parts but reported
    // invalid, so the caller displays them without emitting a change.
    #[test]
    fn out_of_range_edit_is_accepted_but_not_valid() {
        let outcome = apply_edit(parts(2023, 6, 15), DateField::Month, 14);
        assert_eq!(outcome.parts.month, 14);
        assert!(!outcome.valid);
    }

    #[test]
    fn parse_field_reads_empty_as_zero() {
        assert_eq!(parse_field("02"), 2);
        assert_eq!(parse_field(""), 0);
        assert_eq!(parse_field("x1"), 0);
    }

    #[test]
    fn day_increment_rolls_into_next_month() {
        assert_eq!(increment(parts(2023, 1, 31), DateField::Day), parts(2023, 2, 1));
        assert_eq!(increment(parts(2023, 2, 28), DateField::Day), parts(2023, 3, 1));
        assert_eq!(increment(parts(2024, 2, 28), DateField::Day), parts(2024, 2, 29));
        assert_eq!(increment(parts(2023, 12, 31), DateField::Day), parts(2024, 1, 1));
        assert_eq!(increment(parts(2023, 6, 10), DateField::Day), parts(2023, 6, 11));
    }

    #[test]
    fn day_decrement_rolls_into_previous_month() {
        assert_eq!(decrement(parts(2023, 3, 1), DateField::Day), parts(2023, 2, 28));
        assert_eq!(decrement(parts(2024, 3, 1), DateField::Day), parts(2024, 2, 29));
        assert_eq!(decrement(parts(2023, 1, 1), DateField::Day), parts(2022, 12, 31));
        assert_eq!(decrement(parts(2023, 5, 1), DateField::Day), parts(2023, 4, 30));
        assert_eq!(decrement(parts(2023, 6, 10), DateField::Day), parts(2023, 6, 9));
    }

    #[test]
    fn day_steps_are_inverse_away_from_month_end() {
        for month in 1..=12 {
            for day in 1..last_day_of(month, 2024) {
                let start = parts(2024, month, day);
                let stepped = increment(start, DateField::Day);
                assert_eq!(decrement(stepped, DateField::Day), start);
            }
        }
    }

    #[test]
    fn month_steps_roll_the_year() {
        assert_eq!(increment(parts(2023, 12, 5), DateField::Month), parts(2024, 1, 5));
        assert_eq!(decrement(parts(2023, 1, 5), DateField::Month), parts(2022, 12, 5));
        assert_eq!(increment(parts(2023, 6, 5), DateField::Month), parts(2023, 7, 5));
        assert_eq!(decrement(parts(2023, 6, 5), DateField::Month), parts(2023, 5, 5));
    }

    #[test]
    fn year_steps_leave_day_and_month() {
        assert_eq!(increment(parts(2023, 3, 9), DateField::Year), parts(2024, 3, 9));
        assert_eq!(decrement(parts(2023, 3, 9), DateField::Year), parts(2022, 3, 9));
    }

    // Stepping the month keeps the day even when the new month is shorter;
    // the intermediate triple is left invalid rather than clamped.
    #[test]
    fn month_step_retains_day_past_month_end() {
        let next = increment(parts(2023, 1, 31), DateField::Month);
        assert_eq!(next, parts(2023, 2, 31));
        assert!(!validate(next));
        assert_eq!(next.to_date().to_iso(), "2023-03-03");

        let prev = decrement(parts(2023, 5, 31), DateField::Month);
        assert_eq!(prev, parts(2023, 4, 31));
        assert!(!validate(prev));
    }

    #[test]
    fn extreme_parts_never_panic() {
        let huge = parts(i64::MAX, 1, 1);
        assert!(!validate(huge));
        assert!(!validate(parts(i64::MAX / 2, 1, 1)));
        assert!(!validate(parts(i64::MIN, 12, 31)));
        assert!(!validate(parts(2023, 1, i64::MAX)));
        assert!(!is_acceptable(huge));

        assert_eq!(increment(huge, DateField::Year), huge);
        assert_eq!(decrement(parts(i64::MIN, 1, 1), DateField::Year).year, i64::MIN);
        assert_eq!(increment(parts(2023, 5, i64::MAX), DateField::Day).day, i64::MAX);
        assert_eq!(decrement(parts(2023, i64::MIN, 10), DateField::Month).month, i64::MIN);
        assert_eq!(last_day_of(2, i64::MAX), last_day_of(2, i64::MAX.rem_euclid(400)));

        let outcome = apply_edit(parts(2023, 6, 15), DateField::Year, i64::MAX);
        assert!(!outcome.valid);
        assert_eq!(outcome.parts.year, i64::MAX);
    }
}
