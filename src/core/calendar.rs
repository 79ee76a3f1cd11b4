use crate::error::Error;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

const SECONDS_PER_DAY: i64 = 86_400;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// A civil date and time of day, always read as UTC.
///
/// Field order makes the derived `Ord` chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    pub date: Date,
    pub time: Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weekday(pub u8);

impl Weekday {
    pub const SUN: Self = Self(0);
    pub const MON: Self = Self(1);
    pub const SAT: Self = Self(6);
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
///
/// `month` must already be in `1..=12`; `day` may be any value and is counted
/// from the first of the month, so overflow spills into following months.
pub fn days_from_civil(year: i32, month: u8, day: i64) -> i64 {
    let y = if month <= 2 { year as i64 - 1 } else { year as i64 };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let m = month as i64;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468 + (day - 1)
}

pub fn date_from_unix_days(days: i64) -> Date {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    Date {
        year: y as i32,
        month: m as u8,
        day: d as u8,
    }
}

/// Sunday-based weekday, matching the week layout of the preset ranges.
pub fn weekday_of(date: Date) -> Weekday {
    // 1970-01-01 was a Thursday.
    Weekday((date.unix_days() + 4).rem_euclid(7) as u8)
}

pub fn now() -> DateTime {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;
    DateTime::from_unix_seconds(secs)
}

pub fn today() -> Date {
    now().date
}

pub fn validate_date(year: i32, month: u8, day: u8) -> Result<Date, String> {
    if !(1..=12).contains(&month) {
        return Err(format!("Invalid month: {month}"));
    }
    let max_day = days_in_month(year, month);
    if day < 1 || day > max_day {
        return Err(format!(
            "Invalid day {day} for {}/{year} (max {max_day})",
            month
        ));
    }
    Ok(Date { year, month, day })
}

fn iso_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("static ISO date pattern")
    })
}

impl Date {
    /// Parses `YYYY-MM-DD`, rejecting dates that do not exist.
    pub fn parse_iso(text: &str) -> Result<Self, Error> {
        let invalid = |reason: String| Error::InvalidDate {
            input: text.to_string(),
            reason,
        };
        let caps = iso_date_pattern()
            .captures(text.trim())
            .ok_or_else(|| invalid("expected YYYY-MM-DD".to_string()))?;
        let year = caps[1].parse::<i32>().map_err(|err| invalid(err.to_string()))?;
        let month = caps[2].parse::<u8>().map_err(|err| invalid(err.to_string()))?;
        let day = caps[3].parse::<u8>().map_err(|err| invalid(err.to_string()))?;
        validate_date(year, month, day).map_err(invalid)
    }

    pub fn unix_days(self) -> i64 {
        days_from_civil(self.year, self.month, self.day as i64)
    }

    pub fn add_days(self, delta: i64) -> Self {
        date_from_unix_days(self.unix_days() + delta)
    }

    pub fn first_of_month(self) -> Self {
        Date { day: 1, ..self }
    }

    pub fn last_of_month(self) -> Self {
        Date {
            day: days_in_month(self.year, self.month),
            ..self
        }
    }

    pub fn at_midnight(self) -> DateTime {
        DateTime {
            date: self,
            time: Time::MIDNIGHT,
        }
    }

    pub fn at_end_of_day(self) -> DateTime {
        DateTime {
            date: self,
            time: Time::END_OF_DAY,
        }
    }

    pub fn to_iso(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// `Jan 1, 2023`
    pub fn to_label(self) -> String {
        let month = MONTH_ABBREVIATIONS[(self.month as usize).saturating_sub(1) % 12];
        format!("{} {}, {}", month, self.day, self.year)
    }
}

impl Time {
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    pub const END_OF_DAY: Self = Self {
        hour: 23,
        minute: 59,
        second: 59,
    };

    pub fn seconds_of_day(self) -> i64 {
        self.hour as i64 * 3600 + self.minute as i64 * 60 + self.second as i64
    }

    pub fn to_iso(self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl DateTime {
    pub fn new(date: Date, time: Time) -> Self {
        Self { date, time }
    }

    pub fn from_unix_seconds(secs: i64) -> Self {
        let days = secs.div_euclid(SECONDS_PER_DAY);
        let rem = secs.rem_euclid(SECONDS_PER_DAY);
        Self {
            date: date_from_unix_days(days),
            time: Time {
                hour: (rem / 3600) as u8,
                minute: ((rem / 60) % 60) as u8,
                second: (rem % 60) as u8,
            },
        }
    }

    pub fn unix_seconds(self) -> i64 {
        self.date.unix_days() * SECONDS_PER_DAY + self.time.seconds_of_day()
    }

    /// Moves by whole days, keeping the time of day.
    pub fn add_days(self, delta: i64) -> Self {
        Self {
            date: self.date.add_days(delta),
            time: self.time,
        }
    }

    pub fn to_iso(self) -> String {
        format!("{}T{}Z", self.date.to_iso(), self.time.to_iso())
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

impl Serialize for DateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso())
    }
}
