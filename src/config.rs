use crate::core::calendar::{self, Date, DateTime};
use crate::core::compare::{DEFAULT_COMPARE_OFFSET_DAYS, DateRange};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Initial state of a range picker.
///
/// Dates are `YYYY-MM-DD` strings so the same struct reads from YAML and from
/// command line flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickerConfig {
    pub initial_date_from: Option<String>,
    pub initial_date_to: Option<String>,
    pub initial_compare_from: Option<String>,
    pub initial_compare_to: Option<String>,
    pub show_compare: bool,
    pub compare_offset_days: i64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            initial_date_from: None,
            initial_date_to: None,
            initial_compare_from: None,
            initial_compare_to: None,
            show_compare: true,
            compare_offset_days: DEFAULT_COMPARE_OFFSET_DAYS,
        }
    }
}

impl PickerConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(Error::ReadConfig)?;
        Self::from_yaml_str(&text)
    }

    /// Initial primary range. `to` falls back to `from`, `from` to today.
    pub fn initial_range(&self) -> Result<DateRange> {
        let from = match &self.initial_date_from {
            Some(text) => parse_day(text)?,
            None => calendar::today().at_midnight(),
        };
        let to = match &self.initial_date_to {
            Some(text) => parse_day(text)?,
            None => from,
        };
        Ok(DateRange::new(from, to))
    }

    /// Initial compare range, present only when a compare start is given.
    pub fn initial_compare(&self) -> Result<Option<DateRange>> {
        let Some(from_text) = &self.initial_compare_from else {
            return Ok(None);
        };
        let from = parse_day(from_text)?;
        let to = match &self.initial_compare_to {
            Some(text) => parse_day(text)?,
            None => from,
        };
        Ok(Some(DateRange::new(from, to)))
    }
}

fn parse_day(text: &str) -> Result<DateTime> {
    Ok(Date::parse_iso(text)?.at_midnight())
}

#[cfg(test)]
mod tests {
    use super::PickerConfig;
    use crate::core::calendar::Date;
    use crate::error::Error;

    #[test]
    fn yaml_fields_override_defaults() {
        let config = PickerConfig::from_yaml_str(
            "initial_date_from: \"2023-01-01\"\ninitial_date_to: \"2023-12-31\"\nshow_compare: false\n",
        )
        .expect("config should parse");

        assert!(!config.show_compare);
        assert_eq!(config.compare_offset_days, 365);
        let range = config.initial_range().expect("range");
        assert_eq!(range.from.date, Date { year: 2023, month: 1, day: 1 });
        assert_eq!(range.to.date, Date { year: 2023, month: 12, day: 31 });
    }

    #[test]
    fn missing_to_falls_back_to_from() {
        let config = PickerConfig {
            initial_date_from: Some("2023-06-05".to_string()),
            ..PickerConfig::default()
        };
        let range = config.initial_range().expect("range");
        assert_eq!(range.from, range.to);
        assert_eq!(config.initial_compare().expect("compare"), None);
    }

    #[test]
    fn compare_range_is_read_when_given() {
        let config = PickerConfig {
            initial_compare_from: Some("2022-01-01".to_string()),
            initial_compare_to: Some("2022-12-31".to_string()),
            ..PickerConfig::default()
        };
        let compare = config
            .initial_compare()
            .expect("compare")
            .expect("compare present");
        assert_eq!(compare.to.date, Date { year: 2022, month: 12, day: 31 });
    }

    #[test]
    fn invalid_dates_and_unknown_keys_are_errors() {
        let config = PickerConfig {
            initial_date_from: Some("2023-02-30".to_string()),
            ..PickerConfig::default()
        };
        assert!(matches!(
            config.initial_range(),
            Err(Error::InvalidDate { .. })
        ));

        assert!(matches!(
            PickerConfig::from_yaml_str("align: start\n"),
            Err(Error::ParseConfig(_))
        ));
    }
}
