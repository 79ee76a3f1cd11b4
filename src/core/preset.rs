use crate::core::calendar::{Date, weekday_of};
use crate::core::compare::DateRange;

/// Quick-select ranges offered next to the date inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Today,
    Yesterday,
    Last7,
    Last14,
    Last30,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
}

impl Preset {
    pub const ALL: [Preset; 9] = [
        Preset::Today,
        Preset::Yesterday,
        Preset::Last7,
        Preset::Last14,
        Preset::Last30,
        Preset::ThisWeek,
        Preset::LastWeek,
        Preset::ThisMonth,
        Preset::LastMonth,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Today => "today",
            Preset::Yesterday => "yesterday",
            Preset::Last7 => "last7",
            Preset::Last14 => "last14",
            Preset::Last30 => "last30",
            Preset::ThisWeek => "thisWeek",
            Preset::LastWeek => "lastWeek",
            Preset::ThisMonth => "thisMonth",
            Preset::LastMonth => "lastMonth",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::Today => "Today",
            Preset::Yesterday => "Yesterday",
            Preset::Last7 => "Last 7 days",
            Preset::Last14 => "Last 14 days",
            Preset::Last30 => "Last 30 days",
            Preset::ThisWeek => "This Week",
            Preset::LastWeek => "Last Week",
            Preset::ThisMonth => "This Month",
            Preset::LastMonth => "Last Month",
        }
    }

    /// Dates covered by the preset when `today` is the reference day.
    pub fn dates(self, today: Date) -> (Date, Date) {
        let since_sunday = weekday_of(today).0 as i64;
        match self {
            Preset::Today => (today, today),
            Preset::Yesterday => {
                let day = today.add_days(-1);
                (day, day)
            }
            Preset::Last7 => (today.add_days(-6), today),
            Preset::Last14 => (today.add_days(-13), today),
            Preset::Last30 => (today.add_days(-29), today),
            Preset::ThisWeek => (today.add_days(-since_sunday), today),
            Preset::LastWeek => {
                let start = today.add_days(-since_sunday - 7);
                (start, start.add_days(6))
            }
            Preset::ThisMonth => (today.first_of_month(), today),
            Preset::LastMonth => {
                let last = today.first_of_month().add_days(-1);
                (last.first_of_month(), last)
            }
        }
    }

    /// The preset as a range from midnight of its first day to the end of its
    /// last day.
    pub fn range(self, today: Date) -> DateRange {
        let (from, to) = self.dates(today);
        DateRange::new(from.at_midnight(), to.at_end_of_day())
    }

    /// First preset whose days equal the range's days, ignoring time of day.
    pub fn matching(range: &DateRange, today: Date) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.dates(today) == (range.from.date, range.to.date))
    }
}
