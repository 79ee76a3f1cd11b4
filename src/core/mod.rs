pub mod calendar;
pub mod clock;
pub mod compare;
pub mod date_parts;
pub mod preset;

pub use calendar::{Date, DateTime, Time};
pub use clock::EditOutcome;
pub use compare::{DateRange, RangeComparator, RangeUpdate};
pub use date_parts::{DateField, DateParts};
pub use preset::Preset;
