pub mod config;
pub mod core;
pub mod error;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use crate::core::calendar;
pub use crate::core::clock;
pub use crate::core::compare;
pub use crate::core::date_parts;
pub use crate::core::preset;

pub use widgets::date_input;
pub use widgets::range_picker;

pub use config::PickerConfig;
pub use error::{Error, Result};
