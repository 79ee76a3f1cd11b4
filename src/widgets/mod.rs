pub mod base;
pub mod date_input;
pub mod range_picker;
pub mod text_edit;
pub mod traits;

pub use date_input::DateInput;
pub use range_picker::{DateRangePicker, PickerSection};
pub use traits::{InteractionResult, WidgetAction};
