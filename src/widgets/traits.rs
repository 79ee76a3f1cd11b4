use crate::core::calendar::DateTime;
use crate::core::compare::RangeUpdate;
use crate::terminal::KeyEvent;
use crate::ui::span::SpanLine;

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// What a widget hands back to its owner after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetAction {
    /// A date input produced a date its owner should take.
    DateChanged { id: String, date: DateTime },
    /// The picker confirmed a selection that differs from the one it opened with.
    RangeUpdated(RangeUpdate),
    /// The picker was confirmed and should be dismissed.
    Closed,
    /// The picker was dismissed and rolled back.
    Cancelled,
}

// ---------------------------------------------------------------------------
// Render context & output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub focused_id: Option<String>,
}

impl RenderContext {
    pub fn focused(id: impl Into<String>) -> Self {
        Self {
            focused_id: Some(id.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPos {
    pub col: u16,
    pub row: u16,
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

// ---------------------------------------------------------------------------
// Drawable
// ---------------------------------------------------------------------------

pub trait Drawable: Send {
    fn id(&self) -> &str;
    fn label(&self) -> &str {
        ""
    }
    fn draw(&self, ctx: &RenderContext) -> DrawOutput;
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }

    pub fn push(&mut self, action: WidgetAction) {
        self.handled = true;
        self.request_render = true;
        self.actions.push(action);
    }
}

// ---------------------------------------------------------------------------
// Interactive
// ---------------------------------------------------------------------------

pub trait Interactive: Send {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult;

    /// Validate the current value. Partial input shows up here as an error
    /// while the widget keeps displaying it.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}
