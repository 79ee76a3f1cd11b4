use crate::config::PickerConfig;
use crate::core::calendar::{self, Date, DateTime};
use crate::core::compare::{DateRange, RangeComparator, RangeUpdate};
use crate::core::date_parts::DateField;
use crate::core::preset::Preset;
use crate::error;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine, line_width};
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::date_input::DateInput;
use crate::widgets::traits::{
    CursorPos, DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, WidgetAction,
};
use log::{debug, info};

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerSection {
    From,
    To,
    Compare,
    Presets,
    Update,
    Cancel,
}

/// Selection as it stood when the picker was opened; Cancel returns to it and
/// Update only reports a change against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    range: DateRange,
    range_compare: Option<DateRange>,
}

// ── Picker ────────────────────────────────────────────────────────────────────

pub struct DateRangePicker {
    base: WidgetBase,
    from_input: DateInput,
    to_input: DateInput,
    range: DateRange,
    range_compare: Option<DateRange>,
    comparator: RangeComparator,
    show_compare: bool,
    section: PickerSection,
    preset_cursor: usize,
    today: Date,
    opened: Snapshot,
}

impl DateRangePicker {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        config: &PickerConfig,
    ) -> error::Result<Self> {
        let id = id.into();
        let range = config.initial_range()?;
        let range_compare = config.initial_compare()?;

        let mut picker = Self {
            from_input: DateInput::new(format!("{id}_from"), "From", Some(range.from)),
            to_input: DateInput::new(format!("{id}_to"), "To", Some(range.to)),
            base: WidgetBase::new(id, label),
            range,
            range_compare,
            comparator: RangeComparator::new(config.compare_offset_days),
            show_compare: config.show_compare,
            section: PickerSection::From,
            preset_cursor: 0,
            today: calendar::today(),
            opened: Snapshot {
                range,
                range_compare,
            },
        };
        picker.from_input.focus_field(DateField::Month);
        Ok(picker)
    }

    /// Fixes the day presets are computed from.
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = today;
        self
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn range_compare(&self) -> Option<DateRange> {
        self.range_compare
    }

    pub fn compare_enabled(&self) -> bool {
        self.range_compare.is_some()
    }

    pub fn section(&self) -> PickerSection {
        self.section
    }

    pub fn from_input(&self) -> &DateInput {
        &self.from_input
    }

    pub fn to_input(&self) -> &DateInput {
        &self.to_input
    }

    pub fn matching_preset(&self) -> Option<Preset> {
        Preset::matching(&self.range, self.today)
    }

    pub fn selected_preset(&self) -> Preset {
        Preset::ALL[self.preset_cursor]
    }

    /// Label of the trigger: `Jan 1, 2023 - Dec 31, 2023`.
    pub fn trigger_label(&self) -> String {
        self.range.label()
    }

    /// Remembers the current selection as the one to compare against and to
    /// restore on cancel.
    pub fn open(&mut self) {
        self.opened = Snapshot {
            range: self.range,
            range_compare: self.range_compare,
        };
        self.focus(PickerSection::From);
        debug!("{}: opened at {}", self.base.id(), self.range.label());
    }

    pub fn focus(&mut self, section: PickerSection) {
        self.section = section;
        match section {
            PickerSection::From => self.from_input.focus_field(DateField::Month),
            PickerSection::To => self.to_input.focus_field(DateField::Month),
            _ => {}
        }
    }

    fn sections(&self) -> Vec<PickerSection> {
        let mut sections = vec![PickerSection::From, PickerSection::To];
        if self.show_compare {
            sections.push(PickerSection::Compare);
        }
        sections.extend([
            PickerSection::Presets,
            PickerSection::Update,
            PickerSection::Cancel,
        ]);
        sections
    }

    fn cycle_section(&mut self, forward: bool) {
        let sections = self.sections();
        let len = sections.len();
        let current = sections
            .iter()
            .position(|section| *section == self.section)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.focus(sections[next]);
    }

    // ── Range edits ──────────────────────────────────────────────────────────

    pub fn set_from(&mut self, date: DateTime) {
        self.range.from = date;
        if date > self.range.to {
            self.range.to = date;
            self.to_input.set_value(Some(date));
        }
        self.refresh_compare();
    }

    pub fn set_to(&mut self, date: DateTime) {
        self.range.to = date;
        if date < self.range.from {
            self.range.from = date;
            self.from_input.set_value(Some(date));
        }
        self.refresh_compare();
    }

    pub fn set_compare(&mut self, enabled: bool) {
        self.range_compare = enabled.then(|| self.comparator.default_compare(&self.range));
        debug!(
            "{}: compare {}",
            self.base.id(),
            if enabled { "on" } else { "off" }
        );
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        self.range = preset.range(self.today);
        self.from_input.set_value(Some(self.range.from));
        self.to_input.set_value(Some(self.range.to));
        self.refresh_compare();
        debug!("{}: preset {}", self.base.id(), preset.name());
    }

    fn refresh_compare(&mut self) {
        if self.range_compare.is_some() {
            self.range_compare = Some(self.comparator.default_compare(&self.range));
        }
    }

    // ── Confirm / cancel ─────────────────────────────────────────────────────

    pub fn confirm(&mut self) -> InteractionResult {
        let current = Snapshot {
            range: self.range,
            range_compare: self.range_compare,
        };
        let mut result = InteractionResult::handled();
        if current != self.opened {
            let update = RangeUpdate {
                range: self.range,
                range_compare: self.range_compare,
            };
            info!("{}: range updated to {}", self.base.id(), self.range.label());
            result.push(WidgetAction::RangeUpdated(update));
        }
        self.opened = current;
        result.push(WidgetAction::Closed);
        result
    }

    pub fn cancel(&mut self) -> InteractionResult {
        self.range = self.opened.range;
        self.range_compare = self.opened.range_compare;
        self.from_input.set_value(Some(self.range.from));
        self.to_input.set_value(Some(self.range.to));
        debug!("{}: cancelled", self.base.id());
        InteractionResult::with_action(WidgetAction::Cancelled)
    }

    // ── Keys ─────────────────────────────────────────────────────────────────

    fn on_input_key(&mut self, key: KeyEvent) -> InteractionResult {
        let is_from = self.section == PickerSection::From;
        let input = if is_from {
            &mut self.from_input
        } else {
            &mut self.to_input
        };
        let result = input.on_key(key);

        if !result.handled {
            return match (key.code, is_from) {
                (KeyCode::Right, true) => {
                    self.focus(PickerSection::To);
                    InteractionResult::handled()
                }
                (KeyCode::Left, false) => {
                    self.section = PickerSection::From;
                    self.from_input.focus_field(DateField::Year);
                    InteractionResult::handled()
                }
                _ => result,
            };
        }

        // Dates are taken here; the owner only sees the picker's own actions.
        let mut forwarded = InteractionResult::handled();
        for action in result.actions {
            match action {
                WidgetAction::DateChanged { date, .. } if is_from => self.set_from(date),
                WidgetAction::DateChanged { date, .. } => self.set_to(date),
                other => forwarded.push(other),
            }
        }
        forwarded
    }

    fn on_preset_key(&mut self, code: KeyCode) -> InteractionResult {
        let len = Preset::ALL.len();
        match code {
            KeyCode::Left | KeyCode::Up => {
                self.preset_cursor = (self.preset_cursor + len - 1) % len;
                InteractionResult::handled()
            }
            KeyCode::Right | KeyCode::Down => {
                self.preset_cursor = (self.preset_cursor + 1) % len;
                InteractionResult::handled()
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.apply_preset(self.selected_preset());
                InteractionResult::handled()
            }
            _ => InteractionResult::ignored(),
        }
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    fn section_marker(&self, section: PickerSection) -> Span {
        let marker = self.base.focus_marker(self.section == section);
        Span::styled(format!("{marker} "), Style::new().color(Color::Cyan))
    }

    fn button(&self, section: PickerSection, text: &str) -> Span {
        let style = if self.section == section {
            Style::new().background(Color::Blue).color(Color::White).bold()
        } else {
            Style::new()
        };
        Span::styled(format!("[ {text} ]"), style)
    }
}

impl Drawable for DateRangePicker {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, _ctx: &RenderContext) -> DrawOutput {
        let mut lines: Vec<SpanLine> = Vec::new();
        let mut cursor = None;

        let mut title = vec![
            Span::styled(format!("{} ", self.base.label()), Style::new().bold()),
            Span::new(self.trigger_label()),
        ];
        if let Some(compare) = self.range_compare {
            title.push(Span::styled(
                format!("  vs. {}", compare.label()),
                Style::new().color(Color::DarkGrey),
            ));
        }
        lines.push(title);

        for (section, input) in [
            (PickerSection::From, &self.from_input),
            (PickerSection::To, &self.to_input),
        ] {
            let focused = self.section == section;
            let mut line = vec![
                self.section_marker(section),
                Span::new(format!("{:<5}", input.label())),
            ];
            if focused {
                cursor = Some(CursorPos {
                    col: (line_width(&line) + input.cursor_col()) as u16,
                    row: lines.len() as u16,
                });
            }
            line.extend(input.render_spans(focused));
            if let Err(message) = input.validate() {
                line.push(Span::styled(
                    format!("  {message}"),
                    Style::new().color(Color::Red),
                ));
            }
            lines.push(line);
        }

        if self.show_compare {
            let toggle = if self.compare_enabled() { "[x]" } else { "[ ]" };
            lines.push(vec![
                self.section_marker(PickerSection::Compare),
                Span::new(format!("{toggle} Compare")),
            ]);
        }

        let matching = self.matching_preset();
        let mut presets = vec![self.section_marker(PickerSection::Presets)];
        for (i, preset) in Preset::ALL.into_iter().enumerate() {
            if i > 0 {
                presets.push(Span::new(" "));
            }
            let mut style = Style::new();
            if Some(preset) == matching {
                style = style.color(Color::Green);
            }
            if self.section == PickerSection::Presets && i == self.preset_cursor {
                style = style.background(Color::Blue).bold();
            }
            presets.push(Span::styled(preset.label(), style));
        }
        lines.push(presets);

        lines.push(vec![
            Span::new("  "),
            self.button(PickerSection::Update, "Update"),
            Span::new(" "),
            self.button(PickerSection::Cancel, "Cancel"),
        ]);

        DrawOutput { lines, cursor }
    }
}

impl Interactive for DateRangePicker {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Esc => return self.cancel(),
            KeyCode::Tab => {
                self.cycle_section(true);
                return InteractionResult::handled();
            }
            KeyCode::BackTab => {
                self.cycle_section(false);
                return InteractionResult::handled();
            }
            _ => {}
        }

        match self.section {
            PickerSection::From | PickerSection::To => {
                if key.code == KeyCode::Enter {
                    return self.confirm();
                }
                self.on_input_key(key)
            }
            PickerSection::Compare => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.set_compare(!self.compare_enabled());
                    InteractionResult::handled()
                }
                _ => InteractionResult::ignored(),
            },
            PickerSection::Presets => self.on_preset_key(key.code),
            PickerSection::Update => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.confirm(),
                _ => InteractionResult::ignored(),
            },
            PickerSection::Cancel => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.cancel(),
                _ => InteractionResult::ignored(),
            },
        }
    }

    fn validate(&self) -> Result<(), String> {
        self.from_input.validate()?;
        self.to_input.validate()
    }
}
