use crate::core::calendar::{self, DateTime};
use crate::core::clock;
use crate::core::date_parts::{DateField, DateParts};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine, line_width};
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::text_edit;
use crate::widgets::traits::{
    CursorPos, DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, WidgetAction,
};
use log::debug;
use unicode_width::UnicodeWidthStr;

const INVALID_DATE_MESSAGE: &str = "Invalid date";

/// Text of one field as the user sees it, which may lag behind or disagree
/// with the parsed parts while they type.
#[derive(Debug, Clone, Default)]
struct FieldText {
    value: String,
    cursor: usize,
    /// Whole content selected; the next digit replaces it.
    selected: bool,
}

impl FieldText {
    fn reset(&mut self, value: String) {
        self.cursor = text_edit::char_count(&value);
        self.value = value;
        self.selected = false;
    }

    fn select_all(&mut self) {
        self.cursor = text_edit::char_count(&self.value);
        self.selected = true;
    }

    fn take_selection(&mut self) -> bool {
        if !self.selected {
            return false;
        }
        self.value.clear();
        self.cursor = 0;
        self.selected = false;
        true
    }

    fn at_start(&self) -> bool {
        self.selected || self.cursor == 0
    }

    fn at_end(&self) -> bool {
        self.selected || self.cursor >= text_edit::char_count(&self.value)
    }
}

/// Month / day / year fields editing one date.
///
/// Typed edits produce [`WidgetAction::DateChanged`] only when the fields form
/// a real date; Up/Down always produce one.
pub struct DateInput {
    base: WidgetBase,
    parts: DateParts,
    fields: [FieldText; 3],
    focused: DateField,
}

impl DateInput {
    /// Starts from `value`, or from the current date when absent.
    pub fn new(id: impl Into<String>, label: impl Into<String>, value: Option<DateTime>) -> Self {
        let mut input = Self {
            base: WidgetBase::new(id, label),
            parts: DateParts::from_datetime(value.unwrap_or_else(calendar::now)),
            fields: Default::default(),
            focused: DateField::Month,
        };
        input.reset_fields();
        input
    }

    /// Replaces the edited date from outside, discarding any partial input.
    pub fn set_value(&mut self, value: Option<DateTime>) {
        self.parts = DateParts::from_datetime(value.unwrap_or_else(calendar::now));
        self.reset_fields();
    }

    pub fn parts(&self) -> DateParts {
        self.parts
    }

    /// The date the fields build, overflow included.
    pub fn date(&self) -> DateTime {
        self.parts.to_datetime()
    }

    pub fn is_valid(&self) -> bool {
        clock::is_acceptable(self.parts)
    }

    pub fn focused_field(&self) -> DateField {
        self.focused
    }

    pub fn field_text(&self, field: DateField) -> &str {
        &self.fields[field.index()].value
    }

    pub fn focus_field(&mut self, field: DateField) {
        self.focused = field;
        self.fields[field.index()].select_all();
    }

    fn reset_fields(&mut self) {
        for field in DateField::ORDER {
            self.fields[field.index()].reset(self.parts.field_text(field));
        }
    }

    fn focused_text(&mut self) -> &mut FieldText {
        &mut self.fields[self.focused.index()]
    }

    fn changed(&self) -> InteractionResult {
        InteractionResult::with_action(WidgetAction::DateChanged {
            id: self.base.id().to_string(),
            date: self.date(),
        })
    }

    /// Runs the focused field's text through the edit path.
    fn commit_text(&mut self) -> InteractionResult {
        let field = self.focused;
        let raw = clock::parse_field(self.field_text(field));
        let outcome = clock::apply_edit(self.parts, field, raw);
        self.parts = outcome.parts;

        if outcome.valid {
            debug!("{}: {:?} set to {}", self.base.id(), field, raw);
            self.changed()
        } else {
            debug!("{}: {:?} = {} held back", self.base.id(), field, raw);
            InteractionResult::handled()
        }
    }

    fn insert_digit(&mut self, ch: char) -> InteractionResult {
        let max_len = self.focused.max_len();
        let text = self.focused_text();
        if !text.take_selection() && text_edit::char_count(&text.value) >= max_len {
            text.value.clear();
            text.cursor = 0;
        }
        text_edit::insert_char(&mut text.value, &mut text.cursor, ch);
        self.commit_text()
    }

    fn delete_prev(&mut self) -> InteractionResult {
        let text = self.focused_text();
        let changed =
            text.take_selection() || text_edit::backspace_char(&mut text.value, &mut text.cursor);
        if changed {
            self.commit_text()
        } else {
            InteractionResult::ignored()
        }
    }

    fn delete_current(&mut self) -> InteractionResult {
        let text = self.focused_text();
        let changed =
            text.take_selection() || text_edit::delete_char(&mut text.value, &mut text.cursor);
        if changed {
            self.commit_text()
        } else {
            InteractionResult::ignored()
        }
    }

    fn move_left(&mut self) -> InteractionResult {
        let text = self.focused_text();
        if !text.at_start() {
            text.cursor -= 1;
            return InteractionResult::handled();
        }
        match self.focused.prev() {
            Some(prev) => {
                self.focus_field(prev);
                InteractionResult::handled()
            }
            None => InteractionResult::ignored(),
        }
    }

    fn move_right(&mut self) -> InteractionResult {
        let text = self.focused_text();
        if !text.at_end() {
            text.cursor += 1;
            return InteractionResult::handled();
        }
        self.move_next()
    }

    fn move_next(&mut self) -> InteractionResult {
        match self.focused.next() {
            Some(next) => {
                self.focus_field(next);
                InteractionResult::handled()
            }
            None => InteractionResult::ignored(),
        }
    }

    fn spin(&mut self, up: bool) -> InteractionResult {
        let field = self.focused;
        self.parts = if up {
            clock::increment(self.parts, field)
        } else {
            clock::decrement(self.parts, field)
        };
        self.reset_fields();
        debug!("{}: {:?} stepped to {:?}", self.base.id(), field, self.parts);
        self.changed()
    }

    /// Field spans without the label, used by composite widgets.
    pub fn render_spans(&self, focused: bool) -> SpanLine {
        let placeholder = Style::new().color(Color::DarkGrey);
        let separator = Span::styled("/", placeholder);
        let mut spans = Vec::new();

        for (i, field) in DateField::ORDER.into_iter().enumerate() {
            if i > 0 {
                spans.push(separator.clone());
            }
            let text = &self.fields[field.index()];
            let mut span = if text.value.is_empty() {
                Span::styled(field.placeholder(), placeholder)
            } else {
                Span::new(text.value.clone())
            };
            if focused && field == self.focused {
                let highlight = if text.selected {
                    Style::new().background(Color::Blue).color(Color::White)
                } else {
                    Style::new().bold()
                };
                span.style = span.style.merge(highlight);
            }
            spans.push(span);
        }
        spans
    }

    /// Column of the text cursor within [`Self::render_spans`].
    pub fn cursor_col(&self) -> usize {
        let spans = self.render_spans(false);
        // Each field is followed by one separator span.
        let before = self.focused.index() * 2;
        line_width(&spans[..before]) + self.fields[self.focused.index()].cursor
    }
}

impl Drawable for DateInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let prefix = format!("{} {} ", self.base.focus_marker(focused), self.base.label());
        let prefix_width = prefix.width();

        let mut line = vec![Span::new(prefix)];
        line.extend(self.render_spans(focused));
        if let Err(message) = self.validate() {
            line.push(Span::styled(
                format!("  {message}"),
                Style::new().color(Color::Red),
            ));
        }

        DrawOutput {
            lines: vec![line],
            cursor: focused.then(|| CursorPos {
                col: (prefix_width + self.cursor_col()) as u16,
                row: 0,
            }),
        }
    }
}

impl Interactive for DateInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Char(ch) if ch.is_ascii_digit() => self.insert_digit(ch),
            KeyCode::Char('/') => self.move_next(),
            KeyCode::Backspace => self.delete_prev(),
            KeyCode::Delete => self.delete_current(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => {
                let text = self.focused_text();
                text.cursor = 0;
                text.selected = false;
                InteractionResult::handled()
            }
            KeyCode::End => {
                let text = self.focused_text();
                text.cursor = text_edit::char_count(&text.value);
                text.selected = false;
                InteractionResult::handled()
            }
            KeyCode::Up => self.spin(true),
            KeyCode::Down => self.spin(false),
            _ => InteractionResult::ignored(),
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(INVALID_DATE_MESSAGE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DateInput;
    use crate::core::calendar::{Date, DateTime};
    use crate::core::date_parts::{DateField, DateParts};
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::{
        Drawable, InteractionResult, Interactive, RenderContext, WidgetAction,
    };

    fn at(year: i32, month: u8, day: u8) -> DateTime {
        Date { year, month, day }.at_midnight()
    }

    fn press(input: &mut DateInput, code: KeyCode) -> InteractionResult {
        input.on_key(KeyEvent::plain(code))
    }

    fn type_text(input: &mut DateInput, text: &str) -> Vec<DateTime> {
        text.chars()
            .flat_map(|ch| press(input, KeyCode::Char(ch)).actions)
            .filter_map(|action| match action {
                WidgetAction::DateChanged { date, .. } => Some(date),
                _ => None,
            })
            .collect()
    }

    fn changed_dates(result: InteractionResult) -> Vec<DateTime> {
        result
            .actions
            .into_iter()
            .filter_map(|action| match action {
                WidgetAction::DateChanged { date, .. } => Some(date),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn starts_from_given_value() {
        let input = DateInput::new("from", "From", Some(at(2023, 1, 1)));
        assert_eq!(input.parts(), DateParts::new(2023, 1, 1));
        assert_eq!(input.field_text(DateField::Month), "1");
        assert_eq!(input.field_text(DateField::Year), "2023");
    }

    #[test]
    fn typing_each_field_emits_once_per_valid_edit() {
        let mut input = DateInput::new("from", "From", Some(at(2023, 1, 1)));
        input.focus_field(DateField::Month);

        let month = type_text(&mut input, "02");
        assert_eq!(month, vec![at(2023, 2, 1)]);

        assert!(press(&mut input, KeyCode::Right).handled);
        assert_eq!(input.focused_field(), DateField::Day);
        let day = type_text(&mut input, "01");
        assert_eq!(day, vec![at(2023, 2, 1)]);

        assert!(press(&mut input, KeyCode::Right).handled);
        assert_eq!(input.focused_field(), DateField::Year);
        let year = type_text(&mut input, "2023");
        assert_eq!(year, vec![at(2023, 2, 1)]);

        assert_eq!(input.date(), at(2023, 2, 1));
        assert!(input.is_valid());
    }

    #[test]
    fn invalid_edit_is_shown_but_not_emitted() {
        let mut input = DateInput::new("from", "From", Some(at(2023, 4, 15)));
        input.focus_field(DateField::Day);

        let emitted = type_text(&mut input, "31");
        // "3" is a real day, "31" is not in April.
        assert_eq!(emitted, vec![at(2023, 4, 3)]);
        assert_eq!(input.field_text(DateField::Day), "31");
        assert_eq!(input.parts(), DateParts::new(2023, 4, 31));
        assert!(input.validate().is_err());
    }

    #[test]
    fn out_of_range_month_is_held_back() {
        let mut input = DateInput::new("from", "From", Some(at(2023, 4, 15)));
        input.focus_field(DateField::Month);
        let emitted = type_text(&mut input, "13");
        assert_eq!(emitted, vec![at(2023, 1, 15)]);
        assert_eq!(input.parts().month, 13);
    }

    #[test]
    fn clearing_a_field_reads_as_zero() {
        let mut input = DateInput::new("from", "From", Some(at(2023, 4, 15)));
        input.focus_field(DateField::Day);
        let result = press(&mut input, KeyCode::Backspace);
        assert!(result.handled);
        assert!(result.actions.is_empty());
        assert_eq!(input.field_text(DateField::Day), "");
        assert_eq!(input.parts().day, 0);
    }

    #[test]
    fn spinner_always_emits_and_rolls_over() {
        let mut input = DateInput::new("from", "From", Some(at(2023, 1, 31)));
        input.focus_field(DateField::Day);
        let up = changed_dates(press(&mut input, KeyCode::Up));
        assert_eq!(up, vec![at(2023, 2, 1)]);
        assert_eq!(input.field_text(DateField::Month), "2");

        let down = changed_dates(press(&mut input, KeyCode::Down));
        assert_eq!(down, vec![at(2023, 1, 31)]);
    }

    #[test]
    fn month_spinner_emits_normalized_date_for_retained_day() {
        let mut input = DateInput::new("from", "From", Some(at(2023, 1, 31)));
        input.focus_field(DateField::Month);
        let up = changed_dates(press(&mut input, KeyCode::Up));

        assert_eq!(input.parts(), DateParts::new(2023, 2, 31));
        assert_eq!(up, vec![at(2023, 3, 3)]);
        assert!(!input.is_valid());
    }

    #[test]
    fn arrows_cross_fields_only_at_text_boundaries() {
        let mut input = DateInput::new("from", "From", Some(at(2023, 11, 15)));
        input.focus_field(DateField::Day);

        // Whole field selected: both directions leave the field.
        assert!(press(&mut input, KeyCode::Left).handled);
        assert_eq!(input.focused_field(), DateField::Month);

        // End drops the selection, so Left first walks the text.
        press(&mut input, KeyCode::End);
        assert!(press(&mut input, KeyCode::Left).handled);
        assert_eq!(input.focused_field(), DateField::Month);
        assert!(press(&mut input, KeyCode::Right).handled);
        assert_eq!(input.focused_field(), DateField::Month);
        assert!(press(&mut input, KeyCode::Right).handled);
        assert_eq!(input.focused_field(), DateField::Day);

        press(&mut input, KeyCode::Home);
        assert!(press(&mut input, KeyCode::Left).handled);
        assert_eq!(input.focused_field(), DateField::Month);

        // Outer edges are left to the owner.
        press(&mut input, KeyCode::Home);
        assert!(!press(&mut input, KeyCode::Left).handled);
        input.focus_field(DateField::Year);
        assert!(!press(&mut input, KeyCode::Right).handled);
    }

    #[test]
    fn set_value_discards_partial_input() {
        let mut input = DateInput::new("to", "To", Some(at(2023, 4, 15)));
        input.focus_field(DateField::Day);
        type_text(&mut input, "31");
        input.set_value(Some(at(2024, 2, 29)));
        assert_eq!(input.parts(), DateParts::new(2024, 2, 29));
        assert_eq!(input.field_text(DateField::Day), "29");
        assert!(input.is_valid());
    }

    #[test]
    fn draw_places_cursor_in_focused_field() {
        let mut input = DateInput::new("from", "From", Some(at(2023, 12, 5)));
        input.focus_field(DateField::Day);
        let output = input.draw(&RenderContext::focused("from"));
        let text: String = output.lines[0].iter().map(|span| span.text.as_str()).collect();
        assert_eq!(text, "> From 12/5/2023");
        // "> From " is 7 columns, "12/" is 3, cursor sits after "5".
        assert_eq!(output.cursor.map(|pos| pos.col), Some(11));

        let unfocused = input.draw(&RenderContext::default());
        assert!(unfocused.cursor.is_none());
    }
}
