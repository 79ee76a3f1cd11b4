use crate::terminal::terminal_event::TerminalEvent;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::SpanLine;
use crate::ui::style::Color;
use crossterm::event::{Event, KeyEventKind, poll, read};
use crossterm::style::{
    Attribute, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, execute, queue, terminal};
use std::io::{self, Stdout, Write};
use std::time::Duration;

/// Raw-mode terminal that redraws a block of lines in place below the
/// prompt rather than switching to the alternate screen.
pub struct Terminal {
    stdout: Stdout,
    drawn_lines: u16,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            stdout: io::stdout(),
            drawn_lines: 0,
        })
    }

    pub fn enter_raw_mode(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    pub fn exit_raw_mode(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()
    }

    pub fn set_line_wrap(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            execute!(self.stdout, terminal::EnableLineWrap)?;
        } else {
            execute!(self.stdout, terminal::DisableLineWrap)?;
        }
        Ok(())
    }

    pub fn poll(&self, timeout: Duration) -> io::Result<bool> {
        poll(timeout)
    }

    pub fn read_event(&mut self) -> io::Result<TerminalEvent> {
        loop {
            let event = read()?;
            match event {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    return Ok(TerminalEvent::Key(map_key_event(key)));
                }
                Event::Resize(width, height) => {
                    return Ok(TerminalEvent::Resize { width, height });
                }
                _ => continue,
            }
        }
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        execute!(self.stdout, cursor::Show)?;
        Ok(())
    }

    /// Replaces the previously drawn block with `lines` and parks the cursor
    /// at `cursor` (column, row) inside the block.
    pub fn draw(&mut self, lines: &[SpanLine], cursor: Option<(u16, u16)>) -> io::Result<()> {
        self.rewind()?;
        queue!(self.stdout, terminal::Clear(terminal::ClearType::FromCursorDown))?;

        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                write!(self.stdout, "\r\n")?;
            }
            self.render_line(line)?;
        }
        let last_row = lines.len().saturating_sub(1) as u16;
        self.drawn_lines = lines.len() as u16;

        match cursor {
            Some((col, row)) => {
                let up = last_row.saturating_sub(row);
                if up > 0 {
                    queue!(self.stdout, cursor::MoveUp(up))?;
                }
                queue!(self.stdout, cursor::MoveToColumn(col), cursor::Show)?;
                self.drawn_lines = row + 1;
            }
            None => queue!(self.stdout, cursor::Hide)?,
        }
        self.stdout.flush()
    }

    /// Clears the drawn block and leaves the cursor where it started.
    pub fn clear(&mut self) -> io::Result<()> {
        self.rewind()?;
        queue!(self.stdout, terminal::Clear(terminal::ClearType::FromCursorDown))?;
        self.drawn_lines = 0;
        self.stdout.flush()
    }

    /// Undoes raw mode and the inline block. Every step runs even when an
    /// earlier one fails; the first failure is returned.
    pub fn restore(&mut self) -> io::Result<()> {
        let raw = self.exit_raw_mode();
        let cleared = self.clear();
        let cursor = self.show_cursor();
        let wrap = self.set_line_wrap(true);
        first_failure([raw, cleared, cursor, wrap])
    }

    fn rewind(&mut self) -> io::Result<()> {
        if self.drawn_lines > 1 {
            queue!(self.stdout, cursor::MoveUp(self.drawn_lines - 1))?;
        }
        queue!(self.stdout, cursor::MoveToColumn(0))?;
        Ok(())
    }

    fn render_line(&mut self, line: &SpanLine) -> io::Result<()> {
        for span in line {
            let style = span.style;
            if let Some(fg) = style.color {
                write!(self.stdout, "{}", SetForegroundColor(map_color(fg)))?;
            }
            if let Some(bg) = style.background {
                write!(self.stdout, "{}", SetBackgroundColor(map_color(bg)))?;
            }
            if style.bold {
                write!(self.stdout, "{}", SetAttribute(Attribute::Bold))?;
            }

            write!(self.stdout, "{}", span.text)?;

            if !style.is_plain() {
                write!(self.stdout, "{}", SetAttribute(Attribute::Reset))?;
                write!(self.stdout, "{}", ResetColor)?;
            }
        }
        Ok(())
    }
}

fn first_failure(results: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    results.into_iter().collect()
}

fn map_color(color: Color) -> crossterm::style::Color {
    match color {
        Color::DarkGrey => crossterm::style::Color::DarkGrey,
        Color::Red => crossterm::style::Color::Red,
        Color::Green => crossterm::style::Color::Green,
        Color::Blue => crossterm::style::Color::Blue,
        Color::Cyan => crossterm::style::Color::Cyan,
        Color::White => crossterm::style::Color::White,
    }
}

fn map_key_event(event: crossterm::event::KeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(event.code),
        modifiers: map_key_modifiers(event.modifiers),
    }
}

fn map_key_code(code: crossterm::event::KeyCode) -> KeyCode {
    match code {
        crossterm::event::KeyCode::Char(ch) => KeyCode::Char(ch),
        crossterm::event::KeyCode::Backspace => KeyCode::Backspace,
        crossterm::event::KeyCode::Enter => KeyCode::Enter,
        crossterm::event::KeyCode::Esc => KeyCode::Esc,
        crossterm::event::KeyCode::Left => KeyCode::Left,
        crossterm::event::KeyCode::Right => KeyCode::Right,
        crossterm::event::KeyCode::Up => KeyCode::Up,
        crossterm::event::KeyCode::Down => KeyCode::Down,
        crossterm::event::KeyCode::Home => KeyCode::Home,
        crossterm::event::KeyCode::End => KeyCode::End,
        crossterm::event::KeyCode::Tab => KeyCode::Tab,
        crossterm::event::KeyCode::BackTab => KeyCode::BackTab,
        crossterm::event::KeyCode::Delete => KeyCode::Delete,
        _ => KeyCode::Other,
    }
}

fn map_key_modifiers(modifiers: crossterm::event::KeyModifiers) -> KeyModifiers {
    let mut mapped = KeyModifiers::NONE;
    if modifiers.contains(crossterm::event::KeyModifiers::SHIFT) {
        mapped |= KeyModifiers::SHIFT;
    }
    if modifiers.contains(crossterm::event::KeyModifiers::CONTROL) {
        mapped |= KeyModifiers::CONTROL;
    }
    if modifiers.contains(crossterm::event::KeyModifiers::ALT) {
        mapped |= KeyModifiers::ALT;
    }
    mapped
}
