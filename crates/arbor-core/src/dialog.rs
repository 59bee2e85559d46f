use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Helper to create a centered rect within a given area.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

// ── InputDialog ──────────────────────────────────────────────────────

/// A modal single-line text input, used for node names.
#[derive(Debug, Default)]
pub struct InputDialog {
    pub visible: bool,
    title: String,
    /// The edited text.
    pub buffer: String,
    /// Byte offset of the cursor within `buffer`.
    cursor: usize,
}

impl InputDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog with a title and an initial value. The cursor
    /// starts at the end so renames can append immediately.
    pub fn open(&mut self, title: impl Into<String>, initial: &str) {
        self.visible = true;
        self.title = title.into();
        self.cursor = initial.len();
        self.buffer = initial.to_string();
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.title.clear();
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.buffer[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.buffer.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.buffer[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.buffer.len() {
            self.cursor = self.buffer[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.buffer.len());
        }
    }

    /// Render the dialog centered on screen.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let popup_width = (area.width.saturating_sub(8)).min(50).max(20);
        let popup_area = centered_rect(popup_width, 3, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(popup_area);

        let line = Line::from(Span::raw(self.buffer.clone()));
        frame.render_widget(Paragraph::new(line).block(block), popup_area);

        let cursor_col = self.buffer[..self.cursor].width() as u16;
        let cursor_x = inner.x + cursor_col;
        if cursor_x < inner.x + inner.width {
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }
}

// ── ConfirmDialog ────────────────────────────────────────────────────

/// A modal yes/no confirmation for destructive or staged actions.
#[derive(Debug, Default)]
pub struct ConfirmDialog {
    pub visible: bool,
    message: String,
}

impl ConfirmDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, message: impl Into<String>) {
        self.visible = true;
        self.message = message.into();
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.message.clear();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let msg_width = self.message.width() as u16;
        let popup_width = (msg_width + 6).min(area.width.saturating_sub(4)).max(24);
        let popup_area = centered_rect(popup_width, 4, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Confirm ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));

        let lines = vec![
            Line::from(Span::styled(
                self.message.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "y: confirm   n/Esc: cancel",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, popup_area);
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_editing() {
        let mut dialog = InputDialog::new();
        dialog.open("New node", "");
        assert!(dialog.visible);

        for c in "hello".chars() {
            dialog.insert_char(c);
        }
        assert_eq!(dialog.buffer, "hello");

        dialog.backspace();
        assert_eq!(dialog.buffer, "hell");

        dialog.cursor_left();
        dialog.insert_char('X');
        assert_eq!(dialog.buffer, "helXl");

        dialog.cursor_right();
        dialog.insert_char('!');
        assert_eq!(dialog.buffer, "helXl!");
    }

    #[test]
    fn open_prefills_and_places_cursor_at_end() {
        let mut dialog = InputDialog::new();
        dialog.open("Rename node", "branch");
        assert_eq!(dialog.buffer, "branch");
        dialog.insert_char('!');
        assert_eq!(dialog.buffer, "branch!");
    }

    #[test]
    fn close_clears_state() {
        let mut dialog = InputDialog::new();
        dialog.open("New node", "abc");
        dialog.close();
        assert!(!dialog.visible);
        assert!(dialog.buffer.is_empty());
    }

    #[test]
    fn multibyte_cursor_movement() {
        let mut dialog = InputDialog::new();
        dialog.open("New node", "");
        dialog.insert_char('é');
        dialog.insert_char('ß');
        assert_eq!(dialog.buffer, "éß");
        dialog.backspace();
        assert_eq!(dialog.buffer, "é");
        dialog.cursor_left();
        dialog.cursor_right();
        dialog.insert_char('x');
        assert_eq!(dialog.buffer, "éx");
    }

    #[test]
    fn confirm_dialog_toggles() {
        let mut dialog = ConfirmDialog::new();
        assert!(!dialog.visible);
        dialog.open("Delete this node?");
        assert!(dialog.visible);
        dialog.close();
        assert!(!dialog.visible);
        assert!(dialog.message.is_empty());
    }
}
