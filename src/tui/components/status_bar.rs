//! # StatusBar Component
//!
//! Bottom row: `<mode label> • <status message>` on the left and the wall
//! clock (`HH:MM`) on the right. When the row is too narrow the status text
//! is cut with an ellipsis so the clock always stays visible.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;
use crate::tui::components::truncate_to_width;
use crate::tui::palette::Palette;

pub struct StatusBar<'a> {
    pub mode_label: &'a str,
    pub status: &'a str,
    /// Already formatted, e.g. "09:05"
    pub clock: &'a str,
    pub palette: &'a Palette,
}

impl StatusBar<'_> {
    fn line(&self, width: usize) -> Line<'static> {
        let bar = self.palette.status_bar();
        let left = format!(" {} • ", self.mode_label);
        let right = format!(" {} ", self.clock);

        let room = width.saturating_sub(left.width() + right.width());
        let status = truncate_to_width(self.status, room);
        let filler = room.saturating_sub(status.width());

        Line::from(vec![
            Span::styled(left, bar),
            Span::styled(status, self.palette.status_message()),
            Span::styled(" ".repeat(filler), bar),
            Span::styled(right, bar),
        ])
    }
}

impl Component for StatusBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = self.line(area.width as usize);
        frame.render_widget(Paragraph::new(line), area);
    }
}
