//! # EditorPanel Component
//!
//! Header line, bordered text box with the terminal cursor placed at the
//! buffer's cursor, and the Save/Cancel button row.
//!
//! ```text
//! 📄 Editing: 2025-03-07-090500
//!
//! ╭──────────────────────────────╮
//! │ # Meeting Notes              │
//! │ Some text|                   ▐
//! ╰──────────────────────────────╯
//!
//!    💾 Save (Ctrl+S)      ❌ Cancel (Esc)
//! ```
//!
//! The buffer and cursor belong to `core::editor::EditorBuffer`. The only
//! state kept here is the vertical scroll offset, which is presentation and
//! survives between frames in `EditorScroll`.

mod layout;

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, BorderType, Borders, Padding, Paragraph, Scrollbar, ScrollbarOrientation,
    ScrollbarState,
};

use crate::core::editor::EditorBuffer;
use crate::core::store::journal_id;
use crate::tui::component::Component;
use crate::tui::palette::Palette;
use layout::{
    CONTENT_X_OFFSET, CONTENT_Y_OFFSET, HORIZONTAL_OVERHEAD, VERTICAL_OVERHEAD, cursor_cell,
    scroll_to_cursor, visual_rows,
};

pub const SAVE_BUTTON: &str = "💾 Save (Ctrl+S)";
pub const CANCEL_BUTTON: &str = "❌ Cancel (Esc)";

/// Heading shown above the editor box. An unsaved journal buffer becomes
/// today's entry, so it gets today's heading too.
pub fn header_text(journal: bool, item_id: Option<&str>, now: DateTime<Local>) -> String {
    let today = journal_id(now.date_naive());
    match (journal, item_id) {
        (true, Some(id)) if id != today => format!("📔 Journal Entry - {}", id),
        (true, _) => format!("📔 Today's Journal - {}", now.format("%A, %B %-d, %Y")),
        (false, Some(id)) => format!("📄 Editing: {}", id),
        (false, None) => "📝 Writing".to_string(),
    }
}

/// First visible wrapped row of the editor box.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EditorScroll(pub u16);

pub struct EditorPanel<'a> {
    pub header: String,
    pub buffer: &'a EditorBuffer,
    pub scroll: &'a mut EditorScroll,
    pub palette: &'a Palette,
}

impl EditorPanel<'_> {
    fn render_box(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let visible = area.height.saturating_sub(VERTICAL_OVERHEAD).max(1);

        let rows = visual_rows(self.buffer.text(), width);
        let total_rows = rows.len();
        let (col, row) = cursor_cell(self.buffer.text(), self.buffer.cursor(), width);
        self.scroll.0 = scroll_to_cursor(self.scroll.0, row, visible);

        let shown: Vec<Line> = rows
            .into_iter()
            .skip(self.scroll.0 as usize)
            .take(visible as usize)
            .map(Line::from)
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.palette.editor_border())
            .padding(Padding::horizontal(1));
        let paragraph = Paragraph::new(Text::from(shown))
            .style(self.palette.normal_item())
            .block(block);
        frame.render_widget(paragraph, area);

        if total_rows > visible as usize {
            let mut state = ScrollbarState::default()
                .content_length(total_rows - visible as usize)
                .position(self.scroll.0 as usize);
            let track = Rect {
                x: area.x + area.width.saturating_sub(1),
                y: area.y + 1,
                width: 1,
                height: area.height.saturating_sub(2),
            };
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                track,
                &mut state,
            );
        }

        frame.set_cursor_position((
            area.x + CONTENT_X_OFFSET + col,
            area.y + CONTENT_Y_OFFSET + row.saturating_sub(self.scroll.0),
        ));
    }

    fn buttons(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("   {}   ", SAVE_BUTTON), self.palette.active_button()),
            Span::raw("  "),
            Span::styled(
                format!("   {}   ", CANCEL_BUTTON),
                self.palette.inactive_button(),
            ),
        ])
    }
}

impl Component for EditorPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header, _, editor, _, buttons] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let heading = Span::styled(self.header.clone(), self.palette.tag());
        frame.render_widget(Paragraph::new(Line::from(heading)), header);
        self.render_box(frame, editor);
        frame.render_widget(Paragraph::new(self.buttons()), buttons);
    }
}
