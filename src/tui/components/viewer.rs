//! # Viewer Component
//!
//! Read-only view of a note or journal entry: a header naming the item and
//! the markdown body in a bordered, scrollable panel.
//!
//! Wrapped markdown can take many more rows than the source has lines, so
//! the scroll limit is measured here with `Paragraph::line_count` and
//! handed back to the event loop through `measured`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::markdown;
use crate::tui::palette::Palette;

pub fn header_text(item_id: Option<&str>) -> String {
    format!(
        "👁️  Viewing: {} (Press 'e' to edit)",
        item_id.unwrap_or_default()
    )
}

pub struct Viewer<'a> {
    pub item_id: Option<&'a str>,
    pub content: &'a str,
    /// First visible row requested by the session
    pub scroll: u16,
    /// Receives the largest scroll offset that still fills the panel
    pub measured: &'a mut Option<u16>,
    pub palette: &'a Palette,
}

/// Largest scroll offset for `paragraph` drawn in `area` (block included).
fn max_scroll(paragraph: &Paragraph, block: &Block, area: Rect) -> u16 {
    let inner = block.inner(area);
    // line_count adds the block's borders back on top of the wrapped rows
    let rows = paragraph.line_count(inner.width);
    let hidden = rows.saturating_sub(usize::from(area.height));
    u16::try_from(hidden).unwrap_or(u16::MAX)
}

impl Component for Viewer<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header, _, body] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .areas(area);

        let heading = Span::styled(header_text(self.item_id), self.palette.tag());
        frame.render_widget(Paragraph::new(Line::from(heading)), header);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.palette.panel_border())
            .padding(Padding::horizontal(1));
        let text = markdown::render(self.content, self.palette);
        let paragraph = Paragraph::new(text)
            .block(block.clone())
            .wrap(Wrap { trim: false });
        let limit = max_scroll(&paragraph, &block, body);
        *self.measured = Some(limit);
        frame.render_widget(paragraph.scroll((self.scroll.min(limit), 0)), body);
    }
}
