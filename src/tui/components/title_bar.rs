//! # TitleBar Component
//!
//! One row across the top of the screen carrying the application banner in
//! the theme's primary colour. Stateless: the palette is its only prop.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::palette::Palette;

pub const APP_TITLE: &str = "✨ NoteType - Your Personal Journal & Notes";

pub struct TitleBar<'a> {
    pub palette: &'a Palette,
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Two columns of padding each side, like a pill label
        let banner = Span::styled(format!("  {}  ", APP_TITLE), self.palette.title());
        frame.render_widget(Paragraph::new(Line::from(banner)), area);
    }
}
