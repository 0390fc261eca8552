//! # ItemList Component
//!
//! The content panel for every list-like mode: main menu, notes, journal,
//! tag index, templates and themes. Each row is two lines, title then a
//! muted description, and the cursor row is highlighted.
//!
//! The cursor itself lives in `core::state::SelectList`; a `ListState` is
//! rebuilt from it each frame, which lets ratatui compute the scroll offset
//! that keeps the selection on screen.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, List, ListItem as ListRow, ListState, Padding, Paragraph,
};

use crate::core::state::{Mode, SelectList};
use crate::tui::component::Component;
use crate::tui::components::truncate_to_width;
use crate::tui::palette::Palette;

const SELECTED_MARKER: &str = "▸ ";
const UNSELECTED_MARKER: &str = "  ";

pub struct ItemList<'a> {
    pub mode: &'a Mode,
    pub list: &'a SelectList,
    pub palette: &'a Palette,
}

/// Key reminder drawn in the bottom border.
fn footer_hint(mode: &Mode) -> &'static str {
    match mode {
        Mode::Menu => " Enter Select  / Search  q Quit ",
        Mode::List { .. } => " n New  d Delete  Enter Open  Esc Back ",
        _ => " Enter Select  Esc Back ",
    }
}

impl Component for ItemList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = format!(" {} ", self.mode.list_title());
        let footer = Span::styled(footer_hint(self.mode), self.palette.help());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.palette.panel_border())
            .title(Span::styled(title, self.palette.selected_item()))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(footer).centered())
            .padding(Padding::horizontal(1));

        if self.list.is_empty() {
            let empty = Paragraph::new("No items.")
                .style(self.palette.help())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // borders (2) + padding (2) + marker
        let text_width = (area.width as usize).saturating_sub(4 + UNSELECTED_MARKER.len());

        let rows: Vec<ListRow> = self
            .list
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let selected = i == self.list.cursor();
                let (marker, title_style) = if selected {
                    (SELECTED_MARKER, self.palette.selected_item())
                } else {
                    (UNSELECTED_MARKER, self.palette.normal_item())
                };
                let title = truncate_to_width(&item.title(), text_width);
                let description = truncate_to_width(&item.description(), text_width);
                ListRow::new(vec![
                    Line::from(vec![
                        Span::styled(marker, title_style),
                        Span::styled(title, title_style),
                    ]),
                    Line::from(vec![
                        Span::raw(UNSELECTED_MARKER),
                        Span::styled(description, self.palette.description()),
                    ]),
                ])
            })
            .collect();

        let mut state = ListState::default().with_selected(Some(self.list.cursor()));
        frame.render_stateful_widget(List::new(rows).block(block), area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::MenuAction;
    use crate::core::theme::default_theme;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(mode: &Mode, list: &SelectList, height: u16) -> Vec<String> {
        let palette = Palette::from(&default_theme());
        let mut component = ItemList {
            mode,
            list,
            palette: &palette,
        };
        let backend = TestBackend::new(60, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                component.render(f, f.area());
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..60).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn test_menu_rows_show_title_and_description() {
        let rows = draw(&Mode::Menu, &SelectList::menu(), 24).join("\n");
        assert!(rows.contains("NoteType - Main Menu"));
        assert!(rows.contains("Today's Journal"));
        assert!(rows.contains("Enter Select"));
    }

    #[test]
    fn test_cursor_row_is_marked() {
        let mut list = SelectList::menu();
        list.move_down();
        let rows = draw(&Mode::Menu, &list, 24);
        let marked: Vec<&String> = rows.iter().filter(|r| r.contains('▸')).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains(MenuAction::AllJournals.label()));
    }

    #[test]
    fn test_selection_scrolls_into_view() {
        let mut list = SelectList::menu();
        list.bottom();
        let rows = draw(&Mode::Menu, &list, 8).join("\n");
        assert!(rows.contains(MenuAction::Settings.label()));
        assert!(!rows.contains(MenuAction::TodayJournal.label()));
    }

    #[test]
    fn test_empty_list_placeholder() {
        let mode = Mode::List {
            journal: false,
            tag_filter: None,
        };
        let rows = draw(&mode, &SelectList::new(Vec::new()), 6).join("\n");
        assert!(rows.contains("No items."));
        assert!(rows.contains("Notes"));
    }
}
