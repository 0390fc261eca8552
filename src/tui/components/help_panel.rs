//! # HelpPanel Component
//!
//! Collapsed: a single muted hint row. Expanded: a bordered keyboard
//! reference. The layout asks `HelpPanel::height` before splitting the
//! screen so the panel always gets exactly the rows it draws.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

use crate::tui::component::Component;
use crate::tui::palette::Palette;

pub const HELP_HINT: &str = "Press ? for help";

/// (keys, what they do)
const NAVIGATION: &[(&str, &str)] = &[
    ("↑/k ↓/j", "Move up/down"),
    ("enter", "Select/Open"),
    ("esc", "Back to menu"),
    ("q / Ctrl+C", "Quit"),
];

const ACTIONS: &[(&str, &str)] = &[
    ("n", "New entry (in lists)"),
    ("d", "Delete (in lists)"),
    ("e", "Edit (in viewer)"),
    ("/", "Search"),
    ("Ctrl+S", "Save (in editor)"),
    ("? / F1", "Toggle help (F1 in editor)"),
];

const FEATURES: &[&str] = &[
    "Tags: Select from menu to browse all tags",
    "Templates: Select to create from template",
    "Themes: Select to change colors instantly",
];

const KEY_COLUMN: usize = 14;

pub struct HelpPanel<'a> {
    pub visible: bool,
    pub palette: &'a Palette,
}

impl HelpPanel<'_> {
    /// Rows the panel occupies.
    pub fn height(visible: bool) -> u16 {
        if visible {
            // content + two borders
            help_lines_len() as u16 + 2
        } else {
            1
        }
    }

    fn shortcut_lines(&self) -> Vec<Line<'static>> {
        let heading = self.palette.help().add_modifier(Modifier::BOLD);
        let key_style = self.palette.selected_item();
        let text_style = self.palette.normal_item();

        let section = |title: &'static str, rows: &[(&'static str, &'static str)]| {
            let mut lines = vec![Line::from(Span::styled(title, heading))];
            lines.extend(rows.iter().map(|(keys, what)| {
                Line::from(vec![
                    Span::styled(format!("  {:<width$}", keys, width = KEY_COLUMN), key_style),
                    Span::styled(*what, text_style),
                ])
            }));
            lines
        };

        let mut lines = vec![Line::from(Span::styled("📌 Keyboard Shortcuts", heading))];
        lines.push(Line::default());
        lines.extend(section("Navigation:", NAVIGATION));
        lines.push(Line::default());
        lines.extend(section("Actions:", ACTIONS));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("TUI Features:", heading)));
        lines.extend(
            FEATURES
                .iter()
                .map(|f| Line::from(Span::styled(format!("  • {}", f), text_style))),
        );
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Press ? again to hide help",
            self.palette.help(),
        )));
        lines
    }
}

fn help_lines_len() -> usize {
    // title, blank, heading+rows, blank, heading+rows, blank, heading+features, blank, footer
    2 + (1 + NAVIGATION.len()) + 1 + (1 + ACTIONS.len()) + 1 + (1 + FEATURES.len()) + 2
}

impl Component for HelpPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            let hint = Paragraph::new(Line::from(Span::styled(HELP_HINT, self.palette.help())));
            frame.render_widget(hint, area);
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.palette.active_border())
            .padding(Padding::horizontal(1));
        frame.render_widget(Paragraph::new(self.shortcut_lines()).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::default_theme;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(visible: bool) -> String {
        let palette = Palette::from(&default_theme());
        let mut panel = HelpPanel {
            visible,
            palette: &palette,
        };
        let backend = TestBackend::new(70, HelpPanel::height(visible));
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                panel.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_collapsed_panel_is_a_hint() {
        assert_eq!(HelpPanel::height(false), 1);
        assert!(draw(false).contains(HELP_HINT));
    }

    #[test]
    fn test_height_matches_drawn_lines() {
        let palette = Palette::from(&default_theme());
        let panel = HelpPanel {
            visible: true,
            palette: &palette,
        };
        assert_eq!(
            HelpPanel::height(true) as usize,
            panel.shortcut_lines().len() + 2
        );
    }

    #[test]
    fn test_expanded_panel_lists_shortcuts() {
        let text = draw(true);
        assert!(text.contains("Navigation:"));
        assert!(text.contains("Save (in editor)"));
        assert!(text.contains("Press ? again to hide help"));
    }
}
