use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::core::state::{Mode, Session};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    EditorPanel, HelpPanel, ItemList, StatusBar, TitleBar, Viewer, editor_panel,
};
use crate::tui::palette::Palette;

pub const SEARCH_PLACEHOLDER: &str = "Search view (coming soon)";

/// Draw one complete frame from the session.
pub fn draw_ui(frame: &mut Frame, session: &Session, tui: &mut TuiState, now: DateTime<Local>) {
    use Constraint::{Length, Min};

    let palette = Palette::from(&session.theme);
    frame.render_widget(
        Block::default().style(
            Style::default()
                .fg(palette.text)
                .bg(palette.background),
        ),
        frame.area(),
    );

    let layout = Layout::vertical([
        Length(1),
        Min(0),
        Length(1),
        Length(HelpPanel::height(session.help_visible)),
    ]);
    let [title_area, content_area, status_area, help_area] = layout.areas(frame.area());

    TitleBar { palette: &palette }.render(frame, title_area);

    // One row of breathing room under the title
    let [_, content_area] = Layout::vertical([Length(1), Min(0)]).areas(content_area);
    draw_content(frame, content_area, session, tui, &palette, now);

    let clock = now.format("%H:%M").to_string();
    StatusBar {
        mode_label: session.mode.label(),
        status: &session.status_message,
        clock: &clock,
        palette: &palette,
    }
    .render(frame, status_area);

    HelpPanel {
        visible: session.help_visible,
        palette: &palette,
    }
    .render(frame, help_area);
}

fn draw_content(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    tui: &mut TuiState,
    palette: &Palette,
    now: DateTime<Local>,
) {
    match &session.mode {
        mode if mode.shows_list() => ItemList {
            mode,
            list: &session.list,
            palette,
        }
        .render(frame, area),
        Mode::Editor { journal } => EditorPanel {
            header: editor_panel::header_text(
                *journal,
                session.current_item_id.as_deref(),
                now,
            ),
            buffer: &session.editor,
            scroll: &mut tui.editor_scroll,
            palette,
        }
        .render(frame, area),
        Mode::Viewer { .. } => Viewer {
            item_id: session.current_item_id.as_deref(),
            content: &session.viewer_buffer,
            scroll: session.viewer_scroll,
            measured: &mut tui.viewer_measured,
            palette,
        }
        .render(frame, area),
        _ => draw_search(frame, area, palette),
    }
}

fn draw_search(frame: &mut Frame, area: Rect, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.panel_border())
        .title(" 🔍 Search ");
    let placeholder = Paragraph::new(SEARCH_PLACEHOLDER)
        .style(palette.help())
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(placeholder, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::editor::EditorBuffer;
    use crate::core::theme::default_theme;
    use crate::test_support::fixed_now;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(session: &Session) -> String {
        let mut tui = TuiState::default();
        let backend = TestBackend::new(80, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| draw_ui(f, session, &mut tui, fixed_now()))
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
    fn test_menu_frame_has_every_region() {
        let session = Session::new(default_theme());
        let text = draw(&session);
        assert!(text.contains("NoteType - Your Personal Journal & Notes"));
        assert!(text.contains("NoteType - Main Menu"));
        assert!(text.contains("Welcome to NoteType! Press ? for help"));
        assert!(text.contains("09:05"));
        assert!(text.contains("Press ? for help"));
    }

    #[test]
    fn test_help_visible_shows_reference() {
        let mut session = Session::new(default_theme());
        session.help_visible = true;
        let text = draw(&session);
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Press ? again to hide help"));
    }

    #[test]
    fn test_editor_frame_shows_journal_header() {
        let mut session = Session::new(default_theme());
        session.mode = Mode::Editor { journal: true };
        session.editor = EditorBuffer::with_text("# Daily Journal");
        let text = draw(&session);
        assert!(text.contains("Today's Journal - Friday, March 7, 2025"));
        assert!(text.contains("# Daily Journal"));
        assert!(text.contains("Save (Ctrl+S)"));
    }

    #[test]
    fn test_viewer_frame_renders_markdown() {
        let mut session = Session::new(default_theme());
        session.mode = Mode::Viewer { journal: false };
        session.current_item_id = Some("ideas".to_string());
        session.viewer_buffer = "# Ideas\n\nShip it #work".to_string();
        let text = draw(&session);
        assert!(text.contains("Viewing: ideas"));
        assert!(text.contains("Ship it #work"));
    }

    #[test]
    fn test_viewer_frame_reports_wrapped_scroll_limit() {
        let mut session = Session::new(default_theme());
        session.mode = Mode::Viewer { journal: false };
        session.current_item_id = Some("essay".to_string());
        session.viewer_buffer = format!("{}END", "word ".repeat(1000));

        let mut tui = TuiState::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal
            .draw(|f| draw_ui(f, &session, &mut tui, fixed_now()))
            .unwrap();

        assert!(tui.viewer_measured.is_some_and(|limit| limit > 0));
    }

    #[test]
    fn test_search_frame_is_placeholder() {
        let mut session = Session::new(default_theme());
        session.mode = Mode::Search;
        assert!(draw(&session).contains(SEARCH_PLACEHOLDER));
    }
}
