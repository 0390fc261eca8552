use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the screen.
///
/// Components receive what they draw as props (struct fields, usually
/// borrowed from `Session`) and render into the `Rect` they are given.
/// `render` takes `&mut self` so a component may keep presentation-only
/// state, such as a scroll offset, between the layout pass and the draw.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Something that turns terminal events into higher-level events.
pub trait EventHandler {
    /// What this handler emits.
    type Event;

    /// Interpret one `TuiEvent`; `None` means the event is ignored.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
