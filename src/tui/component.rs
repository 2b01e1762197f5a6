use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Props come in through struct fields (`Sidebar`, `Toast`) or from state the
/// component owns (`InputBox`). `render` takes `&mut self` because the message
/// list refreshes its height cache and the composer its scroll offset while
/// drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Turns raw `TuiEvent`s into the component's own events, e.g.
/// `SidebarEvent::SelectNext` or `InputEvent::Submit`.
pub trait EventHandler {
    type Event;

    /// `None` when the event was consumed or ignored.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
