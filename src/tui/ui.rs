use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::sidebar::SIDEBAR_WIDTH;
use crate::tui::components::{MessageList, Sidebar, TitleBar, Toast, Toolbar, dialog};
use crate::tui::{Focus, TuiState};

/// Screen regions for one frame.
pub struct Regions {
    pub sidebar: Rect,
    pub title: Rect,
    pub messages: Rect,
    pub toolbar: Rect,
    pub input: Rect,
}

/// The sidebar is dropped on terminals too narrow to share.
fn sidebar_width(total_width: u16) -> u16 {
    if total_width >= SIDEBAR_WIDTH * 2 {
        SIDEBAR_WIDTH
    } else {
        0
    }
}

/// Sidebar on the left; on the right the chat column stacks title bar,
/// conversation, toolbar and composer.
pub fn layout(area: Rect, input_height: u16) -> Regions {
    use Constraint::{Length, Min};
    let [sidebar, chat] =
        Layout::horizontal([Length(sidebar_width(area.width)), Min(0)]).areas(area);
    let [title, messages, toolbar, input] =
        Layout::vertical([Length(1), Min(0), Length(1), Length(input_height)]).areas(chat);
    Regions {
        sidebar,
        title,
        messages,
        toolbar,
        input,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let palette = tui.palette;
    let total_width = frame.area().width;
    let chat_width = total_width - sidebar_width(total_width);
    let regions = layout(frame.area(), tui.input_box.calculate_height(chat_width));

    tui.sidebar_visible = regions.sidebar.width > 0;
    if !tui.sidebar_visible {
        tui.focus = Focus::Chat;
    }

    if tui.sidebar_visible {
        Sidebar::new(
            &app.agents,
            &app.documents,
            &app.backend_url,
            tui.focus == Focus::Sidebar && app.dialog.is_none(),
            &palette,
        )
        .render(frame, regions.sidebar);
    }

    TitleBar::new(
        app.agents.selected().map(|agent| agent.name.clone()),
        app.status_message.clone(),
        palette,
    )
    .render(frame, regions.title);

    MessageList::new(
        &mut tui.message_list,
        app.messages.messages(),
        &palette,
        app.is_awaiting_reply(),
        spinner_frame,
    )
    .render(frame, regions.messages);

    Toolbar::new(tui.input_box.draft.show_preview, palette).render(frame, regions.toolbar);

    tui.input_box.focused = tui.focus == Focus::Chat && app.dialog.is_none();
    tui.input_box.render(frame, regions.input);

    if let Some(open) = &app.dialog {
        dialog::render(frame, frame.area(), open, &palette);
    }

    if let Some(notification) = &app.notification {
        let area = Toast::area(frame.area());
        Toast::new(notification, &palette).render(frame, area);
    }
}
