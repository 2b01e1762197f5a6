//! # Modal dialogs
//!
//! Add Agent and Upload Document forms. Both edit the form structs held in
//! `core::dialog` (so validation and the `pending` flag stay in the core) and
//! report Submit/Cancel to the event loop, which turns them into
//! `Action::SubmitDialog` / `Action::CloseDialog`.

pub mod agent_form;
pub mod upload_form;

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear};

use crate::core::dialog::Dialog;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

pub use agent_form::AgentFormView;
pub use upload_form::UploadFormView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    Submit,
    Cancel,
}

/// Route a key to whichever dialog is open.
pub fn handle_event(dialog: &mut Dialog, event: &TuiEvent) -> Option<DialogEvent> {
    match dialog {
        Dialog::AddAgent(form) => agent_form::handle_event(form, event),
        Dialog::Upload(form) => upload_form::handle_event(form, event),
    }
}

/// Draw the open dialog centred over `screen`.
pub fn render(frame: &mut Frame, screen: Rect, dialog: &Dialog, palette: &Palette) {
    match dialog {
        Dialog::AddAgent(form) => {
            let area = centered_rect(screen, 60, agent_form::HEIGHT);
            AgentFormView::new(form, palette).render(frame, area);
        }
        Dialog::Upload(form) => {
            let area = centered_rect(screen, 60, upload_form::HEIGHT);
            UploadFormView::new(form, palette).render(frame, area);
        }
    }
}

/// A `width` x `height` rect centred in `area`, shrunk to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

/// Clear `area` and draw the modal frame, returning the inner area.
fn frame_modal(frame: &mut Frame, area: Rect, title: &str, palette: &Palette) -> Rect {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.accent))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(
            Line::styled(" Enter next/submit · Esc cancel ", Style::default().fg(palette.muted))
                .centered(),
        );
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    inner
}

/// Bordered single field; the focused one is drawn in the accent colour.
fn field_block<'a>(label: &'a str, focused: bool, palette: &Palette) -> Block<'a> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(palette.border_style(focused))
        .title(label)
}

/// Status line under the fields: the inline error, or the in-flight label.
fn status_line(
    error: Option<&str>,
    pending: Option<&'static str>,
    palette: &Palette,
) -> Line<'static> {
    match (pending, error) {
        (Some(label), _) => Line::styled(
            label,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::ITALIC),
        ),
        (None, Some(error)) => Line::styled(error.to_string(), Style::default().fg(palette.error)),
        (None, None) => Line::default(),
    }
}
