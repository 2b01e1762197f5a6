//! Notification toast drawn over the top-right corner of the screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::core::notify::{Notification, NotificationKind};
use crate::tui::component::Component;
use crate::tui::theme::Palette;

const TOAST_WIDTH: u16 = 36;
const TOAST_HEIGHT: u16 = 4;

pub struct Toast<'a> {
    pub notification: &'a Notification,
    pub palette: &'a Palette,
}

impl<'a> Toast<'a> {
    pub fn new(notification: &'a Notification, palette: &'a Palette) -> Self {
        Self {
            notification,
            palette,
        }
    }

    /// Top-right corner of `screen`, one cell in from the edges.
    pub fn area(screen: Rect) -> Rect {
        let width = TOAST_WIDTH.min(screen.width.saturating_sub(2));
        let height = TOAST_HEIGHT.min(screen.height.saturating_sub(2));
        Rect::new(
            screen.x + screen.width.saturating_sub(width + 1),
            screen.y + 1,
            width,
            height,
        )
    }
}

impl Component for Toast<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let color = match self.notification.kind {
            NotificationKind::Success => self.palette.success,
            NotificationKind::Error => self.palette.error,
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(Line::styled(
                format!(" {} ", self.notification.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        let body = Paragraph::new(self.notification.body.as_str())
            .style(Style::default().fg(self.palette.text))
            .wrap(Wrap { trim: true })
            .block(block);

        frame.render_widget(Clear, area);
        frame.render_widget(body, area);
    }
}
