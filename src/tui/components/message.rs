use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::{Message, Role};
use crate::tui::component::Component;
use crate::tui::markdown;
use crate::tui::theme::Palette;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Borders (1 left + 1 right) plus padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Top + bottom borders.
const VERTICAL_OVERHEAD: u16 = 2;
/// Bubbles take this share of the list width.
const BUBBLE_WIDTH_PERCENT: u16 = 80;

/// One chat bubble. Built fresh every frame from a stored [`Message`].
///
/// User bubbles hug the right edge in the accent colour; assistant bubbles
/// hug the left. Both render their body as markdown.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
    pub palette: &'a Palette,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message, palette: &'a Palette) -> Self {
        Self { message, palette }
    }

    /// Width of a bubble inside a list `width` columns wide.
    pub fn bubble_width(width: u16) -> u16 {
        (width as u32 * BUBBLE_WIDTH_PERCENT as u32 / 100) as u16
    }

    /// Rect the bubble occupies inside a full-width row `row`.
    pub fn bubble_rect(role: Role, row: Rect) -> Rect {
        let width = Self::bubble_width(row.width);
        let x = match role {
            Role::User => row.x + row.width - width,
            Role::Assistant => row.x,
        };
        Rect::new(x, row.y, width, row.height)
    }

    fn body(&self) -> Text<'static> {
        markdown::render(
            self.message.content.trim(),
            self.palette.role_fg(self.message.role),
            self.palette,
        )
    }

    /// Rendered height at a list width of `width`, measured with the same
    /// wrapping the `Paragraph` uses when drawing.
    pub fn calculate_height(message: &Message, palette: &Palette, width: u16) -> u16 {
        let inner = Self::bubble_width(width).saturating_sub(HORIZONTAL_OVERHEAD);
        if inner == 0 {
            return 1;
        }
        let body = MessageBubble::new(message, palette).body();
        if body.lines.is_empty() {
            return VERTICAL_OVERHEAD;
        }
        let lines = Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .line_count(inner) as u16;
        lines.max(1) + VERTICAL_OVERHEAD
    }
}

impl Widget for MessageBubble<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = Self::bubble_rect(self.message.role, area);
        let accent = self.palette.role_fg(self.message.role);
        let (label, border_style) = match self.message.role {
            Role::User => ("you", Style::default().fg(accent)),
            Role::Assistant => (
                "assistant",
                Style::default().fg(self.palette.border).add_modifier(Modifier::DIM),
            ),
        };
        let time = self.message.timestamp.format("%H:%M").to_string();

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Line::styled(label, Style::default().fg(accent)))
            .title_bottom(
                Line::styled(time, Style::default().fg(self.palette.muted)).right_aligned(),
            )
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(self.body())
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

impl Component for MessageBubble<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
