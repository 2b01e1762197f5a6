//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! `MessageList` is created every frame around `&mut MessageListState`
//! (persistent scroll position and layout cache) plus the message slice as
//! props. The store is append-only, so cached bubble heights stay valid until
//! the width changes; new messages only append to the cache.

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::Message;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageBubble;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠸", "⠴"];
/// Rows reserved under the last bubble for the "Thinking..." line.
const THINKING_ROWS: u16 = 2;

pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never runs past the last message.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Re-engage auto-scroll once the user scrolls back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Per-message heights at one list width.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            content_width: 0,
        }
    }

    /// How many cached heights still apply to `message_count` messages at
    /// `content_width`.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    /// Bring the cache up to date with `messages`, measuring only what changed.
    pub fn sync(&mut self, messages: &[Message], palette: &Palette, content_width: u16) {
        let reusable = self.reusable_count(messages.len(), content_width);
        self.heights.truncate(reusable);
        for message in &messages[reusable..] {
            self.heights
                .push(MessageBubble::calculate_height(message, palette, content_width));
        }
        self.content_width = content_width;
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Messages overlapping the viewport, padded by half a screen each way.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [Message],
    pub palette: &'a Palette,
    /// A reply timer is armed
    pub awaiting_reply: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [Message],
        palette: &'a Palette,
        awaiting_reply: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            messages,
            palette,
            awaiting_reply,
            spinner_frame,
        }
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let hint = Paragraph::new(vec![
            Line::default(),
            Line::styled(
                "No messages yet",
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                "Type below and press Enter to start chatting",
                Style::default().fg(self.palette.muted),
            ),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(hint, area);
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.messages.is_empty() && !self.awaiting_reply {
            self.render_empty(frame, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for the scrollbar
        self.state.layout.sync(self.messages, self.palette, content_width);

        let total_height = self.state.layout.total_height();
        let thinking_rows = if self.awaiting_reply { THINKING_ROWS } else { 0 };
        let canvas_height = total_height.saturating_add(thinking_rows);

        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible = self.state.layout.visible_range(scroll_offset, area.height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y = match visible.start {
            0 => 0,
            i => self.state.layout.prefix_heights[i - 1],
        };
        for i in visible {
            let height = self.state.layout.heights[i];
            let row = Rect::new(0, y, content_width, height);
            scroll_view.render_widget(MessageBubble::new(&self.messages[i], self.palette), row);
            y = y.saturating_add(height);
        }

        if self.awaiting_reply {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            let line = Line::from(vec![
                Span::styled(format!(" {spinner} "), Style::default().fg(self.palette.accent)),
                Span::styled(
                    "Thinking...",
                    Style::default()
                        .fg(self.palette.muted)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]);
            let row = Rect::new(0, total_height.saturating_add(1), content_width, 1);
            scroll_view.render_widget(Paragraph::new(line), row);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
