//! # InputBox Component
//!
//! The message composer: a markdown draft with a Shift-extended selection,
//! Alt shortcuts that wrap the selection in delimiters, and a preview mode
//! that shows the rendered markdown instead of the source.
//!
//! The draft itself is `core::draft::Draft`; cursor, selection and scroll
//! live in `CursorState`. While previewing, edits are ignored until the
//! preview is toggled off again.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};

use crate::core::draft::Draft;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markdown;
use crate::tui::theme::Palette;

use cursor::CursorState;
use text_wrap::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary,
    wrap_line_count, wrap_ranges,
};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter on a non-blank draft; the draft has been cleared.
    Submit(String),
    ContentChanged,
    TogglePreview,
}

/// # Props
///
/// - `palette`, `focused`: set by the parent before each render
pub struct InputBox {
    pub draft: Draft,
    pub palette: Palette,
    pub focused: bool,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(palette: Palette) -> Self {
        Self {
            draft: Draft::new(),
            palette,
            focused: true,
            cursor: CursorState::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.draft.text
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor.pos
    }

    pub fn selection(&self) -> std::ops::Range<usize> {
        self.cursor.selection()
    }

    /// Height for the current draft, clamped to the visible line limit.
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let lines = if self.draft.show_preview {
            let inner = inner_width(content_width);
            Paragraph::new(self.preview_text())
                .wrap(Wrap { trim: false })
                .line_count(inner)
                .max(1) as u16
        } else {
            wrap_line_count(&self.draft.text, inner_width(content_width))
        };
        lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn preview_text(&self) -> ratatui::text::Text<'static> {
        if self.draft.is_blank() {
            return Line::styled("Nothing to preview", Style::default().fg(self.palette.muted))
                .into();
        }
        markdown::render(&self.draft.text, self.palette.text, &self.palette)
    }

    /// Remove the selected text, leaving the cursor where it began.
    fn delete_selection(&mut self) -> bool {
        let selection = self.cursor.selection();
        self.cursor.anchor = None;
        if selection.is_empty() {
            return false;
        }
        self.draft.text.drain(selection.clone());
        self.cursor.pos = selection.start;
        true
    }

    fn insert(&mut self, text: &str) {
        self.delete_selection();
        self.draft.text.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
    }

    fn line_start(&self) -> usize {
        self.draft.text[..self.cursor.pos]
            .rfind('\n')
            .map_or(0, |i| i + 1)
    }

    fn line_end(&self) -> usize {
        self.draft.text[self.cursor.pos..]
            .find('\n')
            .map_or(self.draft.text.len(), |i| self.cursor.pos + i)
    }

    /// Source lines with the selection highlighted, already wrapped.
    fn editor_lines(&self, width: u16) -> Vec<Line<'static>> {
        let text = &self.draft.text;
        let selection = self.cursor.selection();
        let normal = Style::default().fg(self.palette.text);
        let selected = normal.bg(self.palette.selection_bg);

        wrap_ranges(text, width)
            .into_iter()
            .skip(self.cursor.scroll_offset as usize)
            .take(MAX_VISIBLE_LINES as usize)
            .map(|row| {
                let sel_start = selection.start.clamp(row.start, row.end);
                let sel_end = selection.end.clamp(row.start, row.end);
                let spans = [
                    (row.start..sel_start, normal),
                    (sel_start..sel_end, selected),
                    (sel_end..row.end, normal),
                ]
                .into_iter()
                .filter(|(range, _)| !range.is_empty())
                .map(|(range, style)| Span::styled(text[range].to_string(), style))
                .collect::<Vec<_>>();
                Line::from(spans)
            })
            .collect()
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        let total_lines = wrap_line_count(&self.draft.text, inner_width(area.width));
        if self.draft.show_preview || total_lines <= MAX_VISIBLE_LINES {
            return;
        }

        // content_length is the max scroll position, not the line count
        let max_scroll = total_lines.saturating_sub(MAX_VISIBLE_LINES);
        let mut state = ScrollbarState::default()
            .content_length(max_scroll as usize)
            .position(self.cursor.scroll_offset as usize);
        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut state,
        );
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.last_content_width = area.width;

        let title = if self.draft.show_preview {
            " Preview (Ctrl+P to edit) "
        } else {
            " Message "
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.palette.border_style(self.focused))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::horizontal(1));

        if self.draft.show_preview {
            let preview = Paragraph::new(self.preview_text())
                .wrap(Wrap { trim: false })
                .block(block);
            frame.render_widget(preview, area);
            return;
        }

        self.cursor.update_scroll_offset(&self.draft.text, area.width);
        let lines = self.editor_lines(inner_width(area.width));
        frame.render_widget(Paragraph::new(lines).block(block), area);
        self.render_scrollbar(frame, area);

        if self.focused {
            let (x, y) = self.cursor.screen_pos(&self.draft.text, area);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if let TuiEvent::TogglePreview = event {
            self.draft.toggle_preview();
            self.cursor.anchor = None;
            return Some(InputEvent::TogglePreview);
        }
        if let TuiEvent::Submit = event {
            let text = self.draft.take()?;
            self.cursor.reset();
            self.draft.show_preview = false;
            return Some(InputEvent::Submit(text));
        }
        if self.draft.show_preview {
            return None;
        }

        let text_len = self.draft.text.len();
        let changed = match event {
            TuiEvent::InputChar(c) => {
                self.insert(c.encode_utf8(&mut [0; 4]));
                true
            }
            TuiEvent::Paste(text) => {
                self.insert(text);
                true
            }
            TuiEvent::Backspace => {
                if self.delete_selection() {
                    true
                } else if self.cursor.pos > 0 {
                    let prev = prev_char_boundary(&self.draft.text, self.cursor.pos);
                    self.draft.text.drain(prev..self.cursor.pos);
                    self.cursor.pos = prev;
                    true
                } else {
                    false
                }
            }
            TuiEvent::Delete => {
                if self.delete_selection() {
                    true
                } else if self.cursor.pos < text_len {
                    let next = next_char_boundary(&self.draft.text, self.cursor.pos);
                    self.draft.text.drain(self.cursor.pos..next);
                    true
                } else {
                    false
                }
            }
            TuiEvent::Format(format) => {
                let selection = self.cursor.selection();
                self.cursor.anchor = None;
                self.cursor.pos = self.draft.apply_format(selection, *format);
                true
            }
            TuiEvent::CursorLeft { extend } => {
                let target = if !extend && self.cursor.has_selection() {
                    self.cursor.selection().start
                } else {
                    prev_char_boundary(&self.draft.text, self.cursor.pos)
                };
                self.cursor.move_to(target, *extend)
            }
            TuiEvent::CursorRight { extend } => {
                let target = if !extend && self.cursor.has_selection() {
                    self.cursor.selection().end
                } else if self.cursor.pos < text_len {
                    next_char_boundary(&self.draft.text, self.cursor.pos)
                } else {
                    self.cursor.pos
                };
                self.cursor.move_to(target, *extend)
            }
            TuiEvent::CursorHome { extend } => {
                let target = self.line_start();
                self.cursor.move_to(target, *extend)
            }
            TuiEvent::CursorEnd { extend } => {
                let target = self.line_end();
                self.cursor.move_to(target, *extend)
            }
            TuiEvent::CursorUp => {
                let width = self.cursor.last_content_width;
                self.cursor.move_vertically(&self.draft.text, -1, width)
            }
            TuiEvent::CursorDown => {
                let width = self.cursor.last_content_width;
                self.cursor.move_vertically(&self.draft.text, 1, width)
            }
            _ => false,
        };
        changed.then_some(InputEvent::ContentChanged)
    }
}
