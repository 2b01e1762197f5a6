//! Cursor position, selection anchor and scroll tracking for the InputBox.
//!
//! `CursorState` never owns text; every method takes the buffer explicitly.

use std::ops::Range;

use ratatui::layout::Rect;

use super::text_wrap::{
    BORDER_OFFSET, MAX_VISIBLE_LINES, column_of, inner_width, offset_at_column, row_of,
    wrap_ranges,
};

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// Other end of the selection while Shift is held
    pub anchor: Option<usize>,
    /// Line offset for internal scrolling (0 when content fits in viewport)
    pub scroll_offset: u16,
    /// Cached content width from last render (used for vertical movement)
    pub last_content_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            anchor: None,
            scroll_offset: 0,
            last_content_width: Self::DEFAULT_WIDTH,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.anchor = None;
        self.scroll_offset = 0;
    }

    /// Selected byte range; empty (at the cursor) when nothing is selected.
    pub fn selection(&self) -> Range<usize> {
        match self.anchor {
            Some(anchor) if anchor < self.pos => anchor..self.pos,
            Some(anchor) => self.pos..anchor,
            None => self.pos..self.pos,
        }
    }

    pub fn has_selection(&self) -> bool {
        !self.selection().is_empty()
    }

    /// Move to `pos`, growing the selection when `extend` is set and
    /// dropping it otherwise. Returns whether anything changed.
    pub fn move_to(&mut self, pos: usize, extend: bool) -> bool {
        let before = (self.pos, self.anchor);
        if extend {
            self.anchor.get_or_insert(self.pos);
        } else {
            self.anchor = None;
        }
        self.pos = pos;
        before != (self.pos, self.anchor)
    }

    /// Move up (`-1`) or down (`1`) one visual row, keeping the column.
    /// Returns `false` at the first/last row.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16, content_width: u16) -> bool {
        let rows = wrap_ranges(buffer, inner_width(content_width));
        let row = row_of(&rows, self.pos);
        let target = if direction < 0 {
            match row.checked_sub(1) {
                Some(target) => target,
                None => return false,
            }
        } else if row + 1 < rows.len() {
            row + 1
        } else {
            return false;
        };

        let column = column_of(buffer, &rows[row], self.pos);
        self.anchor = None;
        self.pos = offset_at_column(buffer, &rows[target], column);
        true
    }

    /// Keep the cursor row inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let rows = wrap_ranges(buffer, inner_width(content_width));
        if rows.len() as u16 <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = row_of(&rows, self.pos) as u16;
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_line.saturating_sub(MAX_VISIBLE_LINES - 1);
        }
    }

    /// Screen position of the cursor as (column, row).
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        let rows = wrap_ranges(buffer, width);
        let row = row_of(&rows, self.pos);
        let column = column_of(buffer, &rows[row], self.pos).min(width);
        let visible_line = (row as u16).saturating_sub(self.scroll_offset);

        (
            area.x + BORDER_OFFSET + column,
            area.y + BORDER_OFFSET + visible_line,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_ordered_either_way() {
        let mut cursor = CursorState::new();
        cursor.pos = 5;
        cursor.move_to(2, true);
        assert_eq!(cursor.selection(), 2..5);
        cursor.move_to(8, true);
        assert_eq!(cursor.selection(), 5..8);
        cursor.move_to(8, false);
        assert_eq!(cursor.selection(), 8..8);
        assert!(!cursor.has_selection());
    }

    #[test]
    fn vertical_moves_keep_column() {
        let buffer = "abcd\nxy\nlonger";
        let mut cursor = CursorState::new();
        cursor.pos = 3;
        assert!(cursor.move_vertically(buffer, 1, 40));
        assert_eq!(cursor.pos, 7); // end of "xy"
        assert!(cursor.move_vertically(buffer, 1, 40));
        assert_eq!(cursor.pos, 10);
        assert!(!cursor.move_vertically(buffer, 1, 40));
        assert!(cursor.move_vertically(buffer, -1, 40));
        assert!(cursor.move_vertically(buffer, -1, 40));
        assert!(!cursor.move_vertically(buffer, -1, 40));
    }

    #[test]
    fn screen_pos_follows_newlines() {
        let buffer = "ab\ncd";
        let mut cursor = CursorState::new();
        cursor.pos = 4;
        let area = Rect::new(0, 0, 20, 4);
        assert_eq!(cursor.screen_pos(buffer, area), (2, 2));
    }

    #[test]
    fn scroll_follows_cursor_past_visible_window() {
        let buffer = "1\n2\n3\n4\n5\n6\n7";
        let mut cursor = CursorState::new();
        cursor.pos = buffer.len();
        cursor.update_scroll_offset(buffer, 20);
        assert_eq!(cursor.scroll_offset, 2);
        cursor.pos = 0;
        cursor.update_scroll_offset(buffer, 20);
        assert_eq!(cursor.scroll_offset, 0);
    }
}
