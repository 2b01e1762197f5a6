//! Pure text wrapping utilities and dimensional constants for the InputBox.
//!
//! Wrapping is expressed as byte ranges into the draft so that rendering,
//! cursor placement and selection highlighting all agree on the same rows.

use std::ops::Range;

use unicode_width::UnicodeWidthStr;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from area edge to content (border width)
pub(super) const BORDER_OFFSET: u16 = 1;

fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Inner content width after border/padding overhead. 0 if too narrow.
pub(super) fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Split `text` into visual rows of at most `width` columns.
///
/// Each range covers one row. Rows of the same logical line are contiguous
/// (trailing spaces belong to the row they follow); the `\n` separating
/// logical lines belongs to no row. Always returns at least one range.
pub(super) fn wrap_ranges(text: &str, width: u16) -> Vec<Range<usize>> {
    let mut rows = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let line_end = line_start + line.len();
        if width == 0 || line.is_empty() {
            rows.push(line_start..line_end);
        } else {
            let mut starts = Vec::new();
            let mut offset = 0;
            for piece in textwrap::wrap(line, wrap_options(width)) {
                let start = if starts.is_empty() {
                    0
                } else {
                    line[offset..]
                        .find(piece.as_ref())
                        .map_or(offset, |i| offset + i)
                };
                starts.push(start);
                offset = (start + piece.len()).min(line.len());
            }
            if starts.is_empty() {
                starts.push(0);
            }
            for (i, start) in starts.iter().enumerate() {
                let end = starts.get(i + 1).copied().unwrap_or(line.len());
                rows.push(line_start + start..line_start + end);
            }
        }
        line_start = line_end + 1;
    }

    rows
}

/// Number of visual rows `text` occupies at `width`.
pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    wrap_ranges(text, width).len().max(1) as u16
}

/// Row index containing byte offset `pos`.
pub(super) fn row_of(rows: &[Range<usize>], pos: usize) -> usize {
    rows.iter().rposition(|r| r.start <= pos).unwrap_or(0)
}

/// Display column of `pos` within its row.
pub(super) fn column_of(text: &str, row: &Range<usize>, pos: usize) -> u16 {
    let end = pos.clamp(row.start, row.end);
    text[row.start..end].width() as u16
}

/// Byte offset in `row` whose display column is closest to `column` without
/// passing it.
pub(super) fn offset_at_column(text: &str, row: &Range<usize>, column: u16) -> usize {
    let mut width = 0u16;
    for (i, c) in text[row.clone()].char_indices() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0) as u16;
        if width + w > column {
            return row.start + i;
        }
        width += w;
    }
    row.end
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_one_row() {
        assert_eq!(wrap_ranges("", 10), vec![0..0]);
        assert_eq!(wrap_line_count("", 10), 1);
    }

    #[test]
    fn newlines_start_new_rows() {
        let text = "ab\ncd\n";
        assert_eq!(wrap_ranges(text, 10), vec![0..2, 3..5, 6..6]);
    }

    #[test]
    fn long_lines_wrap_at_spaces() {
        let text = "hello world again";
        let rows = wrap_ranges(text, 11);
        assert_eq!(rows.len(), 2);
        assert_eq!(&text[rows[0].clone()], "hello world ");
        assert_eq!(&text[rows[1].clone()], "again");
    }

    #[test]
    fn long_words_are_broken() {
        let rows = wrap_ranges("abcdefghij", 4);
        assert_eq!(rows, vec![0..4, 4..8, 8..10]);
    }

    #[test]
    fn rows_cover_every_non_newline_byte() {
        let text = "one two three\nfour  five six seven\n\neight";
        let rows = wrap_ranges(text, 6);
        let covered: usize = rows.iter().map(|r| r.len()).sum();
        let newlines = text.matches('\n').count();
        assert_eq!(covered + newlines, text.len());
    }

    #[test]
    fn cursor_row_and_column() {
        let text = "ab\ncdef";
        let rows = wrap_ranges(text, 10);
        assert_eq!(row_of(&rows, 2), 0);
        assert_eq!(row_of(&rows, 3), 1);
        assert_eq!(column_of(text, &rows[1], 5), 2);
    }

    #[test]
    fn column_counts_display_width() {
        let text = "日本語";
        let rows = wrap_ranges(text, 20);
        assert_eq!(column_of(text, &rows[0], 6), 4);
        assert_eq!(offset_at_column(text, &rows[0], 3), 3);
    }

    #[test]
    fn char_boundaries_skip_multibyte() {
        let text = "aé";
        assert_eq!(next_char_boundary(text, 1), 3);
        assert_eq!(prev_char_boundary(text, 3), 1);
    }
}
