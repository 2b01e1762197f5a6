//! # Draft Formatter
//!
//! Wraps a selected span of the draft in markdown delimiters.
//!
//! ```text
//! text[..start] + prefix + text[start..end] + suffix + text[end..]
//! ```
//!
//! With an empty selection the delimiters are inserted back to back at the
//! cursor. Applying a format twice nests the delimiters; nothing toggles off.

use std::ops::Range;

/// The fixed set of formatting actions offered by the chat toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Bold,
    Italic,
    Code,
    List,
    Link,
}

impl Format {
    /// Every format, in toolbar order.
    pub const ALL: [Format; 5] = [
        Format::Bold,
        Format::Italic,
        Format::Code,
        Format::List,
        Format::Link,
    ];

    /// The literal `(prefix, suffix)` pair for this format.
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            Format::Bold => ("**", "**"),
            Format::Italic => ("_", "_"),
            Format::Code => ("`", "`"),
            Format::List => ("- ", "\n"),
            Format::Link => ("[", "](url)"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Format::Bold => "Bold",
            Format::Italic => "Italic",
            Format::Code => "Code",
            Format::List => "List",
            Format::Link => "Link",
        }
    }

    /// Alt+<key> shortcut shown in the toolbar.
    pub fn shortcut(self) -> char {
        match self {
            Format::Bold => 'b',
            Format::Italic => 'i',
            Format::Code => 'c',
            Format::List => 'l',
            Format::Link => 'k',
        }
    }

    pub fn from_shortcut(c: char) -> Option<Format> {
        Format::ALL
            .into_iter()
            .find(|f| f.shortcut() == c.to_ascii_lowercase())
    }
}

/// Apply `format` to the byte range `selection` of `text`.
///
/// Offsets past the end are clamped, a reversed range is normalized and an
/// offset inside a multi-byte character is floored to its char boundary, so
/// the call never panics.
pub fn apply(text: &str, selection: Range<usize>, format: Format) -> String {
    let Range { start, end } = normalize(text, selection);
    let (prefix, suffix) = format.delimiters();

    let mut out = String::with_capacity(text.len() + prefix.len() + suffix.len());
    out.push_str(&text[..start]);
    out.push_str(prefix);
    out.push_str(&text[start..end]);
    out.push_str(suffix);
    out.push_str(&text[end..]);
    out
}

/// Clamp a selection into valid char-boundary offsets of `text`.
pub fn normalize(text: &str, selection: Range<usize>) -> Range<usize> {
    let (a, b) = if selection.start <= selection.end {
        (selection.start, selection.end)
    } else {
        (selection.end, selection.start)
    };
    floor_boundary(text, a)..floor_boundary(text, b)
}

fn floor_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}
