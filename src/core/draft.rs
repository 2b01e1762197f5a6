//! The not-yet-sent message: a text buffer plus the editor/preview toggle.

use std::ops::Range;

use crate::core::format::{self, Format};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub show_preview: bool,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the byte range `selection` and return where the cursor should land.
    ///
    /// An empty selection leaves the cursor between the delimiters so the user
    /// can type the enclosed text; otherwise the cursor lands after the suffix.
    pub fn apply_format(&mut self, selection: Range<usize>, format: Format) -> usize {
        let selection = format::normalize(&self.text, selection);
        let (prefix, suffix) = format.delimiters();
        self.text = format::apply(&self.text, selection.clone(), format);

        if selection.is_empty() {
            selection.start + prefix.len()
        } else {
            selection.end + prefix.len() + suffix.len()
        }
    }

    pub fn toggle_preview(&mut self) {
        self.show_preview = !self.show_preview;
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Take the text out for sending. Blank drafts are kept and yield `None`.
    pub fn take(&mut self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        Some(std::mem::take(&mut self.text))
    }
}
