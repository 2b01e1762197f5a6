//! Formatting strip between the conversation and the composer. Lists the
//! Alt shortcuts for each markdown format and shows whether the composer
//! is in edit or preview mode.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::format::Format;
use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub struct Toolbar {
    pub show_preview: bool,
    pub palette: Palette,
}

impl Toolbar {
    pub fn new(show_preview: bool, palette: Palette) -> Self {
        Self {
            show_preview,
            palette,
        }
    }

    fn line(&self) -> Line<'static> {
        let key = Style::default()
            .fg(self.palette.accent)
            .add_modifier(Modifier::BOLD);
        let label = Style::default().fg(self.palette.muted);

        let mut spans = vec![Span::raw(" ")];
        for format in Format::ALL {
            let shortcut = format.shortcut().to_ascii_uppercase();
            spans.push(Span::styled(format!("Alt+{shortcut}"), key));
            spans.push(Span::styled(format!(" {}  ", format.label()), label));
        }

        let mode = if self.show_preview { "Preview" } else { "Edit" };
        spans.push(Span::styled("Ctrl+P", key));
        spans.push(Span::styled(" mode: ", label));
        spans.push(Span::styled(
            mode,
            Style::default()
                .fg(self.palette.text)
                .add_modifier(Modifier::BOLD),
        ));
        Line::from(spans)
    }
}

impl Component for Toolbar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(toolbar: &Toolbar) -> String {
        toolbar
            .line()
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect()
    }

    #[test]
    fn lists_every_format_shortcut() {
        let line = text(&Toolbar::new(false, Palette::default()));
        for format in Format::ALL {
            assert!(line.contains(format.label()), "{line}");
        }
        assert!(line.contains("Alt+B"));
        assert!(line.contains("Alt+K"));
    }

    #[test]
    fn shows_current_mode() {
        assert!(text(&Toolbar::new(false, Palette::default())).ends_with("mode: Edit"));
        assert!(text(&Toolbar::new(true, Palette::default())).ends_with("mode: Preview"));
    }
}
