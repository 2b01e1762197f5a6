//! # TitleBar Component
//!
//! One-line header above the conversation: app name, the agent currently
//! selected in the sidebar, and the status text from `App`.
//!
//! Stateless. All three fields are props copied in by the parent each frame,
//! so the bar renders whatever it is given and is trivial to test.
//!
//! Layout, left to right:
//!
//! 1. `agentchat` in the accent colour
//! 2. `· <agent name>` when an agent is selected
//! 3. `| <status>` when the status is non-empty (`Ready`, `Thinking...`)

use crate::tui::component::Component;
use crate::tui::theme::Palette;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub agent_name: Option<String>,
    pub status_message: String,
    pub palette: Palette,
}

impl TitleBar {
    pub fn new(agent_name: Option<String>, status_message: String, palette: Palette) -> Self {
        Self {
            agent_name,
            status_message,
            palette,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            " agentchat",
            Style::default()
                .fg(self.palette.accent)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(name) = &self.agent_name {
            spans.push(Span::styled(
                format!(" · {name}"),
                Style::default().fg(self.palette.text),
            ));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::styled(
                format!(" | {}", self.status_message),
                Style::default().fg(self.palette.muted),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_title_bar(title_bar: &mut TitleBar, width: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, 1)).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn shows_agent_and_status() {
        let mut bar = TitleBar::new(
            Some("Code Helper".to_string()),
            "Thinking...".to_string(),
            Palette::default(),
        );
        assert_eq!(
            render_title_bar(&mut bar, 60),
            " agentchat · Code Helper | Thinking..."
        );
    }

    #[test]
    fn omits_empty_parts() {
        let mut bar = TitleBar::new(None, String::new(), Palette::default());
        assert_eq!(render_title_bar(&mut bar, 30), " agentchat");
    }

    #[test]
    fn truncates_on_narrow_terminals() {
        let mut bar = TitleBar::new(
            Some("General Assistant".to_string()),
            "Ready".to_string(),
            Palette::default(),
        );
        assert_eq!(render_title_bar(&mut bar, 12), " agentchat ·");
    }
}
