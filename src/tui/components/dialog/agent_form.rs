//! Add Agent form: name, description (multi-line with Ctrl+J) and a
//! comma-separated capabilities field.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use super::{DialogEvent, field_block, frame_modal, status_line};
use crate::core::dialog::{AddAgentForm, AgentField};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

/// Outer height including the modal border.
pub const HEIGHT: u16 = 16;
const DESCRIPTION_ROWS: u16 = 3;

pub fn handle_event(form: &mut AddAgentForm, event: &TuiEvent) -> Option<DialogEvent> {
    if matches!(event, TuiEvent::Escape) {
        return Some(DialogEvent::Cancel);
    }
    if form.pending {
        return None;
    }

    match event {
        TuiEvent::FocusNext | TuiEvent::CursorDown => form.focus = form.focus.next(),
        TuiEvent::FocusPrev | TuiEvent::CursorUp => form.focus = form.focus.prev(),
        TuiEvent::Submit if form.focus == AgentField::Capabilities => {
            return Some(DialogEvent::Submit);
        }
        TuiEvent::Submit => form.focus = form.focus.next(),
        TuiEvent::InputChar('\n') => {
            if form.focus == AgentField::Description {
                form.description.push('\n');
            }
        }
        TuiEvent::InputChar(c) => {
            form.focused_mut().push(*c);
            form.error = None;
        }
        TuiEvent::Paste(text) => {
            let text = if form.focus == AgentField::Description {
                text.clone()
            } else {
                text.replace(['\r', '\n'], " ")
            };
            form.focused_mut().push_str(&text);
            form.error = None;
        }
        TuiEvent::Backspace => {
            form.focused_mut().pop();
        }
        _ => {}
    }
    None
}

pub struct AgentFormView<'a> {
    pub form: &'a AddAgentForm,
    pub palette: &'a Palette,
}

impl<'a> AgentFormView<'a> {
    pub fn new(form: &'a AddAgentForm, palette: &'a Palette) -> Self {
        Self { form, palette }
    }

    fn field(&self, frame: &mut Frame, area: Rect, field: AgentField, label: &str, value: &str) {
        let focused = self.form.focus == field && !self.form.pending;
        let paragraph = Paragraph::new(value.to_string())
            .style(Style::default().fg(self.palette.text))
            .wrap(Wrap { trim: false })
            .block(field_block(label, focused, self.palette));
        frame.render_widget(paragraph, area);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let inner = frame_modal(frame, area, "Add New Agent", self.palette);
        let [name, description, capabilities, hint, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(DESCRIPTION_ROWS + 2),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.field(frame, name, AgentField::Name, " Name ", &self.form.name);
        self.field(
            frame,
            description,
            AgentField::Description,
            " Description (Ctrl+J newline) ",
            &self.form.description,
        );
        self.field(
            frame,
            capabilities,
            AgentField::Capabilities,
            " Capabilities ",
            &self.form.capabilities,
        );
        frame.render_widget(
            Line::styled(
                " e.g. research, analysis, writing",
                Style::default().fg(self.palette.muted),
            ),
            hint,
        );

        let pending = self.form.pending.then_some(" Creating...");
        frame.render_widget(
            status_line(self.form.error.as_deref(), pending, self.palette),
            status,
        );

        if let Some(cursor) = self.cursor_position(name, description, capabilities) {
            frame.set_cursor_position(cursor);
        }
    }

    /// End of the focused field's text. Wrapping is not followed.
    fn cursor_position(
        &self,
        name: Rect,
        description: Rect,
        capabilities: Rect,
    ) -> Option<(u16, u16)> {
        if self.form.pending {
            return None;
        }
        let (area, value) = match self.form.focus {
            AgentField::Name => (name, self.form.name.as_str()),
            AgentField::Description => (description, self.form.description.as_str()),
            AgentField::Capabilities => (capabilities, self.form.capabilities.as_str()),
        };
        let row = value.matches('\n').count() as u16;
        let last = value.rsplit('\n').next().unwrap_or_default();
        let col = unicode_width::UnicodeWidthStr::width(last) as u16;
        let inner_width = area.width.saturating_sub(2);
        let inner_height = area.height.saturating_sub(2);
        Some((
            area.x + 1 + col.min(inner_width.saturating_sub(1)),
            area.y + 1 + row.min(inner_height.saturating_sub(1)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::filled_agent_form;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(form: &mut AddAgentForm, text: &str) {
        for c in text.chars() {
            handle_event(form, &TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn enter_walks_fields_then_submits() {
        let mut form = AddAgentForm::new();
        type_str(&mut form, "Researcher");
        assert_eq!(handle_event(&mut form, &TuiEvent::Submit), None);
        assert_eq!(form.focus, AgentField::Description);
        type_str(&mut form, "Finds things");
        handle_event(&mut form, &TuiEvent::Submit);
        type_str(&mut form, "research, analysis");
        assert_eq!(
            handle_event(&mut form, &TuiEvent::Submit),
            Some(DialogEvent::Submit)
        );
        let expected = filled_agent_form();
        assert_eq!(
            (&form.name, &form.description, &form.capabilities),
            (&expected.name, &expected.description, &expected.capabilities)
        );
    }

    #[test]
    fn newline_only_in_description() {
        let mut form = AddAgentForm::new();
        handle_event(&mut form, &TuiEvent::InputChar('\n'));
        assert!(form.name.is_empty());
        form.focus = AgentField::Description;
        type_str(&mut form, "a\nb");
        assert_eq!(form.description, "a\nb");
    }

    #[test]
    fn pending_form_ignores_edits_but_can_close() {
        let mut form = filled_agent_form();
        form.pending = true;
        handle_event(&mut form, &TuiEvent::InputChar('x'));
        assert_eq!(form.name, "Researcher");
        assert_eq!(
            handle_event(&mut form, &TuiEvent::Escape),
            Some(DialogEvent::Cancel)
        );
    }

    #[test]
    fn renders_fields_and_error() {
        let mut form = AddAgentForm::new();
        form.name = "Scout".to_string();
        form.error = Some("Please fill in the description field".to_string());
        let palette = Palette::default();
        let mut terminal = Terminal::new(TestBackend::new(60, HEIGHT)).unwrap();
        terminal
            .draw(|f| AgentFormView::new(&form, &palette).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Add New Agent"));
        assert!(text.contains("Scout"));
        assert!(text.contains("Please fill in the description field"));
    }
}
