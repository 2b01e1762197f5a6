//! Upload Document form: a single path field checked by
//! `core::dialog::validate_upload` when submitted.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use super::{DialogEvent, field_block, frame_modal, status_line};
use crate::core::dialog::{ALLOWED_EXTENSIONS, UploadForm};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

pub const HEIGHT: u16 = 8;

pub fn handle_event(form: &mut UploadForm, event: &TuiEvent) -> Option<DialogEvent> {
    match event {
        TuiEvent::Escape => return Some(DialogEvent::Cancel),
        _ if form.pending => {}
        TuiEvent::Submit => return Some(DialogEvent::Submit),
        TuiEvent::InputChar('\n') => {}
        TuiEvent::InputChar(c) => {
            form.path.push(*c);
            form.error = None;
        }
        // Dropping a file onto most terminals pastes its (possibly quoted) path.
        TuiEvent::Paste(text) => {
            form.path.push_str(text.trim().trim_matches(['\'', '"']));
            form.error = None;
        }
        TuiEvent::Backspace => {
            form.path.pop();
        }
        _ => {}
    }
    None
}

pub struct UploadFormView<'a> {
    pub form: &'a UploadForm,
    pub palette: &'a Palette,
}

impl<'a> UploadFormView<'a> {
    pub fn new(form: &'a UploadForm, palette: &'a Palette) -> Self {
        Self { form, palette }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let inner = frame_modal(frame, area, "Upload Document", self.palette);
        let [path, hint, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let focused = !self.form.pending;
        frame.render_widget(
            Paragraph::new(self.form.path.as_str())
                .style(Style::default().fg(self.palette.text))
                .block(field_block(" File path ", focused, self.palette)),
            path,
        );
        frame.render_widget(
            Line::styled(
                format!(" {} · max 10 MB", ALLOWED_EXTENSIONS.join(", ")),
                Style::default().fg(self.palette.muted),
            ),
            hint,
        );
        let pending = self.form.pending.then_some(" Uploading...");
        frame.render_widget(
            status_line(self.form.error.as_deref(), pending, self.palette),
            status,
        );

        if focused {
            let col = unicode_width::UnicodeWidthStr::width(self.form.path.as_str()) as u16;
            let max_col = path.width.saturating_sub(3);
            frame.set_cursor_position((path.x + 1 + col.min(max_col), path.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(form: &UploadForm) -> String {
        let palette = Palette::default();
        let mut terminal = Terminal::new(TestBackend::new(60, HEIGHT)).unwrap();
        terminal
            .draw(|f| UploadFormView::new(form, &palette).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn typing_edits_path_and_enter_submits() {
        let mut form = UploadForm::new();
        for c in "a.pdf".chars() {
            handle_event(&mut form, &TuiEvent::InputChar(c));
        }
        handle_event(&mut form, &TuiEvent::Backspace);
        assert_eq!(form.path, "a.pd");
        assert_eq!(handle_event(&mut form, &TuiEvent::Submit), Some(DialogEvent::Submit));
    }

    #[test]
    fn pasted_paths_are_unquoted() {
        let mut form = UploadForm::new();
        handle_event(&mut form, &TuiEvent::Paste("'/tmp/my file.txt' ".to_string()));
        assert_eq!(form.path, "/tmp/my file.txt");
    }

    #[test]
    fn pending_upload_shows_progress_and_ignores_submit() {
        let mut form = UploadForm::new();
        form.path = "/tmp/report.pdf".to_string();
        form.pending = true;
        assert_eq!(handle_event(&mut form, &TuiEvent::Submit), None);
        let text = screen(&form);
        assert!(text.contains("Uploading..."));
        assert!(text.contains("/tmp/report.pdf"));
    }

    #[test]
    fn shows_rejection_inline() {
        let mut form = UploadForm::new();
        form.error = Some("Unsupported file type".to_string());
        let text = screen(&form);
        assert!(text.contains("Unsupported file type"));
        assert!(text.contains("pdf, txt, doc, docx"));
    }
}
