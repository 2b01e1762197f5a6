use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use log::warn;

use crate::core::format::Format;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Global
    ForceQuit,      // Ctrl+C / Ctrl+Q
    OpenAddAgent,   // Ctrl+N
    OpenUpload,     // Ctrl+U
    RefreshDocuments, // Ctrl+R
    TogglePreview,  // Ctrl+P
    FocusNext,      // Tab
    FocusPrev,      // Shift+Tab
    Escape,
    Resize,

    // Editing
    Submit,
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    Format(Format), // Alt+B/I/C/L/K

    // Cursor movement; `extend` = Shift held (grow the selection)
    CursorLeft { extend: bool },
    CursorRight { extend: bool },
    CursorHome { extend: bool },
    CursorEnd { extend: bool },
    CursorUp,
    CursorDown,

    // Message list scrolling
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            warn!("Event poll failed: {e}");
            return None;
        }
    }
    match event::read() {
        Ok(ev) => map_event(ev),
        Err(e) => {
            warn!("Event read failed: {e}");
            None
        }
    }
}

fn map_event(ev: Event) -> Option<TuiEvent> {
    match ev {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Translate a key press into a `TuiEvent`. Key releases are dropped.
pub fn map_key(key: KeyEvent) -> Option<TuiEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key.code, key.modifiers);

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c' | 'q')) => Some(TuiEvent::ForceQuit),
        (KeyModifiers::CONTROL, KeyCode::Char('n')) => Some(TuiEvent::OpenAddAgent),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => Some(TuiEvent::OpenUpload),
        (KeyModifiers::CONTROL, KeyCode::Char('r')) => Some(TuiEvent::RefreshDocuments),
        (KeyModifiers::CONTROL, KeyCode::Char('p')) => Some(TuiEvent::TogglePreview),
        // Ctrl+J inserts newline (ASCII LF; Ctrl+Enter sends this in most terminals)
        (KeyModifiers::CONTROL, KeyCode::Char('j')) => Some(TuiEvent::InputChar('\n')),
        (KeyModifiers::ALT, KeyCode::Char(c)) => Format::from_shortcut(c).map(TuiEvent::Format),
        (_, KeyCode::Enter) if shift => Some(TuiEvent::InputChar('\n')),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::Tab) => Some(TuiEvent::FocusNext),
        (_, KeyCode::BackTab) => Some(TuiEvent::FocusPrev),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft { extend: shift }),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight { extend: shift }),
        (_, KeyCode::Home) => Some(TuiEvent::CursorHome { extend: shift }),
        (_, KeyCode::End) => Some(TuiEvent::CursorEnd { extend: shift }),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn alt_shortcuts_map_to_formats() {
        assert_eq!(
            map_key(key(KeyCode::Char('b'), KeyModifiers::ALT)),
            Some(TuiEvent::Format(Format::Bold))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('k'), KeyModifiers::ALT)),
            Some(TuiEvent::Format(Format::Link))
        );
        assert_eq!(map_key(key(KeyCode::Char('z'), KeyModifiers::ALT)), None);
    }

    #[test]
    fn shift_extends_cursor_moves() {
        assert_eq!(
            map_key(key(KeyCode::Left, KeyModifiers::SHIFT)),
            Some(TuiEvent::CursorLeft { extend: true })
        );
        assert_eq!(
            map_key(key(KeyCode::End, KeyModifiers::NONE)),
            Some(TuiEvent::CursorEnd { extend: false })
        );
    }

    #[test]
    fn enter_variants() {
        assert_eq!(map_key(key(KeyCode::Enter, KeyModifiers::NONE)), Some(TuiEvent::Submit));
        assert_eq!(
            map_key(key(KeyCode::Enter, KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('\n'))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            Some(TuiEvent::InputChar('\n'))
        );
    }

    #[test]
    fn control_shortcuts() {
        assert_eq!(
            map_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::ForceQuit)
        );
        assert_eq!(
            map_key(key(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            Some(TuiEvent::OpenAddAgent)
        );
        assert_eq!(
            map_key(key(KeyCode::Char('p'), KeyModifiers::CONTROL)),
            Some(TuiEvent::TogglePreview)
        );
    }

    #[test]
    fn releases_are_ignored() {
        let mut release = key(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }
}
