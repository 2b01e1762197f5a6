//! Colour palette shared by every component. One palette per [`Theme`].

use ratatui::style::{Color, Modifier, Style};

use crate::Theme;
use crate::core::message::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Focus borders, buttons, user bubbles.
    pub accent: Color,
    pub user_fg: Color,
    pub assistant_fg: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub success: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Lavender => Self {
                accent: Color::Rgb(0x9b, 0x87, 0xf5),
                user_fg: Color::Rgb(0x9b, 0x87, 0xf5),
                assistant_fg: Color::Gray,
                text: Color::White,
                muted: Color::DarkGray,
                border: Color::Rgb(0x7e, 0x69, 0xab),
                selection_bg: Color::Rgb(0x3b, 0x32, 0x5e),
                success: Color::Green,
                error: Color::Red,
            },
            Theme::Slate => Self {
                accent: Color::Cyan,
                user_fg: Color::Cyan,
                assistant_fg: Color::White,
                text: Color::White,
                muted: Color::DarkGray,
                border: Color::Gray,
                selection_bg: Color::DarkGray,
                success: Color::Green,
                error: Color::LightRed,
            },
        }
    }

    pub fn role_fg(&self, role: Role) -> Color {
        match role {
            Role::User => self.user_fg,
            Role::Assistant => self.assistant_fg,
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.border).add_modifier(Modifier::DIM)
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lavender_uses_brand_accent() {
        let palette = Palette::for_theme(Theme::Lavender);
        assert_eq!(palette.accent, Color::Rgb(0x9b, 0x87, 0xf5));
        assert_eq!(palette.role_fg(Role::User), palette.accent);
    }

    #[test]
    fn themes_differ() {
        assert_ne!(Palette::for_theme(Theme::Lavender), Palette::for_theme(Theme::Slate));
    }
}
