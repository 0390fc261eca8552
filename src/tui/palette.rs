//! Theme hex strings turned into ratatui styles.
//!
//! A `Palette` is rebuilt from `session.theme` on every frame, so applying a
//! theme takes effect on the next draw with nothing to invalidate.

use ratatui::style::{Color, Modifier, Style};

use crate::core::theme::Theme;

const WHITE: Color = Color::Rgb(0xFF, 0xFF, 0xFF);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub text: Color,
    pub muted: Color,
    pub background: Color,
    pub background_alt: Color,
}

/// Parse `#RRGGBB`. Anything else falls back to the terminal default.
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Color::Reset;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Reset,
    }
}

impl From<&Theme> for Palette {
    fn from(theme: &Theme) -> Self {
        Self {
            primary: hex_color(theme.primary),
            secondary: hex_color(theme.secondary),
            accent: hex_color(theme.accent),
            success: hex_color(theme.success),
            warning: hex_color(theme.warning),
            error: hex_color(theme.error),
            text: hex_color(theme.text),
            muted: hex_color(theme.muted),
            background: hex_color(theme.background),
            background_alt: hex_color(theme.background_alt),
        }
    }
}

impl Palette {
    pub fn title(&self) -> Style {
        Style::default()
            .fg(WHITE)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.text).bg(self.background_alt)
    }

    pub fn status_message(&self) -> Style {
        Style::default()
            .fg(self.muted)
            .bg(self.background_alt)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn help(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn selected_item(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn normal_item(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn description(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Border of the list and viewer panels.
    pub fn panel_border(&self) -> Style {
        Style::default().fg(self.primary)
    }

    /// Border of a panel that has focus (help overlay).
    pub fn active_border(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn editor_border(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn active_button(&self) -> Style {
        Style::default()
            .fg(WHITE)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn inactive_button(&self) -> Style {
        Style::default().fg(self.muted).bg(self.background_alt)
    }

    /// Inline `#tag` highlight in rendered markdown.
    pub fn tag(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::{THEMES, default_theme};

    #[test]
    fn test_parses_hex_colours() {
        assert_eq!(hex_color("#7C3AED"), Color::Rgb(0x7C, 0x3A, 0xED));
        assert_eq!(hex_color("ffffff"), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_malformed_hex_falls_back_to_reset() {
        assert_eq!(hex_color("#12345"), Color::Reset);
        assert_eq!(hex_color("#GGGGGG"), Color::Reset);
        assert_eq!(hex_color(""), Color::Reset);
        assert_eq!(hex_color("#ééé"), Color::Reset);
    }

    #[test]
    fn test_default_palette_matches_default_theme() {
        let palette = Palette::from(&default_theme());
        assert_eq!(palette.primary, Color::Rgb(0x7C, 0x3A, 0xED));
        assert_eq!(palette.title().bg, Some(palette.primary));
    }

    #[test]
    fn test_every_builtin_theme_has_parseable_colours() {
        for theme in THEMES {
            let palette = Palette::from(theme);
            for color in [palette.primary, palette.text, palette.muted, palette.background_alt] {
                assert!(matches!(color, Color::Rgb(..)), "{} has a bad colour", theme.key);
            }
        }
    }
}
