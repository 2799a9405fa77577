//! TUI theming and colors.

use ratatui::style::{Color, Modifier, Style};

use crate::view::StatusKind;

/// Application theme.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Name of the theme.
    pub name: String,
    /// Foreground color.
    pub foreground: Color,
    /// Primary accent color (comment ids, prompts).
    pub primary: Color,
    /// Border color (unfocused).
    pub border: Color,
    /// Border color (focused).
    pub border_focused: Color,
    /// Cursor row background.
    pub selection: Color,
    /// Highlighted node after navigation.
    pub highlight: Color,
    /// Timestamps and other secondary text.
    pub muted: Color,
    /// Reply box text.
    pub reply: Color,
    /// Error color.
    pub error: Color,
    /// Progress color.
    pub progress: Color,
    /// Success color.
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create the default dark theme.
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            foreground: Color::White,
            primary: Color::Cyan,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            selection: Color::DarkGray,
            highlight: Color::Yellow,
            muted: Color::Gray,
            reply: Color::Green,
            error: Color::Red,
            progress: Color::Yellow,
            success: Color::Green,
        }
    }

    /// Create a light theme.
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            foreground: Color::Black,
            primary: Color::Blue,
            border: Color::Gray,
            border_focused: Color::Blue,
            selection: Color::LightBlue,
            highlight: Color::Magenta,
            muted: Color::DarkGray,
            reply: Color::Green,
            error: Color::Red,
            progress: Color::Magenta,
            success: Color::Green,
        }
    }

    /// Create a high contrast theme.
    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast".to_string(),
            foreground: Color::White,
            primary: Color::Yellow,
            border: Color::White,
            border_focused: Color::Yellow,
            selection: Color::Blue,
            highlight: Color::LightYellow,
            muted: Color::White,
            reply: Color::LightGreen,
            error: Color::LightRed,
            progress: Color::LightYellow,
            success: Color::LightGreen,
        }
    }

    /// Get theme by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            "high-contrast" | "highcontrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }

    /// Get style for borders.
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Get style for the cursor row.
    pub fn selection_style(&self) -> Style {
        Style::default().bg(self.selection).add_modifier(Modifier::BOLD)
    }

    /// Get style for the highlighted node.
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Get style for comment ids.
    pub fn id_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    /// Get style for secondary text.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Get style for reply boxes.
    pub fn reply_style(&self) -> Style {
        Style::default().fg(self.reply).add_modifier(Modifier::ITALIC)
    }

    /// Get style for placeholder text.
    pub fn placeholder_style(&self) -> Style {
        Style::default().fg(self.muted).add_modifier(Modifier::ITALIC)
    }

    /// Get style for a status message.
    pub fn status_style(&self, kind: StatusKind) -> Style {
        match kind {
            StatusKind::Progress => Style::default().fg(self.progress),
            StatusKind::Success => Style::default().fg(self.success),
            StatusKind::Failure(_) => Style::default().fg(self.error).add_modifier(Modifier::BOLD),
        }
    }
}

/// Available themes list.
pub fn available_themes() -> Vec<&'static str> {
    vec!["dark", "light", "high-contrast"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("LIGHT").map(|t| t.name), Some("light".to_string()));
        assert_eq!(
            Theme::from_name("highcontrast").map(|t| t.name),
            Some("high-contrast".to_string())
        );
        assert!(Theme::from_name("neon").is_none());
    }

    #[test]
    fn test_every_listed_theme_resolves() {
        for name in available_themes() {
            assert!(Theme::from_name(name).is_some(), "{name}");
        }
    }
}
