//! TUI color theme

use ratatui::style::Color;

/// Colors used across the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
    pub success: Color,
    pub error: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            text: Color::Gray,
            dim: Color::DarkGray,
            success: Color::Green,
            error: Color::Red,
            border: Color::DarkGray,
        }
    }
}
