//! TUI Theme
//!
//! Status colours follow the web client: green for a finished image, red for
//! any failure.

use ragimage_core::StatusTone;
use ratatui::style::{Color, Modifier, Style};

/// Primary accent color - soft cyan blue
pub const ACCENT: Color = Color::Rgb(100, 180, 220);

/// Spinner and in-flight hints
pub const HIGHLIGHT: Color = Color::Rgb(255, 200, 100);

/// Success status background (#27ae60)
pub const SUCCESS_BG: Color = Color::Rgb(39, 174, 96);

/// Error status background (#e74c3c)
pub const ERROR_BG: Color = Color::Rgb(231, 76, 60);

/// Muted text - for secondary information
pub const MUTED: Color = Color::Rgb(100, 100, 110);

/// Border color - subtle gray
pub const BORDER: Color = Color::Rgb(70, 75, 85);

pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn text() -> Style {
    Style::default().fg(Color::White)
}

/// Status line style for a given tone
pub fn status(tone: StatusTone) -> Style {
    match tone {
        StatusTone::Neutral => Style::default().fg(Color::White),
        StatusTone::Success => Style::default()
            .fg(Color::White)
            .bg(SUCCESS_BG)
            .add_modifier(Modifier::BOLD),
        StatusTone::Error => Style::default()
            .fg(Color::White)
            .bg(ERROR_BG)
            .add_modifier(Modifier::BOLD),
    }
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}

pub fn border_active() -> Style {
    Style::default().fg(ACCENT)
}

pub fn footer() -> Style {
    Style::default().fg(MUTED)
}

pub fn loading() -> Style {
    Style::default().fg(HIGHLIGHT)
}

pub fn placeholder() -> Style {
    Style::default().fg(MUTED).add_modifier(Modifier::ITALIC)
}

pub fn error_title() -> Style {
    Style::default().fg(ERROR_BG).add_modifier(Modifier::BOLD)
}

pub fn key_hint() -> Style {
    Style::default().fg(SUCCESS_BG)
}

pub fn key_destructive() -> Style {
    Style::default().fg(ERROR_BG)
}
