use crate::calendar::store::EventColor;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const ACCENT_TEAL: Color = Color::Cyan;
    pub const ACCENT_AMBER: Color = Color::Yellow;
    pub const ACCENT_GREEN: Color = Color::Green;
    pub const TEXT_PRIMARY: Color = Color::White;
    pub const TEXT_SECONDARY: Color = Color::Gray;
    pub const BORDER_DIM: Color = Color::DarkGray;

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT_TEAL)
    }

    pub fn border_type() -> BorderType {
        BorderType::Rounded
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }

    pub fn today() -> Style {
        Style::default()
            .fg(Self::ACCENT_AMBER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_day() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_row() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Self::ACCENT_TEAL)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Color::DarkGray)
    }

    pub fn help_key() -> Style {
        Style::default()
            .fg(Self::ACCENT_AMBER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn help_text() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    /// Terminal color for an event palette entry.
    pub fn event_color(color: EventColor) -> Color {
        match color {
            EventColor::Green => Color::Green,
            EventColor::Blue => Color::Blue,
            EventColor::Red => Color::Red,
            EventColor::Orange => Color::Indexed(208),
            EventColor::Purple => Color::Magenta,
        }
    }
}
