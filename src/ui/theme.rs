//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── rows ───────────────────────────────────────────────────
    pub fn leaf_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn node_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    /// The "create this label" row offered by non-exclusive search.
    pub fn synthetic_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn empty_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── header ─────────────────────────────────────────────────
    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::BOLD)
    }

    pub fn close_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn input_style(focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::White).bg(Color::Black)
        } else {
            Style::default().fg(Color::Gray).bg(Color::Black)
        }
    }

    pub fn placeholder_style() -> Style {
        Style::default().fg(Color::DarkGray).bg(Color::Black)
    }

    pub fn cursor_style() -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    pub fn button_style(enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightBlue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    pub fn breadcrumb_style() -> Style {
        Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::UNDERLINED)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn separator_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
