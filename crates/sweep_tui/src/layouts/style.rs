//! Map theme palette to ratatui styles.
//!
//! All colours come from [SweepPalette](crate::theme::SweepPalette); use these helpers so
//! chrome stays consistent with the theme.

use ratatui::style::{Color, Style};

use crate::theme::Rgb;

/// Convert theme [Rgb] to ratatui [Color].
#[inline]
pub fn rgb_to_color(rgb: Rgb) -> Color {
    let (r, g, b) = rgb.tuple();
    Color::Rgb(r, g, b)
}

/// Style for panel borders (border color, no fill).
pub fn border_style(border_rgb: Rgb) -> Style {
    Style::default().fg(rgb_to_color(border_rgb))
}

/// Style for panel background only.
pub fn background_style(bg_rgb: Rgb) -> Style {
    Style::default().bg(rgb_to_color(bg_rgb))
}

pub fn text_style(text_rgb: Rgb) -> Style {
    Style::default().fg(rgb_to_color(text_rgb))
}

pub fn text_muted_style(text_muted_rgb: Rgb) -> Style {
    Style::default().fg(rgb_to_color(text_muted_rgb))
}
