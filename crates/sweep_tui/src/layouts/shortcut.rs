//! Shortcut hint line for the footer, per screen.

use ratatui::text::{Line, Span};

use super::style::text_muted_style;
use crate::state::Screen;
use crate::theme::SweepPalette;

pub fn shortcut_line(palette: &SweepPalette, screen: Screen) -> Line<'static> {
    let hint = match screen {
        Screen::Main => "space: toggle  ·  d: download  ·  r: rapid burst  ·  Ctrl+D: logs  ·  q: quit",
        Screen::DebugTraces => "↑↓ PgUp PgDn: scroll  ·  Esc/Ctrl+D: back  ·  q: quit",
    };
    Line::from(vec![Span::styled(
        hint.to_string(),
        text_muted_style(palette.text_muted),
    )])
}
