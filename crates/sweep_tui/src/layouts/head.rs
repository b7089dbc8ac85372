//! Header strip: title on the left, indicator phase with a coloured dot on the right.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use sweep_core::Phase;

use super::style::{background_style, border_style, rgb_to_color, text_muted_style, text_style};
use crate::theme::SweepPalette;
use crate::utils::horizontal_padding;

/// Title shown in the header.
pub const HEADER_TITLE: &str = "sweep";

fn phase_dot_style(phase: Phase, palette: &SweepPalette) -> Style {
    let rgb = match phase {
        Phase::Hidden => palette.text_muted,
        Phase::Entering => palette.info,
        Phase::Looping => palette.accent,
        Phase::Exiting => palette.warning,
    };
    Style::default().fg(rgb_to_color(rgb))
}

/// Title (bold) left, then right-aligned "● <phase>" padded to `width`.
pub fn header_line(title: &str, phase: Phase, palette: &SweepPalette, width: u16) -> Line<'static> {
    let right = phase.as_str();
    let left_len = title.chars().count() + 1;
    let right_len = 2 + right.len();
    let gap = (width as usize).saturating_sub(left_len + right_len);
    Line::from(vec![
        Span::styled(
            title.to_string(),
            text_style(palette.text).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(gap)),
        Span::styled("● ".to_string(), phase_dot_style(phase, palette)),
        Span::styled(right.to_string(), text_muted_style(palette.text_muted)),
    ])
}

/// Two-line header: content line, then a bottom border.
pub fn render_header(frame: &mut Frame, area: Rect, palette: &SweepPalette, title: &str, phase: Phase) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(border_style(palette.border))
        .style(background_style(palette.surface_background));
    let inner = horizontal_padding(block.inner(area));
    frame.render_widget(block, area);
    let line = header_line(title, phase, palette, inner.width);
    frame.render_widget(Paragraph::new(line), inner);
}
