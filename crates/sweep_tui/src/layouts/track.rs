//! Progress track widget: one rounded row, muted track with the accent segment on top.
//!
//! Geometry comes from a [Frame](sweep_core::Frame) in track percentages; colours blend from
//! the background toward their target by the frame's opacity. A `None` frame draws nothing.

use std::ops::Range;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use sweep_core::timeline::{TRACK_EPSILON, TRACK_MAX};
use sweep_core::Frame;

use super::style::rgb_to_color;
use crate::theme::SweepPalette;

const CAP_LEFT: &str = "╺";
const BODY: &str = "━";
const CAP_RIGHT: &str = "╸";

/// Columns of a `cols`-wide track covered by a segment at `lead_edge` with `trail_width`.
///
/// Any visible width covers at least one column.
pub fn segment_columns(lead_edge: f64, trail_width: f64, cols: u16) -> Range<u16> {
    if cols == 0 || trail_width <= TRACK_EPSILON {
        return 0..0;
    }
    let scale = cols as f64 / TRACK_MAX;
    let start = ((lead_edge.max(0.0) * scale).floor() as u16).min(cols - 1);
    let end = (((lead_edge + trail_width) * scale).ceil() as u16).clamp(start + 1, cols);
    start..end
}

fn glyph(x: u16, cols: u16) -> &'static str {
    match x {
        _ if cols == 1 => BODY,
        0 => CAP_LEFT,
        x if x == cols - 1 => CAP_RIGHT,
        _ => BODY,
    }
}

pub struct ProgressTrack<'a> {
    frame: Option<Frame>,
    palette: &'a SweepPalette,
}

impl<'a> ProgressTrack<'a> {
    pub fn new(frame: Option<Frame>, palette: &'a SweepPalette) -> Self {
        Self { frame, palette }
    }
}

impl Widget for ProgressTrack<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(frame) = self.frame else {
            return;
        };
        if area.is_empty() {
            return;
        }
        let cols = area.width;
        let segment = segment_columns(frame.lead_edge, frame.trail_width, cols);
        let bg = self.palette.background;
        let track = rgb_to_color(bg.lerp(self.palette.track, frame.opacity));
        let accent = rgb_to_color(bg.lerp(self.palette.accent, frame.opacity));

        for x in 0..cols {
            let color = if segment.contains(&x) { accent } else { track };
            if let Some(cell) = buf.cell_mut((area.x + x, area.y)) {
                cell.set_symbol(glyph(x, cols)).set_fg(color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_width_covers_nothing() {
        assert_eq!(segment_columns(40.0, 0.0, 50), 0..0);
        assert_eq!(segment_columns(40.0, 10.0, 0), 0..0);
    }

    #[test]
    fn full_track() {
        assert_eq!(segment_columns(0.0, 100.0, 40), 0..40);
    }

    #[test]
    fn partial_segment_rounds_outward() {
        // 25.5%..50.5% of 10 columns touches columns 2..6.
        assert_eq!(segment_columns(25.5, 25.0, 10), 2..6);
    }

    #[test]
    fn thin_segment_gets_one_column() {
        assert_eq!(segment_columns(50.0, 0.01, 20), 10..11);
        assert_eq!(segment_columns(100.0, 0.01, 20), 19..20);
    }

    #[test]
    fn caps_are_rounded() {
        assert_eq!(glyph(0, 5), CAP_LEFT);
        assert_eq!(glyph(2, 5), BODY);
        assert_eq!(glyph(4, 5), CAP_RIGHT);
        assert_eq!(glyph(0, 1), BODY);
    }
}
