//! Layout helpers for Rects.

use ratatui::layout::Rect;

use crate::utils::constants::HORIZONTAL_PADDING;

/// Apply horizontal padding to a Rect (symmetric left/right).
#[inline]
pub fn horizontal_padding(area: Rect) -> Rect {
    horizontal_padding_with(area, HORIZONTAL_PADDING)
}

/// Apply horizontal padding with a custom amount.
#[inline]
pub fn horizontal_padding_with(area: Rect, pad: u16) -> Rect {
    Rect {
        x: area.x.saturating_add(pad),
        y: area.y,
        width: area.width.saturating_sub(pad.saturating_mul(2)),
        height: area.height,
    }
}

/// A `height`-row strip vertically centred in `area` (clamped to `area`).
pub fn vertical_center(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let top = (area.height - height) / 2;
    Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height,
    }
}
