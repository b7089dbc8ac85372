//! Shared utilities for the sweep TUI.
//!
//! - **[constants]**: padding, frame pacing and log limits.
//! - **[layout]**: Rect padding and centring.
//! - **[format]**: durations and truncation for status lines.

mod constants;
mod format;
mod layout;

pub use constants::*;
pub use format::{format_duration, format_elapsed, truncate_ellipsis};
pub use layout::{horizontal_padding, horizontal_padding_with, vertical_center};
