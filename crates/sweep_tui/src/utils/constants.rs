//! TUI spacing, pacing and sizing constants.

use std::time::Duration;

/// Horizontal padding in characters (each side).
pub const HORIZONTAL_PADDING: u16 = 2;

/// Target time between frames while the indicator is visible (~60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Sleep between loop iterations while idle.
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Max runtime log lines to keep (older lines dropped).
pub const MAX_TRACE_LINES: usize = 2000;

/// Max transition lines kept in the event log panel.
pub const MAX_EVENT_LINES: usize = 200;

/// How long a simulated attachment download stays active.
pub const DOWNLOAD_DURATION: Duration = Duration::from_millis(2500);

/// Gap between the steps of the rapid on/off/on burst.
pub const BURST_STEP: Duration = Duration::from_millis(80);
