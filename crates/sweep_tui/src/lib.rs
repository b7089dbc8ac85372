//! sweep-tui: terminal renderer for the sweep progress indicator.
//!
//! Theming in [theme]; the track widget and chrome in [layouts]; state and view in
//! [state] and [view]. Run with [run_tui].

pub mod layouts;
pub mod run;
pub mod state;
pub mod theme;
pub mod utils;
pub mod view;

pub use layouts::{ProgressTrack, segment_columns};
pub use run::{KeyOutcome, handle_key, run_tui};
pub use state::{DemoState, Screen};
pub use view::draw as draw_view;
