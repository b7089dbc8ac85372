//! sweep-core: headless animated progress indicator.
//!
//! [ProgressIndicator] is driven by one boolean (`should_show`) and a [Clock];
//! the renderer only ever reads [Frame]s. Timing lives in [config], curves in
//! [easing], animated values in [timeline], frame stepping in [driver].
//! [signal] and [simulation] produce the signal for demos and tests.

pub mod clock;
pub mod config;
pub mod driver;
pub mod easing;
pub mod error;
pub mod indicator;
pub mod signal;
pub mod simulation;
pub mod timeline;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ExitStrategy, IndicatorConfig};
pub use driver::{Animation, AnimationDriver, AnimationId, Completion};
pub use easing::{CubicBezier, Easing};
pub use error::{ConfigError, ScriptError};
pub use indicator::{Frame, IndicatorEvent, Phase, ProgressIndicator};
pub use signal::{DownloadTracker, ToggleScript, ToggleStep, attachment_id};
pub use simulation::{Simulation, SimulationReport};
pub use timeline::{TRACK_MAX, TimelineValues};
