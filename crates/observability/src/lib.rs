//! Sweep Observability - tracing setup shared by the sweep binaries
//!
//! Installs one global subscriber made of an env filter, an optional stderr fmt
//! layer and an optional log sink that receives every formatted line (the TUI
//! uses it for its logs screen).
//!
//! # Quick Start
//!
//! ```no_run
//! use sweep_observability::{ObservabilityConfig, init};
//!
//! let config = ObservabilityConfig::new("sweep")
//!     .with_console(false)
//!     .with_log_level("info,sweep.indicator=debug");
//!
//! init(config)?;
//!
//! tracing::info!("ready");
//! # Ok::<(), sweep_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `SWEEP_SERVICE_NAME` - Service name on the startup event
//! - `SWEEP_LOG` or `RUST_LOG` - Log level filter

pub mod config;
pub mod error;
pub mod telemetry;
mod tui_log_layer;

pub use config::{LogSink, ObservabilityConfig};
pub use error::ObservabilityError;
pub use telemetry::{build_filter, init};
