//! Tracing subscriber initialization.
//!
//! Composes an env filter, an optional stderr fmt layer and the optional log-sink
//! layer into one registry and installs it as the global default.

use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;
use crate::error::ObservabilityError;
use crate::tui_log_layer;

const DEFAULT_FILTER: &str = "info";

/// Initialize tracing with the given configuration
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the filter is invalid or a global
/// subscriber is already installed
pub fn init(config: ObservabilityConfig) -> Result<(), ObservabilityError> {
    let env_filter = build_filter(config.log_level.as_deref())?;

    // Build layers first (build separately, then compose once to avoid type mismatch)
    let fmt_layer = config
        .enable_console
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    // Optional TUI log sink (runtime logs screen)
    let tui_layer = tui_log_layer::tui_log_layer(config.log_sink.clone());

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .with(tui_layer)
        .try_init()
        .map_err(|e| ObservabilityError::InitFailed(e.to_string()))?;

    tracing::info!(
        service.name = %config.service_name,
        console = config.enable_console,
        "Tracing initialized"
    );
    Ok(())
}

/// Filter from an explicit level, else `RUST_LOG`, else "info".
pub fn build_filter(level: Option<&str>) -> Result<EnvFilter, ObservabilityError> {
    match level {
        Some(level) => EnvFilter::try_new(level).map_err(|e| ObservabilityError::InvalidFilter {
            filter: level.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_is_parsed() {
        assert!(build_filter(Some("info,sweep.indicator=debug")).is_ok());
    }

    #[test]
    fn bad_filter_is_reported() {
        let err = build_filter(Some("sweep=loud")).unwrap_err();
        assert!(matches!(err, ObservabilityError::InvalidFilter { .. }));
    }
}
