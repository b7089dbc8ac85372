//! `sweep tui`: interactive demo with runtime logs on Ctrl+D.

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{Result, bail};
use sweep_core::{ExitStrategy, ToggleScript};
use sweep_observability::{LogSink, ObservabilityConfig, init};
use sweep_tui::DemoState;
use sweep_tui::theme::Appearance;
use tokio::sync::mpsc;

use crate::output;

pub fn handle(
    script: Option<ToggleScript>,
    exit_strategy: Option<ExitStrategy>,
    appearance: Appearance,
) -> Result<()> {
    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        bail!("`sweep tui` needs an interactive terminal (TTY); use `sweep simulate` for headless runs");
    }
    let config = super::indicator_config(exit_strategy)?;

    // Runtime logs → logs screen (Ctrl+D)
    let (log_tx, log_rx) = mpsc::channel::<String>(512);
    let log_sink: LogSink = Arc::new(move |line| {
        let _ = log_tx.try_send(line);
    });
    let mut obs_config = ObservabilityConfig::from_env()
        .with_console(false)
        .with_log_sink(log_sink);
    if obs_config.log_level.is_none() {
        obs_config = obs_config.with_log_level("info,sweep=debug");
    }
    if let Err(e) = init(obs_config) {
        output::warning(&format!("Observability init failed (continuing): {e}"));
    }

    let mut state = DemoState::new(config).with_appearance(appearance);
    if let Some(script) = script {
        state = state.with_script(script);
    }
    sweep_tui::run_tui(state, Some(log_rx))
}
