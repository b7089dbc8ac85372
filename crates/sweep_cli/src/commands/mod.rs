//! Command dispatch.

pub mod config;
pub mod simulate;
pub mod tui;

use anyhow::{Context, Result};
use sweep_core::{ExitStrategy, IndicatorConfig};
use sweep_observability::ObservabilityConfig;

use crate::cli::{Cli, Command};
use crate::output;

pub fn handle(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Tui {
            script,
            exit_strategy,
            appearance,
        } => tui::handle(script, exit_strategy, appearance),
        Command::Simulate {
            script,
            fps,
            width,
            exit_strategy,
        } => {
            init_console_logging(cli.verbose);
            simulate::handle(&script, fps, width, exit_strategy)
        }
        Command::Config { exit_strategy } => {
            init_console_logging(cli.verbose);
            config::handle(exit_strategy)
        }
    }
}

/// Indicator config from `SWEEP_*` env vars, with the command-line override applied.
pub fn indicator_config(exit_strategy: Option<ExitStrategy>) -> Result<IndicatorConfig> {
    let mut config =
        IndicatorConfig::from_env().context("Invalid indicator configuration in environment")?;
    if let Some(strategy) = exit_strategy {
        config = config.with_exit_strategy(strategy);
    }
    config.validate()?;
    Ok(config)
}

/// `--verbose`: debug logs on stderr unless SWEEP_LOG / RUST_LOG says otherwise.
fn init_console_logging(verbose: bool) {
    if !verbose {
        return;
    }
    let mut obs_config = ObservabilityConfig::from_env().with_console(true);
    if obs_config.log_level.is_none() {
        obs_config = obs_config.with_log_level("debug");
    }
    if let Err(e) = sweep_observability::init(obs_config) {
        output::warning(&format!("Logging init failed (continuing): {e}"));
    }
}
