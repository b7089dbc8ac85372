//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand, ValueEnum};
use sweep_core::{ExitStrategy, ToggleScript};
use sweep_tui::theme::Appearance;

/// Animated indeterminate progress indicator: interactive demo and headless playback
#[derive(Parser)]
#[command(name = "sweep", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the interactive demo (space: toggle, d: download, r: rapid burst, q: quit)
    Tui {
        /// Toggle script played alongside the keys, e.g. "on:2000,off:1500"
        #[arg(long)]
        script: Option<ToggleScript>,
        /// Finishing transition: sweep or fade. Uses SWEEP_EXIT_STRATEGY if not set.
        #[arg(long)]
        exit_strategy: Option<ExitStrategy>,
        /// Theme appearance: dark or light
        #[arg(long, default_value = "dark")]
        appearance: Appearance,
    },
    /// Play a toggle script against a manual clock and print every frame
    Simulate {
        /// Toggle script, e.g. "on:2000,off:1500"
        #[arg(long)]
        script: ToggleScript,
        /// Frames sampled per second
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Width of the text-mode bar in columns
        #[arg(long, default_value_t = 40)]
        width: u16,
        /// Finishing transition: sweep or fade. Uses SWEEP_EXIT_STRATEGY if not set.
        #[arg(long)]
        exit_strategy: Option<ExitStrategy>,
    },
    /// Print the effective indicator configuration
    Config {
        /// Finishing transition override, as accepted by the other commands
        #[arg(long)]
        exit_strategy: Option<ExitStrategy>,
    },
}
