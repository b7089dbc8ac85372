//! CLI entry point for sweep.

mod cli;
mod commands;
mod output;

use clap::Parser;

use crate::cli::Cli;

/// Load `.env` from the working directory or the nearest parent that has one.
fn load_env_file() {
    let Ok(mut dir) = std::env::current_dir() else {
        return;
    };
    for _ in 0..32 {
        let env_file = dir.join(".env");
        if env_file.exists() {
            let _ = dotenvy::from_path(&env_file);
            return;
        }
        if !dir.pop() {
            return;
        }
    }
}

fn main() {
    load_env_file();
    let cli = Cli::parse();
    output::init(cli.output);

    if let Err(e) = commands::handle(cli) {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
