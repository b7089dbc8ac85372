//! `sweep config`: effective indicator configuration.

use anyhow::Result;
use sweep_core::ExitStrategy;
use sweep_tui::utils::format_duration;

use crate::output;

pub fn handle(exit_strategy: Option<ExitStrategy>) -> Result<()> {
    let config = super::indicator_config(exit_strategy)?;
    if output::is_json() {
        output::data("config", &config);
        return Ok(());
    }

    output::header("Indicator configuration");
    let rows = [
        ("exit_strategy", config.exit_strategy.to_string()),
        ("easing", config.easing.to_string()),
        ("entry_fade", format_duration(config.entry_fade)),
        ("loop_delay", format_duration(config.loop_delay)),
        ("sweep_phase", format_duration(config.sweep_phase)),
        ("sweep_period", format_duration(config.sweep_period())),
        ("exit_sweep", format_duration(config.exit_sweep)),
        ("exit_fade", format_duration(config.exit_fade)),
        ("exit_duration", format_duration(config.exit_duration())),
    ];
    let mut table = output::table();
    output::table_header(&mut table, "Setting", "Value");
    for (name, value) in &rows {
        output::table_row(&mut table, name, value);
    }
    let items: Vec<(String, String)> = rows
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();
    output::table_print(&table, &items);
    Ok(())
}
