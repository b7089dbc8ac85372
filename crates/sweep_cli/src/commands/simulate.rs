//! `sweep simulate`: headless playback of a toggle script on a manual clock.

use std::time::Duration;

use anyhow::{Result, bail};
use console::style;
use serde::Serialize;
use sweep_core::simulation::Sample;
use sweep_core::{ExitStrategy, Frame, IndicatorEvent, Simulation, SimulationReport, ToggleScript};
use sweep_tui::segment_columns;
use sweep_tui::utils::{format_duration, format_elapsed};

use crate::output;

const SEGMENT: char = '━';
const TRACK: char = '─';

#[derive(Serialize)]
struct Summary {
    loops_started: u64,
    #[serde(rename = "hidden_at_ms")]
    hidden_at: Option<u128>,
    max_trail_edge: f64,
    within_track: bool,
    active_animations: usize,
    samples: usize,
}

pub fn handle(
    script: &ToggleScript,
    fps: u32,
    width: u16,
    exit_strategy: Option<ExitStrategy>,
) -> Result<()> {
    if fps == 0 {
        bail!("--fps must be at least 1");
    }
    if width < 2 {
        bail!("--width must be at least 2 columns");
    }
    let config = super::indicator_config(exit_strategy)?;
    let interval = Duration::from_secs_f64(1.0 / fps as f64);
    tracing::debug!(
        target: "sweep.cli",
        steps = script.steps().len(),
        fps,
        strategy = %config.exit_strategy,
        "simulating"
    );
    let report = Simulation::new(config)
        .with_frame_interval(interval)
        .run(script);

    output::header(&format!(
        "Simulating {} over {} at {} fps",
        describe_script(script),
        format_duration(script.total_duration()),
        fps
    ));
    for sample in &report.samples {
        output::line(&sample_line(sample, width), "frame", sample);
    }
    print_events(&report);
    print_summary(&report);
    Ok(())
}

fn describe_script(script: &ToggleScript) -> String {
    script
        .steps()
        .iter()
        .map(|s| {
            format!(
                "{}:{}",
                if s.should_show { "on" } else { "off" },
                s.hold.as_millis()
            )
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Text bar for one frame: segment `━`, rest of the track `─`, blank when hidden.
fn render_bar(frame: Option<Frame>, width: u16) -> String {
    let Some(frame) = frame else {
        return " ".repeat(width as usize);
    };
    let segment = segment_columns(frame.lead_edge, frame.trail_width, width);
    (0..width)
        .map(|x| if segment.contains(&x) { SEGMENT } else { TRACK })
        .collect()
}

fn sample_line(sample: &Sample, width: u16) -> String {
    let signal = if sample.should_show { "on " } else { "off" };
    let bar = render_bar(sample.frame, width);
    match sample.frame {
        Some(f) => format!(
            "{} {} │{}│ {:<8} lead {:>5.1} width {:>5.1} opacity {:.2}",
            format_elapsed(sample.at),
            signal,
            bar,
            f.phase.as_str(),
            f.lead_edge,
            f.trail_width,
            f.opacity
        ),
        None => format!(
            "{} {} │{}│ {}",
            format_elapsed(sample.at),
            signal,
            bar,
            style("hidden").dim()
        ),
    }
}

fn describe(event: &IndicatorEvent) -> String {
    match event {
        IndicatorEvent::Shown => "shown".to_string(),
        IndicatorEvent::LoopStarted { iteration } => format!("loop #{iteration} started"),
        IndicatorEvent::ExitStarted => "exit started".to_string(),
        IndicatorEvent::ExitCancelled => "exit cancelled (re-entering)".to_string(),
        IndicatorEvent::Hidden => "hidden".to_string(),
    }
}

fn print_events(report: &SimulationReport) {
    output::header("Transitions");
    let mut table = output::table();
    output::table_header(&mut table, "At", "Event");
    let items: Vec<(String, String)> = report
        .events
        .iter()
        .map(|e| (format_duration(e.at), describe(&e.event)))
        .collect();
    for (at, event) in &items {
        output::table_row(&mut table, at, event);
    }
    output::table_print(&table, &items);
}

fn print_summary(report: &SimulationReport) {
    let summary = Summary {
        loops_started: report.loops_started,
        hidden_at: report.hidden_at().map(|d| d.as_millis()),
        max_trail_edge: report.max_trail_edge,
        within_track: report.within_track(),
        active_animations: report.active_animations,
        samples: report.samples.len(),
    };
    if output::is_json() {
        output::data("summary", &summary);
        return;
    }

    output::header("Summary");
    output::kv("loops started", &summary.loops_started.to_string());
    output::kv("max trail edge", &format!("{:.2}", summary.max_trail_edge));
    output::kv("samples", &summary.samples.to_string());
    match (report.final_frame(), report.hidden_at()) {
        (None, Some(at)) => output::success(&format!("Hidden at {}", format_duration(at))),
        (None, None) => output::success("Never shown"),
        (Some(frame), _) => output::warning(&format!(
            "Still {} when playback stopped ({} animations running)",
            frame.phase, summary.active_animations
        )),
    }
    if !summary.within_track {
        output::warning("Segment left the track bounds");
    }
}

#[cfg(test)]
mod tests {
    use sweep_core::Phase;

    use super::*;

    #[test]
    fn hidden_bar_is_blank() {
        assert_eq!(render_bar(None, 4), "    ");
    }

    #[test]
    fn bar_marks_segment_columns() {
        let frame = Frame {
            phase: Phase::Looping,
            lead_edge: 50.0,
            trail_width: 25.0,
            opacity: 1.0,
        };
        assert_eq!(render_bar(Some(frame), 8), "────━━──");
    }

    #[test]
    fn script_is_described_compactly() {
        let script: ToggleScript = "on:2000,off:1500".parse().unwrap();
        assert_eq!(describe_script(&script), "on:2000,off:1500");
    }
}
