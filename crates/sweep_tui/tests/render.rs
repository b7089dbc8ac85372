//! Rendering through ratatui's TestBackend.

use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use sweep_core::{Frame, IndicatorConfig, ManualClock, Phase};
use sweep_tui::layouts::rgb_to_color;
use sweep_tui::theme::SweepPalette;
use sweep_tui::{DemoState, ProgressTrack, draw_view};

const WIDTH: u16 = 44;
const HEIGHT: u16 = 14;
/// Header is two rows; the three-row track strip centres the bar on its middle row.
const TRACK_ROW: u16 = 3;
const TRACK_X: u16 = 2;
const TRACK_COLS: u16 = WIDTH - 4;

fn render(state: &mut DemoState<ManualClock>) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal
        .draw(|f| draw_view(f, state, f.area()))
        .unwrap();
    terminal.backend().buffer().clone()
}

fn track_symbols(buf: &Buffer) -> String {
    (TRACK_X..TRACK_X + TRACK_COLS)
        .map(|x| buf[(x, TRACK_ROW)].symbol().to_string())
        .collect()
}

fn row_text(buf: &Buffer, y: u16) -> String {
    (0..WIDTH).map(|x| buf[(x, y)].symbol().to_string()).collect()
}

#[test]
fn hidden_indicator_draws_no_track() {
    let mut state = DemoState::with_clock(IndicatorConfig::default(), ManualClock::new());
    let buf = render(&mut state);
    assert_eq!(track_symbols(&buf).trim(), "");
    assert!(row_text(&buf, 0).contains("hidden"));
}

#[test]
fn looping_indicator_draws_rounded_track_with_segment() {
    let clock = ManualClock::new();
    let mut state = DemoState::with_clock(IndicatorConfig::default(), clock.clone());
    state.toggle();
    // Halfway through the slide phase: the right half of the track is lit.
    clock.advance(Duration::from_millis(1425));
    state.update();
    assert_eq!(state.indicator.phase(), Phase::Looping);

    let buf = render(&mut state);
    let symbols = track_symbols(&buf);
    assert!(symbols.starts_with('╺'));
    assert!(symbols.ends_with('╸'));

    let accent = rgb_to_color(state.palette.accent);
    let track = rgb_to_color(state.palette.track);
    let colors: Vec<_> = (TRACK_X..TRACK_X + TRACK_COLS)
        .map(|x| buf[(x, TRACK_ROW)].fg)
        .collect();
    assert!(colors.contains(&accent));
    assert!(colors.contains(&track));
    assert!(row_text(&buf, 0).contains("looping"));
}

#[test]
fn widget_blends_by_opacity() {
    let palette = SweepPalette::sweep_dark();
    let frame = Frame {
        phase: Phase::Entering,
        lead_edge: 20.0,
        trail_width: 30.0,
        opacity: 0.5,
    };
    let area = Rect::new(0, 0, 10, 1);
    let mut buf = Buffer::empty(area);
    ProgressTrack::new(Some(frame), &palette).render(area, &mut buf);

    let half_accent = rgb_to_color(palette.background.lerp(palette.accent, 0.5));
    let half_track = rgb_to_color(palette.background.lerp(palette.track, 0.5));
    for x in 0..10 {
        let expected = if (2..5).contains(&x) { half_accent } else { half_track };
        assert_eq!(buf[(x, 0)].fg, expected, "column {x}");
    }
}

#[test]
fn none_frame_leaves_buffer_untouched() {
    let palette = SweepPalette::sweep_dark();
    let area = Rect::new(0, 0, 8, 1);
    let mut buf = Buffer::empty(area);
    ProgressTrack::new(None, &palette).render(area, &mut buf);
    assert_eq!(buf, Buffer::empty(area));
}

#[test]
fn logs_screen_shows_newest_lines() {
    let mut state = DemoState::with_clock(IndicatorConfig::default(), ManualClock::new());
    for i in 0..50 {
        state.push_trace_line(format!("[INFO] sweep.test: line {i}"));
    }
    state.toggle_screen();
    let buf = render(&mut state);
    let body: String = (0..HEIGHT).map(|y| row_text(&buf, y)).collect();
    assert!(body.contains("Runtime logs"));
    assert!(body.contains("line 49"));
    assert!(!body.contains("line 0 "));
}
