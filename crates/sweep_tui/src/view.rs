//! Top-level draw: demo screen or runtime logs, per [Screen].

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use sweep_core::Clock;

use crate::layouts::{
    HEADER_TITLE, ProgressTrack, background_style, border_style, render_header, shortcut_line,
    text_muted_style, text_style,
};
use crate::state::{DemoState, Screen};
use crate::utils::{horizontal_padding, truncate_ellipsis, vertical_center};

pub fn draw<C: Clock>(frame: &mut Frame, state: &mut DemoState<C>, area: Rect) {
    frame.render_widget(
        Block::default().style(background_style(state.palette.background)),
        area,
    );
    match state.screen {
        Screen::Main => draw_main(frame, state, area),
        Screen::DebugTraces => draw_debug_traces(frame, state, area),
    }
}

/// Header, track strip, status line, event log, shortcut footer.
fn draw_main<C: Clock>(frame: &mut Frame, state: &DemoState<C>, area: Rect) {
    let [header, track, status, log, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);
    let palette = &state.palette;

    render_header(frame, header, palette, HEADER_TITLE, state.indicator.phase());

    let track_row = vertical_center(horizontal_padding(track), 1);
    frame.render_widget(ProgressTrack::new(state.indicator.frame(), palette), track_row);

    frame.render_widget(
        Paragraph::new(status_line(state, status.width)),
        horizontal_padding(status),
    );

    let block = Block::default()
        .title(" Transitions ")
        .borders(Borders::TOP)
        .border_style(border_style(palette.border));
    let inner = horizontal_padding(block.inner(log));
    frame.render_widget(block, log);
    let visible = inner.height as usize;
    let lines: Vec<Line> = state
        .event_lines
        .iter()
        .skip(state.event_lines.len().saturating_sub(visible))
        .map(|l| Line::from(Span::styled(l.clone(), text_style(palette.text))))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);

    frame.render_widget(
        Paragraph::new(shortcut_line(palette, state.screen)),
        horizontal_padding(footer),
    );
}

/// "signal on · downloads 1 · loops 3 · lead 12.0 width 40.5 opacity 1.00"
fn status_line<C: Clock>(state: &DemoState<C>, width: u16) -> Line<'static> {
    let mut text = format!(
        "signal {} · downloads {} · loops {}",
        if state.signal() { "on" } else { "off" },
        state.downloads.active_count(),
        state.indicator.loops_started(),
    );
    if let Some(f) = state.indicator.frame() {
        text.push_str(&format!(
            " · lead {:.1} width {:.1} opacity {:.2}",
            f.lead_edge, f.trail_width, f.opacity
        ));
    }
    Line::from(Span::styled(
        truncate_ellipsis(&text, width as usize),
        text_muted_style(state.palette.text_muted),
    ))
}

fn draw_debug_traces<C: Clock>(frame: &mut Frame, state: &mut DemoState<C>, area: Rect) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    let palette = &state.palette;
    let block = Block::default()
        .title(" Runtime logs (Ctrl+D to close) ")
        .borders(Borders::ALL)
        .border_style(border_style(palette.border))
        .style(background_style(palette.background));
    let inner = block.inner(body);
    frame.render_widget(block, body);

    let viewport_height = inner.height as usize;
    let max_scroll = state.trace_lines.len().saturating_sub(viewport_height);
    state.trace_scroll = state.trace_scroll.min(max_scroll);
    let offset = max_scroll - state.trace_scroll;

    let lines: Vec<Line> = state
        .trace_lines
        .iter()
        .skip(offset)
        .take(viewport_height)
        .map(|s| Line::from(Span::styled(s.clone(), text_muted_style(palette.text_muted))))
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    frame.render_widget(
        Paragraph::new(shortcut_line(palette, state.screen)),
        horizontal_padding(footer),
    );
}
