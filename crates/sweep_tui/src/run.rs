//! TUI run loop: terminal setup, key handling, draw.
//!
//! Key events are read on a dedicated thread and forwarded over a channel, so the
//! main loop keeps ticking the indicator at frame rate while no key is pressed.

use std::io;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use sweep_core::Clock;
use tokio::sync::mpsc as tokio_mpsc;

use crate::state::{DemoState, Screen};
use crate::utils::{FRAME_INTERVAL, IDLE_POLL_INTERVAL};
use crate::view;

/// What the loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Run the demo: alternate screen, raw mode, event loop.
/// If `log_rx` is provided, runtime log lines (tracing) are pushed to the logs screen (Ctrl+D).
pub fn run_tui<C: Clock>(
    mut state: DemoState<C>,
    log_rx: Option<tokio_mpsc::Receiver<String>>,
) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    state.push_trace_line("[log] TUI started. Ctrl+D toggles this screen.".to_string());
    let result = run_loop(&mut terminal, &mut state, log_rx);

    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    disable_raw_mode()?;

    tracing::info!(
        target: "sweep.tui",
        loops = state.indicator.loops_started(),
        "TUI closed"
    );
    result
}

fn run_loop<C: Clock>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut DemoState<C>,
    mut log_rx: Option<tokio_mpsc::Receiver<String>>,
) -> anyhow::Result<()> {
    let (key_tx, key_rx) = mpsc::channel();
    let _reader = std::thread::spawn(move || {
        loop {
            if event::poll(IDLE_POLL_INTERVAL).unwrap_or(false)
                && let Ok(ev) = event::read()
                && key_tx.send(ev).is_err()
            {
                break;
            }
        }
    });

    loop {
        // Multi-line log records become separate lines.
        if let Some(ref mut rx) = log_rx {
            while let Ok(line) = rx.try_recv() {
                for l in line.split('\n') {
                    state.push_trace_line(l.to_string());
                }
            }
        }

        let animating = state.update();
        if state.needs_redraw {
            terminal.draw(|f| view::draw(f, state, f.area()))?;
            state.needs_redraw = false;
        }

        let wait = if animating { FRAME_INTERVAL } else { IDLE_POLL_INTERVAL };
        match key_rx.recv_timeout(wait) {
            Ok(Event::Key(key)) => {
                if handle_key(state, key) == KeyOutcome::Quit {
                    break;
                }
            }
            Ok(Event::Resize(_, _)) => state.needs_redraw = true,
            Ok(_) | Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
    Ok(())
}

/// Apply one key press to the state.
pub fn handle_key<C: Clock>(state: &mut DemoState<C>, key: KeyEvent) -> KeyOutcome {
    if key.kind != KeyEventKind::Press {
        return KeyOutcome::Continue;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return KeyOutcome::Quit,
        KeyCode::Char('d') if ctrl => state.toggle_screen(),
        KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Esc if state.screen == Screen::DebugTraces => state.toggle_screen(),
        KeyCode::Up if state.screen == Screen::DebugTraces => state.trace_scroll_up(1),
        KeyCode::Down if state.screen == Screen::DebugTraces => state.trace_scroll_down(1),
        KeyCode::PageUp if state.screen == Screen::DebugTraces => state.trace_scroll_up(10),
        KeyCode::PageDown if state.screen == Screen::DebugTraces => state.trace_scroll_down(10),
        KeyCode::Char(' ') if state.screen == Screen::Main => state.toggle(),
        KeyCode::Char('d') if state.screen == Screen::Main => state.start_download(),
        KeyCode::Char('r') if state.screen == Screen::Main => state.rapid_burst(),
        _ => {}
    }
    KeyOutcome::Continue
}

#[cfg(test)]
mod tests {
    use sweep_core::{IndicatorConfig, ManualClock, Phase};

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn state() -> DemoState<ManualClock> {
        DemoState::with_clock(IndicatorConfig::default(), ManualClock::new())
    }

    #[test]
    fn space_toggles_signal() {
        let mut state = state();
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Char(' '), KeyModifiers::NONE)),
            KeyOutcome::Continue
        );
        assert_eq!(state.indicator.phase(), Phase::Entering);
    }

    #[test]
    fn ctrl_d_switches_screen_and_plain_d_downloads() {
        let mut state = state();
        handle_key(&mut state, press(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert_eq!(state.screen, Screen::DebugTraces);
        handle_key(&mut state, press(KeyCode::Char('d'), KeyModifiers::NONE));
        assert!(!state.downloads.is_active());
        handle_key(&mut state, press(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(state.screen, Screen::Main);
        handle_key(&mut state, press(KeyCode::Char('d'), KeyModifiers::NONE));
        assert!(state.downloads.is_active());
    }

    #[test]
    fn quit_keys() {
        let mut state = state();
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Char('q'), KeyModifiers::NONE)),
            KeyOutcome::Quit
        );
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyOutcome::Quit
        );
    }

    #[test]
    fn releases_are_ignored() {
        let mut state = state();
        let mut key = press(KeyCode::Char(' '), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_key(&mut state, key);
        assert_eq!(state.indicator.phase(), Phase::Hidden);
    }
}
