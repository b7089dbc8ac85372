//! Demo state: the indicator, the sources that drive its signal, and what the view shows.
//!
//! The signal is `manual || script || downloads active`. [DemoState::update] applies due
//! scheduled actions, feeds the signal, ticks the indicator and logs its transitions.

use std::time::Duration;

use sweep_core::{
    Clock, DownloadTracker, IndicatorConfig, IndicatorEvent, ProgressIndicator, SystemClock,
    ToggleScript, attachment_id,
};

use crate::theme::{Appearance, SweepPalette};
use crate::utils::{
    BURST_STEP, DOWNLOAD_DURATION, MAX_EVENT_LINES, MAX_TRACE_LINES, format_elapsed,
};

/// Which screen is currently shown (demo vs runtime logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    DebugTraces,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    SetManual(bool),
    FinishDownload(String),
}

/// Short label for the event log.
pub fn describe_event(event: &IndicatorEvent) -> String {
    match event {
        IndicatorEvent::Shown => "shown".to_string(),
        IndicatorEvent::LoopStarted { iteration } => format!("loop #{iteration}"),
        IndicatorEvent::ExitStarted => "exit started".to_string(),
        IndicatorEvent::ExitCancelled => "exit cancelled".to_string(),
        IndicatorEvent::Hidden => "hidden".to_string(),
    }
}

#[derive(Debug)]
pub struct DemoState<C: Clock = SystemClock> {
    pub indicator: ProgressIndicator<C>,
    pub downloads: DownloadTracker,
    script: Option<ToggleScript>,
    script_started: Duration,
    manual_show: bool,
    scheduled: Vec<(Duration, Action)>,
    next_download: u64,
    pub palette: SweepPalette,
    pub screen: Screen,
    /// Indicator transitions and key actions, newest at end.
    pub event_lines: Vec<String>,
    /// Runtime log lines (tracing), newest at end.
    pub trace_lines: Vec<String>,
    /// Lines scrolled up from the bottom of the trace view.
    pub trace_scroll: usize,
    /// When true, next draw should run; cleared after draw.
    pub needs_redraw: bool,
}

impl DemoState<SystemClock> {
    pub fn new(config: IndicatorConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> DemoState<C> {
    pub fn with_clock(config: IndicatorConfig, clock: C) -> Self {
        Self {
            indicator: ProgressIndicator::with_clock(config, clock),
            downloads: DownloadTracker::new(),
            script: None,
            script_started: Duration::ZERO,
            manual_show: false,
            scheduled: Vec::new(),
            next_download: 1,
            palette: SweepPalette::sweep_dark(),
            screen: Screen::Main,
            event_lines: Vec::new(),
            trace_lines: Vec::new(),
            trace_scroll: 0,
            needs_redraw: true,
        }
    }

    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.palette = SweepPalette::for_appearance(appearance);
        self
    }

    /// Play `script` from now on, alongside the other signal sources.
    pub fn with_script(mut self, script: ToggleScript) -> Self {
        self.script_started = self.now();
        self.script = Some(script);
        self
    }

    pub fn now(&self) -> Duration {
        self.indicator.clock().now()
    }

    pub fn manual_show(&self) -> bool {
        self.manual_show
    }

    /// Current combined signal.
    pub fn signal(&self) -> bool {
        let scripted = self
            .script
            .as_ref()
            .is_some_and(|s| s.value_at(self.now().saturating_sub(self.script_started)));
        self.manual_show || scripted || self.downloads.is_active()
    }

    /// Key `space`.
    pub fn toggle(&mut self) {
        self.manual_show = !self.manual_show;
        self.push_event_line(format!("space: manual signal {}", on_off(self.manual_show)));
        self.apply_signal();
    }

    /// Key `d`: start a simulated attachment download that finishes after [DOWNLOAD_DURATION].
    pub fn start_download(&mut self) {
        let source = format!(
            "https://files.example.com/chat-attachments/{}/report.pdf",
            self.next_download
        );
        self.next_download += 1;
        let Some(id) = attachment_id(&source).map(str::to_string) else {
            return;
        };
        if self.downloads.start_source(&source) {
            self.push_event_line(format!("download {id} started"));
            self.scheduled
                .push((self.now() + DOWNLOAD_DURATION, Action::FinishDownload(id)));
            self.apply_signal();
        } else {
            self.push_event_line(format!("download {id} refused"));
        }
    }

    /// Key `r`: manual signal on, off, on, [BURST_STEP] apart.
    pub fn rapid_burst(&mut self) {
        let now = self.now();
        self.manual_show = true;
        self.push_event_line("burst: on / off / on".to_string());
        self.apply_signal();
        self.scheduled.push((now + BURST_STEP, Action::SetManual(false)));
        self.scheduled.push((now + BURST_STEP * 2, Action::SetManual(true)));
    }

    /// Run due actions, feed the signal and tick. Returns true while the indicator is visible.
    pub fn update(&mut self) -> bool {
        let now = self.now();
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.scheduled)
            .into_iter()
            .partition(|(at, _)| *at <= now);
        self.scheduled = pending;
        due.sort_by_key(|(at, _)| *at);
        for (_, action) in due {
            match action {
                Action::SetManual(show) => self.manual_show = show,
                Action::FinishDownload(id) => {
                    if self.downloads.finish(&id) {
                        self.push_event_line(format!("download {id} finished"));
                    }
                }
            }
            self.apply_signal();
        }
        self.apply_signal();

        let visible = self.indicator.is_visible();
        if visible {
            self.needs_redraw = true;
        }
        visible
    }

    /// Push the combined signal into the indicator and log any transitions.
    fn apply_signal(&mut self) {
        let signal = self.signal();
        self.indicator.set_should_show(signal);
        let elapsed = self.now();
        for event in self.indicator.tick() {
            self.push_event_line(format!("{} {}", format_elapsed(elapsed), describe_event(&event)));
        }
    }

    pub fn push_event_line(&mut self, line: String) {
        self.event_lines.push(line);
        if self.event_lines.len() > MAX_EVENT_LINES {
            self.event_lines
                .drain(0..self.event_lines.len() - MAX_EVENT_LINES);
        }
        self.needs_redraw = true;
    }

    pub fn push_trace_line(&mut self, line: String) {
        self.trace_lines.push(line);
        if self.trace_lines.len() > MAX_TRACE_LINES {
            self.trace_lines
                .drain(0..self.trace_lines.len() - MAX_TRACE_LINES);
        }
        self.needs_redraw = true;
    }

    pub fn toggle_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Main => Screen::DebugTraces,
            Screen::DebugTraces => Screen::Main,
        };
        self.needs_redraw = true;
    }

    /// Scroll the trace view up (toward older lines).
    pub fn trace_scroll_up(&mut self, delta: usize) {
        self.trace_scroll = self.trace_scroll.saturating_add(delta);
        self.needs_redraw = true;
    }

    /// Scroll the trace view down (toward newest).
    pub fn trace_scroll_down(&mut self, delta: usize) {
        self.trace_scroll = self.trace_scroll.saturating_sub(delta);
        self.needs_redraw = true;
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
