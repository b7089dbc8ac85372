//! Animated linear progress indicator.
//!
//! [ProgressIndicator] turns a boolean `should_show` signal into animated
//! [Frame]s. State machine:
//!
//! ```text
//!            show                 loop delay elapsed
//! Hidden ──────────► Entering ───────────────────────► Looping
//!   ▲                  │  ▲                               │
//!   │ exit done   hide │  │ show                          │ hide
//!   │                  ▼  │                               │
//!   └──────────────── Exiting ◄───────────────────────────┘
//! ```
//!
//! Every transition cancels the animations of the state it leaves before it
//! starts new ones, so a rapidly toggled signal never leaves a loop running.
//! Dropping the indicator cancels whatever is still in flight.

use std::time::Duration;

use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::config::{ExitStrategy, IndicatorConfig};
use crate::driver::{Animation, AnimationDriver, AnimationId, Completion};
use crate::timeline::{Channel, SweepCycle, TRACK_MAX, TimelineValues, Tween};

/// Upper bound on completion passes per tick; each pass can only start shorter chains.
const MAX_SETTLE_PASSES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Hidden,
    Entering,
    Looping,
    Exiting,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Hidden => "hidden",
            Phase::Entering => "entering",
            Phase::Looping => "looping",
            Phase::Exiting => "exiting",
        }
    }

    pub fn is_visible(self) -> bool {
        !matches!(self, Phase::Hidden)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transition notifications, each emitted exactly once per transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum IndicatorEvent {
    /// Hidden → Entering.
    Shown,
    /// A sweep iteration began (1-based, counted across the indicator's lifetime).
    LoopStarted { iteration: u64 },
    /// Entering/Looping → Exiting.
    ExitStarted,
    /// Exiting → Entering: the signal came back before the exit finished.
    ExitCancelled,
    /// Exiting → Hidden.
    Hidden,
}

/// What to draw for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub phase: Phase,
    pub lead_edge: f64,
    pub trail_width: f64,
    pub opacity: f64,
}

impl Frame {
    pub fn values(&self) -> TimelineValues {
        TimelineValues {
            lead_edge: self.lead_edge,
            trail_width: self.trail_width,
            opacity: self.opacity,
        }
    }
}

/// Handles of the animations owned by the current phase.
#[derive(Debug, Default)]
struct Handles {
    fade_in: Option<AnimationId>,
    /// Doubles as the loop delay: its completion starts the sweep.
    settle: Option<AnimationId>,
    sweep: Option<AnimationId>,
    exit: Option<AnimationId>,
}

pub struct ProgressIndicator<C: Clock = SystemClock> {
    config: IndicatorConfig,
    clock: C,
    phase: Phase,
    should_show: bool,
    values: TimelineValues,
    driver: AnimationDriver,
    handles: Handles,
    /// Sweep iterations started before the current loop.
    loops_before: u64,
    /// Sweep iterations started by the current loop.
    loop_iteration: u64,
    events: Vec<IndicatorEvent>,
}

impl ProgressIndicator<SystemClock> {
    pub fn new(config: IndicatorConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl Default for ProgressIndicator<SystemClock> {
    fn default() -> Self {
        Self::new(IndicatorConfig::default())
    }
}

impl<C: Clock> ProgressIndicator<C> {
    pub fn with_clock(config: IndicatorConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            phase: Phase::Hidden,
            should_show: false,
            values: TimelineValues::ZERO,
            driver: AnimationDriver::new(),
            handles: Handles::default(),
            loops_before: 0,
            loop_iteration: 0,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn should_show(&self) -> bool {
        self.should_show
    }

    /// True while the signal is on or the exit transition is still running.
    pub fn is_visible(&self) -> bool {
        self.phase.is_visible()
    }

    pub fn values(&self) -> TimelineValues {
        self.values
    }

    /// Total sweep iterations started since construction.
    pub fn loops_started(&self) -> u64 {
        self.loops_before + self.loop_iteration
    }

    pub fn active_animations(&self) -> usize {
        self.driver.active_count()
    }

    /// Frame to draw, `None` while hidden.
    pub fn frame(&self) -> Option<Frame> {
        self.phase.is_visible().then_some(Frame {
            phase: self.phase,
            lead_edge: self.values.lead_edge,
            trail_width: self.values.trail_width,
            opacity: self.values.opacity,
        })
    }

    /// Feed the caller's signal. Transitions happen synchronously; repeated values are no-ops.
    pub fn set_should_show(&mut self, should_show: bool) {
        if should_show == self.should_show {
            return;
        }
        let now = self.clock.now();
        // Bring the timeline up to date so transitions start from what is on screen.
        self.advance(now);
        self.should_show = should_show;

        match (should_show, self.phase) {
            (true, Phase::Hidden) => {
                self.values.reset();
                self.begin_entry(now);
                self.events.push(IndicatorEvent::Shown);
                tracing::debug!(target: "sweep.indicator", "shown");
            }
            (true, Phase::Exiting) => {
                if let Some(id) = self.handles.exit.take() {
                    self.driver.cancel(id);
                }
                self.begin_entry(now);
                self.events.push(IndicatorEvent::ExitCancelled);
                tracing::debug!(
                    target: "sweep.indicator",
                    lead_edge = self.values.lead_edge,
                    trail_width = self.values.trail_width,
                    "exit cancelled, re-entering"
                );
            }
            (false, Phase::Entering | Phase::Looping) => {
                self.begin_exit(now);
                self.events.push(IndicatorEvent::ExitStarted);
                tracing::debug!(
                    target: "sweep.indicator",
                    strategy = %self.config.exit_strategy,
                    loops = self.loops_started(),
                    "exit started"
                );
            }
            _ => {}
        }
    }

    /// Advance animations to the clock's current time. Returns the transitions since the last call.
    pub fn tick(&mut self) -> Vec<IndicatorEvent> {
        let now = self.clock.now();
        self.advance(now);
        std::mem::take(&mut self.events)
    }

    fn advance(&mut self, now: Duration) {
        if self.driver.is_idle() {
            return;
        }
        for _ in 0..MAX_SETTLE_PASSES {
            let done = self.driver.step(now, &mut self.values);
            if done.is_empty() {
                break;
            }
            for completion in done {
                self.on_complete(completion);
            }
        }
        self.count_loop_iterations(now);
    }

    fn on_complete(&mut self, completion: Completion) {
        let id = Some(completion.id);
        if id == self.handles.fade_in {
            self.handles.fade_in = None;
        } else if id == self.handles.settle {
            self.handles.settle = None;
            self.begin_loop(completion.at);
        } else if id == self.handles.exit {
            self.handles.exit = None;
            self.values.reset();
            self.phase = Phase::Hidden;
            self.events.push(IndicatorEvent::Hidden);
            tracing::debug!(target: "sweep.indicator", "hidden");
        }
    }

    /// Fade in, and glide the segment back to the start over the loop delay.
    /// From a fresh show both tweens start at zero, so the glide is a plain delay.
    fn begin_entry(&mut self, now: Duration) {
        let fade_in = Tween::new(self.config.entry_fade, self.config.easing).channel_from(
            &self.values,
            Channel::Opacity,
            1.0,
        );
        let settle = Tween::new(self.config.loop_delay, self.config.easing)
            .channel_from(&self.values, Channel::LeadEdge, 0.0)
            .channel_from(&self.values, Channel::TrailWidth, 0.0);
        self.handles.fade_in = Some(self.driver.start(now, Animation::Tween(fade_in)));
        self.handles.settle = Some(self.driver.start(now, Animation::Tween(settle)));
        self.phase = Phase::Entering;
    }

    fn begin_loop(&mut self, at: Duration) {
        let cycle = SweepCycle::new(self.config.sweep_phase, self.config.easing);
        self.handles.sweep = Some(self.driver.start(at, Animation::Sweep(cycle)));
        self.loop_iteration = 0;
        self.phase = Phase::Looping;
        tracing::debug!(target: "sweep.indicator", "loop started");
    }

    fn begin_exit(&mut self, now: Duration) {
        for id in [
            self.handles.fade_in.take(),
            self.handles.settle.take(),
            self.handles.sweep.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.driver.cancel(id);
        }
        self.loops_before += self.loop_iteration;
        self.loop_iteration = 0;

        let tween = Tween::new(self.config.exit_duration(), self.config.easing);
        let tween = match self.config.exit_strategy {
            ExitStrategy::Sweep => tween
                .channel_from(&self.values, Channel::LeadEdge, 0.0)
                .channel_from(&self.values, Channel::TrailWidth, TRACK_MAX)
                .channel_from(&self.values, Channel::Opacity, 1.0),
            ExitStrategy::Fade => tween.channel_from(&self.values, Channel::Opacity, 0.0),
        };
        self.handles.exit = Some(self.driver.start(now, Animation::Tween(tween)));
        self.phase = Phase::Exiting;
    }

    fn count_loop_iterations(&mut self, now: Duration) {
        let Some(started_at) = self.handles.sweep.and_then(|id| self.driver.started_at(id)) else {
            return;
        };
        let cycle = SweepCycle::new(self.config.sweep_phase, self.config.easing);
        let current = cycle.iteration(now.saturating_sub(started_at));
        while self.loop_iteration < current {
            self.loop_iteration += 1;
            self.events.push(IndicatorEvent::LoopStarted {
                iteration: self.loops_started(),
            });
        }
    }
}

impl<C: Clock> Drop for ProgressIndicator<C> {
    fn drop(&mut self) {
        let cancelled = self.driver.cancel_all();
        if cancelled > 0 {
            tracing::debug!(target: "sweep.indicator", cancelled, "dropped with animations in flight");
        }
    }
}

impl<C: Clock> std::fmt::Debug for ProgressIndicator<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressIndicator")
            .field("phase", &self.phase)
            .field("should_show", &self.should_show)
            .field("values", &self.values)
            .field("active_animations", &self.driver.active_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn indicator(config: IndicatorConfig) -> (ProgressIndicator<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (ProgressIndicator::with_clock(config, clock.clone()), clock)
    }

    #[test]
    fn never_shown_renders_nothing() {
        let (mut ind, clock) = indicator(IndicatorConfig::default());
        clock.advance(ms(5000));
        assert!(ind.tick().is_empty());
        assert_eq!(ind.frame(), None);
        assert_eq!(ind.active_animations(), 0);
        ind.set_should_show(false);
        assert_eq!(ind.active_animations(), 0);
    }

    #[test]
    fn show_is_synchronous() {
        let (mut ind, _clock) = indicator(IndicatorConfig::default());
        ind.set_should_show(true);
        assert_eq!(ind.phase(), Phase::Entering);
        assert!(ind.is_visible());
        let frame = ind.frame().unwrap();
        assert_eq!(frame.opacity, 0.0);
        assert_eq!(ind.tick(), vec![IndicatorEvent::Shown]);
    }

    #[test]
    fn entering_fades_in_then_loops() {
        let (mut ind, clock) = indicator(IndicatorConfig::default().with_easing(crate::Easing::Linear));
        ind.set_should_show(true);
        clock.advance(ms(150));
        assert_eq!(ind.tick(), vec![IndicatorEvent::Shown]);
        assert!((ind.values().opacity - 0.5).abs() < 1e-9);
        assert_eq!(ind.phase(), Phase::Entering);

        clock.advance(ms(150));
        let events = ind.tick();
        assert_eq!(events, vec![IndicatorEvent::LoopStarted { iteration: 1 }]);
        assert_eq!(ind.phase(), Phase::Looping);
        assert_eq!(ind.values().opacity, 1.0);

        // Half way through the grow phase.
        clock.advance(ms(375));
        ind.tick();
        assert_eq!(ind.values().lead_edge, 0.0);
        assert!((ind.values().trail_width - 50.0).abs() < 1e-9);
    }

    #[test]
    fn loop_starts_at_scheduled_time_despite_late_tick() {
        let (mut ind, clock) = indicator(IndicatorConfig::default().with_easing(crate::Easing::Linear));
        ind.set_should_show(true);
        // One late frame covering the delay plus half the grow phase.
        clock.advance(ms(300 + 375));
        ind.tick();
        assert_eq!(ind.phase(), Phase::Looping);
        assert!((ind.values().trail_width - 50.0).abs() < 1e-9);
    }

    #[test]
    fn sweep_exit_fills_track_then_hides() {
        let (mut ind, clock) = indicator(IndicatorConfig::default());
        ind.set_should_show(true);
        clock.advance(ms(1000));
        ind.tick();
        ind.set_should_show(false);
        assert_eq!(ind.phase(), Phase::Exiting);
        assert_eq!(ind.active_animations(), 1);

        clock.advance(ms(749));
        ind.tick();
        assert_eq!(ind.phase(), Phase::Exiting);
        assert!(ind.values().trail_width > 99.0);

        clock.advance(ms(1));
        let events = ind.tick();
        assert!(events.contains(&IndicatorEvent::Hidden));
        assert_eq!(ind.frame(), None);
        assert_eq!(ind.values(), TimelineValues::ZERO);
        assert_eq!(ind.active_animations(), 0);
    }

    #[test]
    fn fade_exit_freezes_segment() {
        let config = IndicatorConfig::default().with_exit_strategy(ExitStrategy::Fade);
        let (mut ind, clock) = indicator(config);
        ind.set_should_show(true);
        clock.advance(ms(900));
        ind.tick();
        let before = ind.values();
        ind.set_should_show(false);

        clock.advance(ms(150));
        ind.tick();
        let mid = ind.values();
        assert_eq!(mid.lead_edge, before.lead_edge);
        assert_eq!(mid.trail_width, before.trail_width);
        assert!(mid.opacity < 1.0 && mid.opacity > 0.0);

        clock.advance(ms(150));
        assert!(ind.tick().contains(&IndicatorEvent::Hidden));
        assert_eq!(ind.frame(), None);
    }

    #[test]
    fn reentry_during_exit_is_continuous() {
        let (mut ind, clock) = indicator(IndicatorConfig::default());
        ind.set_should_show(true);
        clock.advance(ms(1000));
        ind.tick();
        ind.set_should_show(false);
        clock.advance(ms(300));
        ind.tick();
        let before = ind.values();

        ind.set_should_show(true);
        assert_eq!(ind.phase(), Phase::Entering);
        // No jump: values stay where the exit left them.
        assert_eq!(ind.values(), before);
        let events = ind.tick();
        assert!(events.contains(&IndicatorEvent::ExitCancelled));
        assert!(!events.contains(&IndicatorEvent::Hidden));

        clock.advance(ms(300));
        ind.tick();
        assert_eq!(ind.phase(), Phase::Looping);
        // fade-in tween finished; sweep is the only animation left.
        assert_eq!(ind.active_animations(), 1);
    }

    #[test]
    fn hide_before_loop_starts_cancels_pending_loop() {
        let (mut ind, clock) = indicator(IndicatorConfig::default());
        ind.set_should_show(true);
        clock.advance(ms(100));
        ind.set_should_show(false);
        assert_eq!(ind.phase(), Phase::Exiting);
        assert_eq!(ind.active_animations(), 1);

        clock.advance(ms(2000));
        let events = ind.tick();
        assert_eq!(
            events,
            vec![IndicatorEvent::Shown, IndicatorEvent::ExitStarted, IndicatorEvent::Hidden]
        );
        assert_eq!(ind.loops_started(), 0);
    }

    #[test]
    fn repeated_signal_values_are_ignored() {
        let (mut ind, clock) = indicator(IndicatorConfig::default());
        ind.set_should_show(true);
        clock.advance(ms(200));
        ind.set_should_show(true);
        assert_eq!(ind.active_animations(), 2);
        assert_eq!(ind.tick(), vec![IndicatorEvent::Shown]);
    }

    #[test]
    fn loop_iterations_accumulate_across_loops() {
        let (mut ind, clock) = indicator(IndicatorConfig::default());
        ind.set_should_show(true);
        clock.advance(ms(2000));
        ind.tick();
        assert_eq!(ind.loops_started(), 2);
        ind.set_should_show(false);
        clock.advance(ms(100));
        ind.set_should_show(true);
        clock.advance(ms(400));
        let events = ind.tick();
        assert!(events.contains(&IndicatorEvent::LoopStarted { iteration: 3 }));
        assert_eq!(ind.loops_started(), 3);
    }
}
