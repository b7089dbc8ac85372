//! Deterministic playback of a [ToggleScript] against an indicator on a manual clock.

use std::time::Duration;

use serde::Serialize;

use crate::clock::{Clock, ManualClock};
use crate::config::IndicatorConfig;
use crate::indicator::{Frame, IndicatorEvent, ProgressIndicator};
use crate::signal::ToggleScript;
use crate::timeline::TRACK_MAX;

/// 60 frames per second.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    #[serde(rename = "at_ms", serialize_with = "serialize_millis")]
    pub at: Duration,
    pub should_show: bool,
    pub frame: Option<Frame>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimedEvent {
    #[serde(rename = "at_ms", serialize_with = "serialize_millis")]
    pub at: Duration,
    #[serde(flatten)]
    pub event: IndicatorEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub samples: Vec<Sample>,
    pub events: Vec<TimedEvent>,
    pub loops_started: u64,
    /// Largest `lead_edge + trail_width` observed over all samples.
    pub max_trail_edge: f64,
    /// Animations still running once playback stopped.
    pub active_animations: usize,
}

impl SimulationReport {
    /// Time of the last transition to hidden, if any.
    pub fn hidden_at(&self) -> Option<Duration> {
        self.events
            .iter()
            .rev()
            .find(|e| e.event == IndicatorEvent::Hidden)
            .map(|e| e.at)
    }

    pub fn within_track(&self) -> bool {
        self.samples
            .iter()
            .filter_map(|s| s.frame)
            .all(|f| f.values().is_within_track())
            && self.max_trail_edge <= TRACK_MAX + crate::timeline::TRACK_EPSILON
    }

    pub fn final_frame(&self) -> Option<Frame> {
        self.samples.last().and_then(|s| s.frame)
    }
}

/// Plays a script, sampling one frame every `frame_interval`.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: IndicatorConfig,
    frame_interval: Duration,
    /// Extra time sampled after the script's last step.
    tail: Duration,
}

impl Simulation {
    pub fn new(config: IndicatorConfig) -> Self {
        let tail = config.exit_duration() + config.loop_delay;
        Self {
            config,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            tail,
        }
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        if !interval.is_zero() {
            self.frame_interval = interval;
        }
        self
    }

    pub fn with_tail(mut self, tail: Duration) -> Self {
        self.tail = tail;
        self
    }

    /// Signal changes are applied at their exact script time, between frames when needed.
    pub fn run(&self, script: &ToggleScript) -> SimulationReport {
        let clock = ManualClock::new();
        let mut indicator = ProgressIndicator::with_clock(self.config.clone(), clock.clone());
        let end = script.total_duration() + self.tail;
        let mut transitions = script.transitions().into_iter().peekable();

        let mut samples = Vec::new();
        let mut events = Vec::new();
        let mut max_trail_edge = 0.0_f64;
        let mut t = Duration::ZERO;

        loop {
            while let Some(&(at, should_show)) = transitions.peek() {
                if at > t {
                    break;
                }
                transitions.next();
                clock.set(at);
                indicator.set_should_show(should_show);
                for event in indicator.tick() {
                    events.push(TimedEvent { at, event });
                }
            }
            clock.set(t);
            for event in indicator.tick() {
                events.push(TimedEvent {
                    at: clock.now(),
                    event,
                });
            }
            let frame = indicator.frame();
            if let Some(f) = frame {
                max_trail_edge = max_trail_edge.max(f.lead_edge + f.trail_width);
            }
            samples.push(Sample {
                at: t,
                should_show: indicator.should_show(),
                frame,
            });
            if t >= end {
                break;
            }
            t = (t + self.frame_interval).min(end);
        }

        tracing::debug!(
            target: "sweep.simulation",
            samples = samples.len(),
            events = events.len(),
            loops = indicator.loops_started(),
            "simulation finished"
        );

        SimulationReport {
            samples,
            events,
            loops_started: indicator.loops_started(),
            max_trail_edge,
            active_animations: indicator.active_animations(),
        }
    }
}

fn serialize_millis<S>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(d.as_millis() as u64)
}
