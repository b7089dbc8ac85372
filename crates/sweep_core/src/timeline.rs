//! Animation timeline: the animated values of one indicator and the curves that drive them.
//!
//! Positions are percentages of the track length. The moving segment spans
//! `lead_edge..lead_edge + trail_width` and must never leave `0..=100`.

use std::time::Duration;

use serde::Serialize;

use crate::easing::Easing;

/// Track length in percent.
pub const TRACK_MAX: f64 = 100.0;

/// Float slack when checking the track bound (eased sums can land one ulp past 100).
pub const TRACK_EPSILON: f64 = 1e-9;

/// Animated values owned by a single indicator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TimelineValues {
    /// Left edge of the moving segment (0..=100).
    pub lead_edge: f64,
    /// Width of the moving segment (0..=100).
    pub trail_width: f64,
    /// Container opacity (0..=1).
    pub opacity: f64,
}

impl TimelineValues {
    pub const ZERO: TimelineValues = TimelineValues {
        lead_edge: 0.0,
        trail_width: 0.0,
        opacity: 0.0,
    };

    pub fn reset(&mut self) {
        *self = Self::ZERO;
    }

    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::LeadEdge => self.lead_edge,
            Channel::TrailWidth => self.trail_width,
            Channel::Opacity => self.opacity,
        }
    }

    pub fn set(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::LeadEdge => self.lead_edge = value,
            Channel::TrailWidth => self.trail_width = value,
            Channel::Opacity => self.opacity = value,
        }
    }

    /// Right edge of the segment.
    pub fn trail_edge(&self) -> f64 {
        self.lead_edge + self.trail_width
    }

    pub fn is_within_track(&self) -> bool {
        self.lead_edge >= 0.0
            && self.trail_width >= 0.0
            && self.trail_edge() <= TRACK_MAX + TRACK_EPSILON
            && (0.0..=1.0).contains(&self.opacity)
    }

    /// Pull every value back inside its range. The width gives way to the lead edge.
    pub fn clamp_to_track(&mut self) {
        self.lead_edge = self.lead_edge.clamp(0.0, TRACK_MAX);
        self.trail_width = self.trail_width.clamp(0.0, TRACK_MAX - self.lead_edge);
        self.opacity = self.opacity.clamp(0.0, 1.0);
    }
}

/// One animated value of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    LeadEdge,
    TrailWidth,
    Opacity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelTween {
    pub channel: Channel,
    pub from: f64,
    pub to: f64,
}

/// One-shot transition of some channels over a fixed duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    duration: Duration,
    easing: Easing,
    channels: Vec<ChannelTween>,
}

impl Tween {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            channels: Vec::with_capacity(3),
        }
    }

    pub fn channel(mut self, channel: Channel, from: f64, to: f64) -> Self {
        self.channels.retain(|c| c.channel != channel);
        self.channels.push(ChannelTween { channel, from, to });
        self
    }

    /// Tween `channel` from its value in `values` to `to`.
    pub fn channel_from(self, values: &TimelineValues, channel: Channel, to: f64) -> Self {
        let from = values.get(channel);
        self.channel(channel, from, to)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress 0..=1. Zero-length tweens are complete immediately.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    pub fn apply(&self, elapsed: Duration, values: &mut TimelineValues) {
        let p = self.easing.apply(self.progress(elapsed));
        for c in &self.channels {
            values.set(c.channel, lerp(c.from, c.to, p));
        }
    }
}

/// The repeating indeterminate sweep.
///
/// Each iteration: snap to lead 0 / width 0, grow the width to 100 with the lead
/// pinned at 0, then slide the lead to 100 while the width shrinks to 0. The two
/// moving phases share one easing value, so the right edge stays at 100 while sliding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepCycle {
    grow: Duration,
    slide: Duration,
    easing: Easing,
}

impl SweepCycle {
    pub fn new(phase: Duration, easing: Easing) -> Self {
        Self {
            grow: phase,
            slide: phase,
            easing,
        }
    }

    pub fn period(&self) -> Duration {
        self.grow + self.slide
    }

    /// 1-based iteration running at `elapsed`.
    pub fn iteration(&self, elapsed: Duration) -> u64 {
        let period = self.period().as_nanos();
        if period == 0 {
            return 1;
        }
        (elapsed.as_nanos() / period) as u64 + 1
    }

    /// `(lead_edge, trail_width)` at `elapsed` since the sweep started.
    pub fn sample(&self, elapsed: Duration) -> (f64, f64) {
        let period = self.period().as_nanos();
        if period == 0 {
            return (0.0, 0.0);
        }
        let offset = Duration::from_nanos((elapsed.as_nanos() % period) as u64);
        if offset < self.grow {
            let p = self.easing.apply(offset.as_secs_f64() / self.grow.as_secs_f64());
            (0.0, lerp(0.0, TRACK_MAX, p))
        } else {
            let p = self
                .easing
                .apply((offset - self.grow).as_secs_f64() / self.slide.as_secs_f64());
            let lead = lerp(0.0, TRACK_MAX, p);
            (lead, TRACK_MAX - lead)
        }
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
