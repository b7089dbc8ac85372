//! Frame-stepping animation driver.
//!
//! Animations are started against a timestamp and evaluated whenever the owner
//! calls [AnimationDriver::step]. A cancelled animation is removed on the spot:
//! it never writes another value and its completion is never reported.

use std::time::Duration;

use crate::timeline::{SweepCycle, TimelineValues, Tween};

/// Handle for a started animation. Ids are never reused within one driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Animation {
    /// One-shot value transition.
    Tween(Tween),
    /// Repeats until cancelled; never completes.
    Sweep(SweepCycle),
}

/// A one-shot animation that ran to its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub id: AnimationId,
    /// Scheduled end time (start + duration), which may be earlier than the stepping frame.
    pub at: Duration,
}

#[derive(Debug)]
struct Running {
    id: AnimationId,
    started_at: Duration,
    animation: Animation,
}

#[derive(Debug, Default)]
pub struct AnimationDriver {
    next_id: u64,
    running: Vec<Running>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now: Duration, animation: Animation) -> AnimationId {
        self.next_id += 1;
        let id = AnimationId(self.next_id);
        tracing::trace!(target: "sweep.driver", id = id.0, ?animation, "start");
        self.running.push(Running {
            id,
            started_at: now,
            animation,
        });
        id
    }

    /// Stop `id` immediately. Returns false when it already finished or was cancelled.
    pub fn cancel(&mut self, id: AnimationId) -> bool {
        match self.running.iter().position(|r| r.id == id) {
            Some(index) => {
                self.running.remove(index);
                tracing::trace!(target: "sweep.driver", id = id.0, "cancel");
                true
            }
            None => false,
        }
    }

    /// Stop every running animation; returns how many were stopped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.running.len();
        self.running.clear();
        count
    }

    pub fn is_running(&self, id: AnimationId) -> bool {
        self.running.iter().any(|r| r.id == id)
    }

    pub fn started_at(&self, id: AnimationId) -> Option<Duration> {
        self.running.iter().find(|r| r.id == id).map(|r| r.started_at)
    }

    pub fn active_count(&self) -> usize {
        self.running.len()
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    /// Evaluate every running animation at `now`, in start order, and write into `values`.
    ///
    /// Finished one-shot animations are removed and returned, oldest end time first.
    /// Each completion is reported exactly once.
    pub fn step(&mut self, now: Duration, values: &mut TimelineValues) -> Vec<Completion> {
        let mut finished = Vec::new();
        for r in &self.running {
            let elapsed = now.saturating_sub(r.started_at);
            match &r.animation {
                Animation::Tween(tween) => {
                    tween.apply(elapsed, values);
                    if tween.is_finished(elapsed) {
                        finished.push(Completion {
                            id: r.id,
                            at: r.started_at + tween.duration(),
                        });
                    }
                }
                Animation::Sweep(cycle) => {
                    let (lead_edge, trail_width) = cycle.sample(elapsed);
                    values.lead_edge = lead_edge;
                    values.trail_width = trail_width;
                }
            }
        }
        if !finished.is_empty() {
            self.running
                .retain(|r| !finished.iter().any(|c| c.id == r.id));
            finished.sort_by_key(|c| (c.at, c.id));
        }
        values.clamp_to_track();
        finished
    }
}
