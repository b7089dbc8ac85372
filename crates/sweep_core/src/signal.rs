//! Sources of the `should_show` signal: scripted toggles and attachment downloads.

use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::Serialize;

use crate::error::ScriptError;

/// One step of a [ToggleScript]: hold the signal at `should_show` for `hold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleStep {
    pub should_show: bool,
    #[serde(rename = "hold_ms", serialize_with = "serialize_millis")]
    pub hold: Duration,
}

/// Timed sequence of signal values, e.g. `on:2000,off:1500`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ToggleScript {
    steps: Vec<ToggleStep>,
}

impl ToggleScript {
    pub fn new(steps: Vec<ToggleStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[ToggleStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.hold).sum()
    }

    /// Start time and value of every step.
    pub fn transitions(&self) -> Vec<(Duration, bool)> {
        let mut at = Duration::ZERO;
        self.steps
            .iter()
            .map(|s| {
                let start = at;
                at += s.hold;
                (start, s.should_show)
            })
            .collect()
    }

    /// Signal value at `t`. Past the end the last value holds; an empty script is off.
    pub fn value_at(&self, t: Duration) -> bool {
        let mut end = Duration::ZERO;
        for step in &self.steps {
            end += step.hold;
            if t < end {
                return step.should_show;
            }
        }
        self.steps.last().is_some_and(|s| s.should_show)
    }
}

impl FromStr for ToggleScript {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            return Err(ScriptError::Empty);
        }
        let steps = parts
            .into_iter()
            .enumerate()
            .map(|(index, part)| parse_step(index, part))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { steps })
    }
}

fn parse_step(index: usize, part: &str) -> Result<ToggleStep, ScriptError> {
    let Some((state, hold)) = part.split_once(':') else {
        return Err(ScriptError::InvalidStep {
            index,
            step: part.to_string(),
        });
    };
    let should_show = match state.trim().to_lowercase().as_str() {
        "on" | "show" | "true" | "1" => true,
        "off" | "hide" | "false" | "0" => false,
        other => {
            return Err(ScriptError::UnknownState {
                index,
                state: other.to_string(),
            });
        }
    };
    let hold = hold
        .trim()
        .trim_end_matches("ms")
        .parse::<u64>()
        .map_err(|_| ScriptError::InvalidDuration {
            index,
            value: hold.trim().to_string(),
        })?;
    Ok(ToggleStep {
        should_show,
        hold: Duration::from_millis(hold),
    })
}

fn serialize_millis<S>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(d.as_millis() as u64)
}

static ATTACHMENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"chat-attachments/(\d+)").expect("valid attachment regex"));

/// Attachment id embedded in a chat attachment URL.
pub fn attachment_id(source: &str) -> Option<&str> {
    ATTACHMENT_ID
        .captures(source)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Per-attachment download state. `is_active()` is what a screen feeds into `should_show`.
#[derive(Debug, Default)]
pub struct DownloadTracker {
    active: BTreeSet<String>,
    offline: bool,
}

impl DownloadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Mark `id` as downloading. Refused while offline or when `id` is already downloading.
    pub fn start(&mut self, id: impl Into<String>) -> bool {
        if self.offline {
            return false;
        }
        let id = id.into();
        let started = self.active.insert(id.clone());
        if started {
            tracing::debug!(target: "sweep.download", id = %id, "download started");
        }
        started
    }

    /// Start the download for a chat attachment URL; false when the URL carries no id.
    pub fn start_source(&mut self, source: &str) -> bool {
        match attachment_id(source) {
            Some(id) => self.start(id),
            None => false,
        }
    }

    pub fn finish(&mut self, id: &str) -> bool {
        let finished = self.active.remove(id);
        if finished {
            tracing::debug!(target: "sweep.download", id = %id, "download finished");
        }
        finished
    }

    pub fn is_downloading(&self, id: &str) -> bool {
        self.active.contains(id)
    }

    pub fn is_active(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
