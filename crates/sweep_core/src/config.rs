//! Indicator timing and finishing-transition configuration.
//!
//! Defaults are the design constants of the indicator. Colours and thickness are
//! not configurable; they live with the renderer.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::ConfigError;

/// Opacity fade when the indicator appears.
pub const ENTRY_FADE: Duration = Duration::from_millis(300);
/// Delay between appearing and starting the sweep loop.
pub const LOOP_DELAY: Duration = Duration::from_millis(300);
/// Length of each moving phase of the sweep (grow, then slide).
pub const SWEEP_PHASE: Duration = Duration::from_millis(750);
/// Finishing sweep length.
pub const EXIT_SWEEP: Duration = Duration::from_millis(750);
/// Finishing fade length.
pub const EXIT_FADE: Duration = Duration::from_millis(300);

/// How the indicator finishes once the signal drops. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitStrategy {
    /// The segment expands to cover the whole track, then the track disappears.
    #[default]
    Sweep,
    /// The whole container fades out with the segment frozen in place.
    Fade,
}

impl ExitStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitStrategy::Sweep => "sweep",
            ExitStrategy::Fade => "fade",
        }
    }
}

impl FromStr for ExitStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sweep" => Ok(ExitStrategy::Sweep),
            "fade" => Ok(ExitStrategy::Fade),
            other => Err(ConfigError::UnknownExitStrategy(other.to_string())),
        }
    }
}

impl std::fmt::Display for ExitStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Indicator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Finishing transition
    pub exit_strategy: ExitStrategy,
    /// Easing shared by every phase
    pub easing: Easing,
    #[serde(with = "millis")]
    pub entry_fade: Duration,
    #[serde(with = "millis")]
    pub loop_delay: Duration,
    #[serde(with = "millis")]
    pub sweep_phase: Duration,
    #[serde(with = "millis")]
    pub exit_sweep: Duration,
    #[serde(with = "millis")]
    pub exit_fade: Duration,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            exit_strategy: ExitStrategy::default(),
            easing: Easing::STANDARD,
            entry_fade: ENTRY_FADE,
            loop_delay: LOOP_DELAY,
            sweep_phase: SWEEP_PHASE,
            exit_sweep: EXIT_SWEEP,
            exit_fade: EXIT_FADE,
        }
    }
}

impl IndicatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exit_strategy(mut self, strategy: ExitStrategy) -> Self {
        self.exit_strategy = strategy;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_entry_fade(mut self, d: Duration) -> Self {
        self.entry_fade = d;
        self
    }

    pub fn with_loop_delay(mut self, d: Duration) -> Self {
        self.loop_delay = d;
        self
    }

    pub fn with_sweep_phase(mut self, d: Duration) -> Self {
        self.sweep_phase = d;
        self
    }

    pub fn with_exit_sweep(mut self, d: Duration) -> Self {
        self.exit_sweep = d;
        self
    }

    pub fn with_exit_fade(mut self, d: Duration) -> Self {
        self.exit_fade = d;
        self
    }

    /// Duration of the finishing transition for the configured strategy.
    pub fn exit_duration(&self) -> Duration {
        match self.exit_strategy {
            ExitStrategy::Sweep => self.exit_sweep,
            ExitStrategy::Fade => self.exit_fade,
        }
    }

    /// One full sweep iteration (grow + slide).
    pub fn sweep_period(&self) -> Duration {
        self.sweep_phase * 2
    }

    /// Rejects a zero sweep phase and a degenerate easing. Zero-length entry, delay and
    /// exit phases are allowed and complete on the next tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sweep_phase.is_zero() {
            return Err(ConfigError::ZeroDuration("sweep_phase"));
        }
        if !self.easing.is_valid() {
            return Err(ConfigError::InvalidEasing(self.easing.to_string()));
        }
        Ok(())
    }

    /// Load configuration from environment variables
    ///
    /// Reads:
    /// - `SWEEP_EXIT_STRATEGY` → exit_strategy (`sweep` | `fade`)
    /// - `SWEEP_EASING` → easing (`linear` | `standard` | `x1,y1,x2,y2`)
    /// - `SWEEP_ENTRY_MS`, `SWEEP_LOOP_DELAY_MS`, `SWEEP_PHASE_MS`, `SWEEP_EXIT_MS`,
    ///   `SWEEP_FADE_MS` → durations in milliseconds
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [IndicatorConfig::from_env] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(v) = lookup("SWEEP_EXIT_STRATEGY") {
            config.exit_strategy = v.parse()?;
        }
        if let Some(v) = lookup("SWEEP_EASING") {
            config.easing = v.parse()?;
        }
        let durations: [(&str, &mut Duration); 5] = [
            ("SWEEP_ENTRY_MS", &mut config.entry_fade),
            ("SWEEP_LOOP_DELAY_MS", &mut config.loop_delay),
            ("SWEEP_PHASE_MS", &mut config.sweep_phase),
            ("SWEEP_EXIT_MS", &mut config.exit_sweep),
            ("SWEEP_FADE_MS", &mut config.exit_fade),
        ];
        for (key, slot) in durations {
            if let Some(v) = lookup(key) {
                let ms = v.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: v.clone(),
                })?;
                *slot = Duration::from_millis(ms);
            }
        }
        config.validate()?;
        Ok(config)
    }
}

/// Serialize durations as whole milliseconds.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
