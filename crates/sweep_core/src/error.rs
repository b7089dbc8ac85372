use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("invalid easing curve: {0:?} (expected linear, standard or x1,y1,x2,y2 within 0..=1)")]
    InvalidEasing(String),

    #[error("unknown exit strategy: {0:?} (expected sweep or fade)")]
    UnknownExitStrategy(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("toggle script is empty")]
    Empty,

    #[error("step {index}: expected <on|off>:<millis>, got {step:?}")]
    InvalidStep { index: usize, step: String },

    #[error("step {index}: unknown signal state {state:?}")]
    UnknownState { index: usize, state: String },

    #[error("step {index}: invalid hold duration {value:?}")]
    InvalidDuration { index: usize, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_duration_error() {
        let err = ConfigError::ZeroDuration("sweep_phase");
        assert_eq!(err.to_string(), "sweep_phase must be greater than zero");
    }

    #[test]
    fn test_invalid_value_error() {
        let err = ConfigError::InvalidValue {
            key: "SWEEP_ENTRY_MS".to_string(),
            value: "soon".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for SWEEP_ENTRY_MS: \"soon\"");
    }

    #[test]
    fn test_script_step_error() {
        let err = ScriptError::InvalidStep {
            index: 2,
            step: "on".to_string(),
        };
        assert_eq!(err.to_string(), "step 2: expected <on|off>:<millis>, got \"on\"");
    }
}
