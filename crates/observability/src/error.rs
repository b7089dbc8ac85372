//! Error types for observability crate

use thiserror::Error;

/// Errors that can occur during observability initialization
#[derive(Error, Debug)]
pub enum ObservabilityError {
    /// A global subscriber was already installed, or installing it failed
    #[error("Failed to initialize observability: {0}")]
    InitFailed(String),

    /// Log filter could not be parsed
    #[error("Invalid log filter {filter:?}: {reason}")]
    InvalidFilter { filter: String, reason: String },
}
