//! Core error types for timeroom-core.
//!
//! Only two things can go wrong around a timer: the input that describes it
//! is bad, or the configuration file cannot be read or written. The tick
//! path itself never fails.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timeroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Timer input could not be turned into a runnable timer
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Config directory could not be determined or created
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Errors raised while turning user input into a phase sequence.
///
/// The `Display` text is meant to be shown to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A numeric field is missing, non-numeric, or below its minimum.
    #[error("{message}")]
    InvalidField { field: String, message: String },

    /// A custom interval pattern is empty or has a bad entry.
    #[error("Enter a comma-separated list of seconds.")]
    InvalidPattern { entry: String },

    /// The event date/time could not be parsed.
    #[error("Please select a valid date and time.")]
    InvalidDateTime(String),

    /// A phase sequence must contain at least one phase.
    #[error("A timer needs at least one phase.")]
    EmptySequence,

    /// Every phase in the sequence has zero length.
    #[error("A timer needs at least one phase longer than zero seconds.")]
    ZeroLengthSequence,

    /// The run would last longer than a `u64` tick count can hold.
    #[error("A timer cannot run that long.")]
    DurationOverflow,
}

/// Failure to play an audio cue. Never interrupts the count.
#[derive(Error, Debug)]
#[error("audio cue failed: {0}")]
pub struct AudioError(pub String);

impl From<std::io::Error> for AudioError {
    fn from(err: std::io::Error) -> Self {
        AudioError(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
