//! Error types with location tracking.

use derive_more::{Display, Error};
use tracing::instrument;

/// Caller supplied a value outside an enumerated option set.
///
/// This is a contract violation by the caller, not a gameplay condition.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unknown {} '{}' at {}:{}", setting, value, file, line)]
pub struct ConfigurationError {
    /// Which setting was being parsed.
    pub setting: &'static str,
    /// The rejected value.
    pub value: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigurationError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(value))]
    pub fn new(setting: &'static str, value: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            setting,
            value: value.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Failure reading or writing the history store.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Serialization error: {}", err))
    }
}
