//! Error types for the security-condition analyzer
//!
//! The analysis itself never fails: malformed pseudocode degrades to a
//! partial derivation. Errors only come from the surfaces around it
//! (options parsing, JSON export, batch thread pools).

use thiserror::Error;

/// Analyzer errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Analyzer options could not be parsed
    ///
    /// **Triggered by:** `AnalyzerOptions::from_json` with malformed JSON or
    /// an unknown enum value
    /// **Example:** `{"branch_mode": "recursive"}`
    #[error("Invalid analyzer options: {0}")]
    InvalidOptions(String),

    /// A result could not be serialized
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The batch thread pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),
}

impl Error {
    /// Create an options error with a message
    pub fn invalid_options(msg: impl Into<String>) -> Self {
        Error::InvalidOptions(msg.into())
    }
}

/// Result type for analyzer operations
pub type Result<T> = std::result::Result<T, Error>;
