//! Error types for the session module.

use thiserror::Error;

/// Errors reported by an RTC engine adapter.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Engine used before `initialize`.
    #[error("Engine not initialized")]
    NotInitialized,

    /// Engine refused the request.
    #[error("Engine rejected request (code {code}): {message}")]
    Rejected { code: i32, message: String },

    /// Engine could not be reached.
    #[error("Engine unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned to the presentation layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Selector outside the channel directory.
    #[error("No channel at index {index} (directory has {len})")]
    UnknownChannel { index: usize, len: usize },

    /// Role changes are only accepted while not joined.
    #[error("Cannot change role while joined")]
    RoleLocked,

    /// The session actor is no longer running.
    #[error("Session disconnected")]
    Disconnected,
}
