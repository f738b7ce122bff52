//! Error types for the session layer.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors raised by the turn pipeline, settings and save files.
///
/// Malformed narrator output is never one of these: the status parser
/// degrades line by line instead.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A turn is already waiting on the narrator.
    #[error("a turn is already in flight")]
    TurnInFlight,

    /// The player submitted nothing.
    #[error("input is empty")]
    EmptyInput,

    /// The turn is not the one the session is waiting on, or the session
    /// is not waiting at all.
    #[error("turn {0} is not the pending turn")]
    StaleTurn(u64),

    /// The save file parsed as JSON but is not a save.
    #[error("invalid save file: {0}")]
    InvalidSave(String),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
