//! Sink error types.

use thiserror::Error;

/// Errors a sink write can report.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The sink could not be reached.
    #[error("Sink unavailable: {0}")]
    Unavailable(String),

    /// The sink was reached but rejected the write.
    #[error("Failed to write: {0}")]
    Write(String),

    /// Failed to serialize the event.
    #[error("Failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A writer lock was poisoned by a panicking thread.
    #[error("Sink writer lock poisoned")]
    Poisoned,
}
