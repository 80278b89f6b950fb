//! Faults the router absorbs and reports to the mirror.

use std::fmt;

use thiserror::Error;

use crate::event::EventId;
use crate::sink::SinkError;

/// Which sink a failed write was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// The system log.
    EventLog,
    /// The structured trace.
    TraceLog,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::EventLog => f.write_str("event log"),
            SinkKind::TraceLog => f.write_str("trace log"),
        }
    }
}

/// A problem encountered while routing a message.
///
/// Never returned to the caller of [`LogRouter::emit`](super::LogRouter::emit);
/// each fault is written to the mirror as a diagnostic line and the call
/// carries on.
#[derive(Debug, Error)]
pub enum RoutingFault {
    /// No scope was supplied and no default scope is configured.
    #[error(
        "Unable to check log configuration. Possible cause: no policy scope was supplied and no default scope is configured."
    )]
    PolicyScopeUnresolved,

    /// A sink rejected the write.
    #[error("Unable to write to {sink}. {source}")]
    SinkWriteFailed {
        /// Sink that failed.
        sink: SinkKind,
        /// Underlying sink error.
        source: SinkError,
    },
}

impl RoutingFault {
    /// Event id reported alongside this fault.
    pub fn event_id(&self) -> EventId {
        match self {
            RoutingFault::PolicyScopeUnresolved => EventId::UnableToCheckLogConfiguration,
            RoutingFault::SinkWriteFailed {
                sink: SinkKind::EventLog,
                ..
            } => EventId::UnableToWriteToEventLog,
            RoutingFault::SinkWriteFailed {
                sink: SinkKind::TraceLog,
                ..
            } => EventId::UnableToWriteToTraceLog,
        }
    }
}
