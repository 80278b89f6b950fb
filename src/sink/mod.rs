//! Log destinations.
//!
//! The router writes to three kinds of sink:
//!
//! - **Event sink** ([`EventSink`]): the high-visibility, operator-facing
//!   system log. Production implementation: [`SyslogEventSink`].
//! - **Trace sink** ([`TraceSink`]): the higher-volume structured trace.
//!   Production implementation: [`TracingTraceSink`].
//! - **Mirror sink** ([`MirrorSink`]): the unconditional audit line of record.
//!   Production implementation: [`WriterMirror`].
//!
//! [`MemorySink`] implements all three and records what it receives.

mod error;
mod memory;
mod mirror;
mod syslog;
mod trace;

use crate::event::{Category, EventId, EventSeverity, TraceSeverity};

pub use error::SinkError;
pub use memory::{MemorySink, RecordedEvent, RecordedTrace};
pub use mirror::WriterMirror;
pub use self::syslog::{DEFAULT_SERVICE_NAME, SyslogEventSink, parse_facility};
pub use trace::{TRACE_TARGET, TracingTraceSink};

/// High-visibility destination for operator attention.
pub trait EventSink: Send + Sync {
    /// Write one event.
    fn write_event(
        &self,
        event_id: EventId,
        category: &Category,
        severity: EventSeverity,
        message: &str,
    ) -> Result<(), SinkError>;
}

/// Structured diagnostic trace destination.
pub trait TraceSink: Send + Sync {
    /// Write one trace entry.
    fn write_trace(
        &self,
        event_id: EventId,
        category: &Category,
        severity: TraceSeverity,
        message: &str,
    ) -> Result<(), SinkError>;
}

/// Unconditional, best-effort line sink.
pub trait MirrorSink: Send + Sync {
    /// Append one pre-formatted line. Never fails.
    fn write_line(&self, line: &str);
}
