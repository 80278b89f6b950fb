//! Structured trace sink backed by `tracing`.

use tracing::{debug, error, info, trace, warn};

use super::TraceSink;
use super::error::SinkError;
use crate::event::{Category, EventId, TraceSeverity};

/// `tracing` target of every trace-log entry.
pub const TRACE_TARGET: &str = "sitelog::trace";

/// Trace sink that emits `tracing` events under the `sitelog::trace` target.
///
/// Each event carries `event_id`, `area`, `category` and `trace_severity`
/// fields so a subscriber can filter or index on them. Entries below the
/// category's trace threshold are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTraceSink;

impl TracingTraceSink {
    /// Create a tracing trace sink.
    pub fn new() -> Self {
        Self
    }
}

macro_rules! emit_trace {
    ($level:ident, $event_id:expr, $category:expr, $severity:expr, $message:expr) => {
        $level!(
            target: TRACE_TARGET,
            event_id = $event_id.code(),
            area = $category.area(),
            category = $category.name(),
            trace_severity = ?$severity,
            "{}",
            $message
        )
    };
}

impl TraceSink for TracingTraceSink {
    fn write_trace(
        &self,
        event_id: EventId,
        category: &Category,
        severity: TraceSeverity,
        message: &str,
    ) -> Result<(), SinkError> {
        if !category.admits_trace(severity) {
            return Ok(());
        }

        match severity {
            TraceSeverity::Unexpected => emit_trace!(error, event_id, category, severity, message),
            TraceSeverity::Monitorable | TraceSeverity::High => {
                emit_trace!(warn, event_id, category, severity, message)
            }
            TraceSeverity::Medium => emit_trace!(info, event_id, category, severity, message),
            TraceSeverity::Verbose => emit_trace!(debug, event_id, category, severity, message),
            TraceSeverity::VerboseEx => emit_trace!(trace, event_id, category, severity, message),
            TraceSeverity::None => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::CategoryRegistry;

    #[test]
    fn test_tracing_sink_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TracingTraceSink>();
    }

    #[test]
    fn test_write_trace_never_fails() {
        let registry = CategoryRegistry::builtin("app");
        let sink = TracingTraceSink::new();

        // May not appear without a subscriber.
        for severity in [
            TraceSeverity::Unexpected,
            TraceSeverity::Monitorable,
            TraceSeverity::Medium,
            TraceSeverity::Verbose,
            TraceSeverity::VerboseEx,
        ] {
            assert!(
                sink.write_trace(
                    EventId::GeneralMessage,
                    registry.resolve("Demo"),
                    severity,
                    "trace test"
                )
                .is_ok()
            );
        }
    }

    #[test]
    fn test_as_trait_object() {
        let registry = CategoryRegistry::builtin("app");
        let sink: Box<dyn TraceSink> = Box::new(TracingTraceSink);
        assert!(
            sink.write_trace(
                EventId::GeneralMessage,
                registry.unknown(),
                TraceSeverity::Medium,
                "below Unknown threshold"
            )
            .is_ok()
        );
    }
}
