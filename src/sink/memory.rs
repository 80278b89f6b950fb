//! Recording sink for tests and dry runs.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use super::error::SinkError;
use super::{EventSink, MirrorSink, TraceSink};
use crate::event::{Category, EventId, EventSeverity, TraceSeverity};

/// An event accepted by [`MemorySink`] as an [`EventSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    /// Event id.
    pub event_id: EventId,
    /// Category name.
    pub category: String,
    /// Event level.
    pub severity: EventSeverity,
    /// Message text.
    pub message: String,
}

/// A trace accepted by [`MemorySink`] as a [`TraceSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTrace {
    /// Event id.
    pub event_id: EventId,
    /// Category name.
    pub category: String,
    /// Trace level.
    pub severity: TraceSeverity,
    /// Message text.
    pub message: String,
}

/// Sink that records every write in memory.
///
/// Implements all three sink traits. Category thresholds are ignored, so
/// every write the router makes is visible. Event and trace writes can be
/// made to fail independently.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<RecordedEvent>>,
    traces: Mutex<Vec<RecordedTrace>>,
    lines: Mutex<Vec<String>>,
    fail_events: AtomicBool,
    fail_traces: AtomicBool,
}

impl MemorySink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent event write fail (or succeed again).
    pub fn fail_events(&self, fail: bool) {
        self.fail_events.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent trace write fail (or succeed again).
    pub fn fail_traces(&self, fail: bool) {
        self.fail_traces.store(fail, Ordering::SeqCst);
    }

    /// Events written so far.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Traces written so far.
    pub fn traces(&self) -> Vec<RecordedTrace> {
        self.traces.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Mirror lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl EventSink for MemorySink {
    fn write_event(
        &self,
        event_id: EventId,
        category: &Category,
        severity: EventSeverity,
        message: &str,
    ) -> Result<(), SinkError> {
        if self.fail_events.load(Ordering::SeqCst) {
            return Err(SinkError::Unavailable("event sink disabled".to_string()));
        }
        self.events
            .lock()
            .map_err(|_| SinkError::Poisoned)?
            .push(RecordedEvent {
                event_id,
                category: category.name().to_string(),
                severity,
                message: message.to_string(),
            });
        Ok(())
    }
}

impl TraceSink for MemorySink {
    fn write_trace(
        &self,
        event_id: EventId,
        category: &Category,
        severity: TraceSeverity,
        message: &str,
    ) -> Result<(), SinkError> {
        if self.fail_traces.load(Ordering::SeqCst) {
            return Err(SinkError::Unavailable("trace sink disabled".to_string()));
        }
        self.traces
            .lock()
            .map_err(|_| SinkError::Poisoned)?
            .push(RecordedTrace {
                event_id,
                category: category.name().to_string(),
                severity,
                message: message.to_string(),
            });
        Ok(())
    }
}

impl MirrorSink for MemorySink {
    fn write_line(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line.to_string());
    }
}
