//! Serialized form of a system log event.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::category::Category;
use super::event_id::EventId;
use super::severity::EventSeverity;

/// One event as written to the system log.
///
/// Serialized as a single JSON object with an ISO8601 timestamp:
///
/// ```json
/// {"ts":"2026-01-07T14:32:01Z","event_id":1001,"area":"HowCanIDoIt","category":"Demo","severity":"error","message":"boom"}
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord<'a> {
    /// ISO8601 timestamp.
    #[serde(rename = "ts")]
    pub timestamp: DateTime<Utc>,
    /// Numeric event id.
    pub event_id: u16,
    /// Area (application) name.
    pub area: &'a str,
    /// Category name.
    pub category: &'a str,
    /// Event level.
    pub severity: EventSeverity,
    /// Message text.
    pub message: &'a str,
}

impl<'a> EventRecord<'a> {
    /// Build a record stamped with the current time.
    pub fn now(
        event_id: EventId,
        category: &'a Category,
        severity: EventSeverity,
        message: &'a str,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            event_id: event_id.code(),
            area: category.area(),
            category: category.name(),
            severity,
            message,
        }
    }

    /// Serialize to a single JSON line.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
