//! Severity classes and the levels each sink understands.
//!
//! Callers speak in [`Severity`]. The router translates that into an
//! [`EventSeverity`] for the system log or a [`TraceSeverity`] for the
//! structured trace, depending on where the message is routed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of an application message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Something failed.
    Error,
    /// Something looks wrong but the operation continued.
    Warning,
    /// Normal operational information.
    Info,
    /// Diagnostic chatter. Only ever reaches the audit mirror.
    Verbose,
}

impl Severity {
    /// All severities in declaration order.
    pub const ALL: [Severity; 4] = [
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::Verbose,
    ];

    /// Label written into audit mirror lines.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
            Severity::Verbose => "Verbose",
        }
    }

    /// Level used when the message goes to the system log.
    ///
    /// Returns `None` for [`Severity::Verbose`], which is never eligible.
    pub fn event_severity(self) -> Option<EventSeverity> {
        match self {
            Severity::Error => Some(EventSeverity::Error),
            Severity::Warning => Some(EventSeverity::Warning),
            Severity::Info => Some(EventSeverity::Information),
            Severity::Verbose => None,
        }
    }

    /// Level used when the message goes to the structured trace.
    pub fn trace_severity(self) -> Option<TraceSeverity> {
        match self {
            Severity::Error => Some(TraceSeverity::Unexpected),
            Severity::Warning => Some(TraceSeverity::Monitorable),
            Severity::Info => Some(TraceSeverity::Medium),
            Severity::Verbose => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a severity name cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown severity '{0}' (expected error, warning, info or verbose)")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "info" | "information" => Ok(Severity::Info),
            "verbose" => Ok(Severity::Verbose),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

/// Level of a system log event, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSeverity {
    /// Nothing is written at this threshold.
    None,
    /// Critical failure.
    ErrorCritical,
    /// Error.
    Error,
    /// Warning.
    Warning,
    /// Informational.
    Information,
    /// Verbose.
    Verbose,
}

impl EventSeverity {
    // Lower is more severe. `None` sits below everything so that a
    // threshold of `None` admits nothing.
    fn rank(self) -> u8 {
        match self {
            EventSeverity::None => 0,
            EventSeverity::ErrorCritical => 1,
            EventSeverity::Error => 2,
            EventSeverity::Warning => 3,
            EventSeverity::Information => 4,
            EventSeverity::Verbose => 5,
        }
    }

    /// Whether an event at `self` passes a category threshold.
    pub fn passes(self, threshold: EventSeverity) -> bool {
        self != EventSeverity::None
            && threshold != EventSeverity::None
            && self.rank() <= threshold.rank()
    }
}

impl FromStr for EventSeverity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(EventSeverity::None),
            "error_critical" | "critical" => Ok(EventSeverity::ErrorCritical),
            "error" => Ok(EventSeverity::Error),
            "warning" => Ok(EventSeverity::Warning),
            "information" | "info" => Ok(EventSeverity::Information),
            "verbose" => Ok(EventSeverity::Verbose),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

/// Level of a structured trace entry, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceSeverity {
    /// Nothing is written at this threshold.
    None,
    /// An unexpected condition, usually an error.
    Unexpected,
    /// Something worth monitoring.
    Monitorable,
    /// High importance.
    High,
    /// Normal importance.
    Medium,
    /// Detailed diagnostics.
    Verbose,
    /// Extremely detailed diagnostics.
    VerboseEx,
}

impl TraceSeverity {
    fn rank(self) -> u8 {
        match self {
            TraceSeverity::None => 0,
            TraceSeverity::Unexpected => 1,
            TraceSeverity::Monitorable => 2,
            TraceSeverity::High => 3,
            TraceSeverity::Medium => 4,
            TraceSeverity::Verbose => 5,
            TraceSeverity::VerboseEx => 6,
        }
    }

    /// Whether a trace at `self` passes a category threshold.
    pub fn passes(self, threshold: TraceSeverity) -> bool {
        self != TraceSeverity::None
            && threshold != TraceSeverity::None
            && self.rank() <= threshold.rank()
    }
}

impl FromStr for TraceSeverity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(TraceSeverity::None),
            "unexpected" => Ok(TraceSeverity::Unexpected),
            "monitorable" => Ok(TraceSeverity::Monitorable),
            "high" => Ok(TraceSeverity::High),
            "medium" => Ok(TraceSeverity::Medium),
            "verbose" => Ok(TraceSeverity::Verbose),
            "verbose_ex" | "verboseex" => Ok(TraceSeverity::VerboseEx),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}
