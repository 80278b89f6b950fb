//! Destination policy and the scope it applies to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::Severity;

/// Which severities go to the system log instead of the structured trace.
///
/// The default routes every eligible severity to the system log, so a scope
/// with no explicit configuration fails open toward visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationPolicy {
    /// Route errors to the system log.
    pub error: bool,
    /// Route warnings to the system log.
    pub warning: bool,
    /// Route informational messages to the system log.
    pub info: bool,
}

impl DestinationPolicy {
    /// Policy that sends nothing to the system log.
    pub const TRACE_ONLY: DestinationPolicy = DestinationPolicy {
        error: false,
        warning: false,
        info: false,
    };

    /// Whether `severity` should be written to the system log.
    ///
    /// Verbose messages are never eligible.
    pub fn routes_to_event_log(&self, severity: Severity) -> bool {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
            Severity::Verbose => false,
        }
    }
}

impl Default for DestinationPolicy {
    fn default() -> Self {
        Self {
            error: true,
            warning: true,
            info: true,
        }
    }
}

/// Opaque key partitioning policy configuration, e.g. one per site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeKey(String);

impl ScopeKey {
    const GLOBAL: &'static str = "__global__";

    /// Create a scope key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Process-wide fallback scope.
    pub fn global() -> Self {
        Self(Self::GLOBAL.to_string())
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScopeKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ScopeKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}
