//! System log sink.
//!
//! Events are written as JSON records to the local syslog daemon, tagged with
//! the configured service name.

use std::sync::Mutex;

use syslog::{Facility, Formatter3164, LoggerBackend};
use tracing::{debug, trace, warn};

use super::EventSink;
use super::error::SinkError;
use crate::event::{Category, EventId, EventRecord, EventSeverity};

/// Default syslog tag.
pub const DEFAULT_SERVICE_NAME: &str = "Workspace2 Logging Service";

type SyslogWriter = syslog::Logger<LoggerBackend, Formatter3164>;

/// Parse a syslog facility name (`user`, `daemon`, `local0`..`local7`, ...).
pub fn parse_facility(name: &str) -> Option<Facility> {
    let facility = match name.trim().to_ascii_lowercase().as_str() {
        "kern" => Facility::LOG_KERN,
        "user" => Facility::LOG_USER,
        "mail" => Facility::LOG_MAIL,
        "daemon" => Facility::LOG_DAEMON,
        "auth" => Facility::LOG_AUTH,
        "syslog" => Facility::LOG_SYSLOG,
        "lpr" => Facility::LOG_LPR,
        "news" => Facility::LOG_NEWS,
        "uucp" => Facility::LOG_UUCP,
        "cron" => Facility::LOG_CRON,
        "authpriv" => Facility::LOG_AUTHPRIV,
        "ftp" => Facility::LOG_FTP,
        "local0" => Facility::LOG_LOCAL0,
        "local1" => Facility::LOG_LOCAL1,
        "local2" => Facility::LOG_LOCAL2,
        "local3" => Facility::LOG_LOCAL3,
        "local4" => Facility::LOG_LOCAL4,
        "local5" => Facility::LOG_LOCAL5,
        "local6" => Facility::LOG_LOCAL6,
        "local7" => Facility::LOG_LOCAL7,
        _ => return None,
    };
    Some(facility)
}

/// Event sink backed by the local syslog daemon.
///
/// The connection is opened on first write rather than at construction, so
/// a missing daemon surfaces as a failed write the router can report. After
/// a failed write the connection is dropped and retried on the next event.
pub struct SyslogEventSink {
    service_name: String,
    facility: Facility,
    writer: Mutex<Option<SyslogWriter>>,
}

impl SyslogEventSink {
    /// Create a sink tagging events with `service_name`.
    pub fn new(service_name: impl Into<String>, facility: Facility) -> Self {
        Self {
            service_name: service_name.into(),
            facility,
            writer: Mutex::new(None),
        }
    }

    /// Service name used as the syslog tag.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn connect(&self) -> Result<SyslogWriter, SinkError> {
        let formatter = Formatter3164 {
            facility: self.facility,
            hostname: None,
            process: self.service_name.clone(),
            pid: std::process::id(),
        };

        let writer = syslog::unix(formatter).map_err(|e| {
            SinkError::Unavailable(format!("Failed to connect to syslog: {}", e))
        })?;

        debug!("Connected to syslog with tag '{}'", self.service_name);
        Ok(writer)
    }
}

impl Default for SyslogEventSink {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_NAME, Facility::LOG_USER)
    }
}

impl std::fmt::Debug for SyslogEventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyslogEventSink")
            .field("service_name", &self.service_name)
            .finish_non_exhaustive()
    }
}

impl EventSink for SyslogEventSink {
    fn write_event(
        &self,
        event_id: EventId,
        category: &Category,
        severity: EventSeverity,
        message: &str,
    ) -> Result<(), SinkError> {
        if !category.admits_event(severity) {
            trace!(
                category = category.name(),
                ?severity,
                "Event below category threshold, dropped"
            );
            return Ok(());
        }

        let json = EventRecord::now(event_id, category, severity, message).to_json()?;

        let mut guard = self.writer.lock().map_err(|_| SinkError::Poisoned)?;
        if guard.is_none() {
            *guard = Some(self.connect()?);
        }
        let Some(writer) = guard.as_mut() else {
            return Err(SinkError::Unavailable("Syslog writer missing".to_string()));
        };

        let result = match severity {
            EventSeverity::ErrorCritical => writer.crit(&json),
            EventSeverity::Error => writer.err(&json),
            EventSeverity::Warning => writer.warning(&json),
            EventSeverity::Information => writer.info(&json),
            EventSeverity::Verbose => writer.debug(&json),
            EventSeverity::None => return Ok(()),
        };

        if let Err(e) = result {
            warn!("Failed to write to syslog, will reconnect: {}", e);
            *guard = None;
            return Err(SinkError::Write(e.to_string()));
        }

        debug!("Logged event: {}", json);
        Ok(())
    }
}
