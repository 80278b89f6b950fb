//! Severity-routed log router.
//!
//! # Routing
//!
//! For every call to [`LogRouter::emit`]:
//!
//! 1. Resolve the category name (unknown names fall back to `Unknown`)
//! 2. Resolve the scope: the explicit one, else the router's default scope,
//!    else report an unresolved scope and fail open to the event log
//! 3. Look up the scope's [`DestinationPolicy`](crate::policy::DestinationPolicy) for the severity
//! 4. Write to the event sink if the policy says so, otherwise to the trace
//!    sink. A failed write is reported to the mirror; there is no failover
//!    to the other sink
//! 5. Always write the audit line to the mirror
//!
//! Verbose messages skip steps 2-4.
//!
//! # Mirror Line Format
//!
//! ```text
//! HowCanIDoIt : Error : 1001 : Demo : boom
//! HowCanIDoIt : Verbose : Verbose : Demo : chatter
//! HowCanIDoIt : Error : 1005 : Logging Error : Unable to write to event log. ...
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sitelog::event::{CategoryRegistry, EventId};
//! use sitelog::policy::ScopeKey;
//! use sitelog::router::LogRouter;
//! use sitelog::sink::MemorySink;
//!
//! let sink = Arc::new(MemorySink::new());
//! let router = LogRouter::builder(CategoryRegistry::builtin("HowCanIDoIt"))
//!     .event_sink(sink.clone())
//!     .trace_sink(sink.clone())
//!     .mirror(sink.clone())
//!     .build();
//!
//! router.error(EventId::GeneralMessage, "Demo", "boom", Some(&ScopeKey::new("site1")));
//!
//! assert_eq!(sink.events().len(), 1);
//! assert_eq!(sink.lines(), vec!["HowCanIDoIt : Error : 1001 : Demo : boom"]);
//! ```

mod fault;

use std::sync::Arc;

use tracing::trace;

use crate::event::{Category, CategoryRegistry, EventId, Severity};
use crate::policy::{PolicyCache, ScopeKey};
use crate::sink::{EventSink, MirrorSink, SyslogEventSink, TraceSink, TracingTraceSink, WriterMirror};

pub use fault::{RoutingFault, SinkKind};

/// Category field written on router diagnostic lines.
pub const DIAGNOSTIC_CATEGORY: &str = "Logging Error";

/// Routes messages to the event log or trace log and mirrors every call.
pub struct LogRouter {
    application_name: String,
    categories: Arc<CategoryRegistry>,
    policies: PolicyCache,
    ambient_scope: Option<ScopeKey>,
    event_sink: Arc<dyn EventSink>,
    trace_sink: Arc<dyn TraceSink>,
    mirror: Arc<dyn MirrorSink>,
}

impl LogRouter {
    /// Start building a router over `categories`.
    ///
    /// The application name defaults to the registry's area.
    pub fn builder(categories: CategoryRegistry) -> LogRouterBuilder {
        LogRouterBuilder {
            application_name: categories.area().to_string(),
            categories: Arc::new(categories),
            policies: None,
            ambient_scope: None,
            event_sink: None,
            trace_sink: None,
            mirror: None,
        }
    }

    /// Application name written at the start of every mirror line.
    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    /// Registered categories.
    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    /// Scope used when a call supplies none.
    pub fn ambient_scope(&self) -> Option<&ScopeKey> {
        self.ambient_scope.as_ref()
    }

    /// Route one message. Never fails from the caller's point of view.
    ///
    /// `event_id` is ignored for [`Severity::Verbose`].
    pub fn emit(
        &self,
        severity: Severity,
        event_id: EventId,
        category: &str,
        message: &str,
        scope: Option<&ScopeKey>,
    ) {
        if severity == Severity::Verbose {
            self.mirror_line(severity.label(), "Verbose", category, message);
            return;
        }

        let resolved = self.categories.resolve(category);

        if let Some(fault) = self.route(severity, event_id, resolved, message, scope) {
            self.report(&fault);
        }

        self.mirror_line(
            severity.label(),
            &event_id.code().to_string(),
            category,
            message,
        );
    }

    /// Log an error.
    pub fn error(&self, event_id: EventId, category: &str, message: &str, scope: Option<&ScopeKey>) {
        self.emit(Severity::Error, event_id, category, message, scope);
    }

    /// Log a warning.
    pub fn warning(
        &self,
        event_id: EventId,
        category: &str,
        message: &str,
        scope: Option<&ScopeKey>,
    ) {
        self.emit(Severity::Warning, event_id, category, message, scope);
    }

    /// Log an informational message.
    pub fn info(&self, event_id: EventId, category: &str, message: &str, scope: Option<&ScopeKey>) {
        self.emit(Severity::Info, event_id, category, message, scope);
    }

    /// Log a verbose message. Only the mirror receives it.
    pub fn verbose(&self, category: &str, message: &str) {
        self.emit(
            Severity::Verbose,
            EventId::GeneralMessage,
            category,
            message,
            None,
        );
    }

    // Steps 2-4. An unresolved scope is reported before the write; a sink
    // failure is returned for the caller to report.
    fn route(
        &self,
        severity: Severity,
        event_id: EventId,
        category: &Category,
        message: &str,
        scope: Option<&ScopeKey>,
    ) -> Option<RoutingFault> {
        let to_event_log = match scope.or(self.ambient_scope.as_ref()) {
            Some(scope) => self
                .policies
                .resolve(Some(scope))
                .routes_to_event_log(severity),
            None => {
                self.report(&RoutingFault::PolicyScopeUnresolved);
                true
            }
        };

        if to_event_log {
            let level = severity.event_severity()?;
            trace!(event_id = event_id.code(), "Routing to event log");
            self.event_sink
                .write_event(event_id, category, level, message)
                .err()
                .map(|source| RoutingFault::SinkWriteFailed {
                    sink: SinkKind::EventLog,
                    source,
                })
        } else {
            let level = severity.trace_severity()?;
            trace!(event_id = event_id.code(), "Routing to trace log");
            self.trace_sink
                .write_trace(event_id, category, level, message)
                .err()
                .map(|source| RoutingFault::SinkWriteFailed {
                    sink: SinkKind::TraceLog,
                    source,
                })
        }
    }

    fn report(&self, fault: &RoutingFault) {
        self.mirror_line(
            Severity::Error.label(),
            &fault.event_id().code().to_string(),
            DIAGNOSTIC_CATEGORY,
            &fault.to_string(),
        );
    }

    fn mirror_line(&self, label: &str, event: &str, category: &str, message: &str) {
        self.mirror
            .write_line(&format_line(&self.application_name, label, event, category, message));
    }
}

impl std::fmt::Debug for LogRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogRouter")
            .field("application_name", &self.application_name)
            .field("ambient_scope", &self.ambient_scope)
            .field("policies", &self.policies)
            .finish_non_exhaustive()
    }
}

/// Format a mirror line: application, label, event, category, message.
pub fn format_line(
    application: &str,
    label: &str,
    event: &str,
    category: &str,
    message: &str,
) -> String {
    format!(
        "{} : {} : {} : {} : {}",
        application, label, event, category, message
    )
}

/// Builder for [`LogRouter`].
pub struct LogRouterBuilder {
    application_name: String,
    categories: Arc<CategoryRegistry>,
    policies: Option<PolicyCache>,
    ambient_scope: Option<ScopeKey>,
    event_sink: Option<Arc<dyn EventSink>>,
    trace_sink: Option<Arc<dyn TraceSink>>,
    mirror: Option<Arc<dyn MirrorSink>>,
}

impl LogRouterBuilder {
    /// Override the application name.
    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = name.into();
        self
    }

    /// Use `policies` instead of a fresh in-memory cache.
    pub fn policy_cache(mut self, policies: PolicyCache) -> Self {
        self.policies = Some(policies);
        self
    }

    /// Scope used when a call supplies none.
    pub fn ambient_scope(mut self, scope: Option<ScopeKey>) -> Self {
        self.ambient_scope = scope;
        self
    }

    /// Event sink. Defaults to [`SyslogEventSink`].
    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    /// Trace sink. Defaults to [`TracingTraceSink`].
    pub fn trace_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.trace_sink = Some(sink);
        self
    }

    /// Mirror sink. Defaults to standard error.
    pub fn mirror(mut self, sink: Arc<dyn MirrorSink>) -> Self {
        self.mirror = Some(sink);
        self
    }

    /// Build the router.
    pub fn build(self) -> LogRouter {
        LogRouter {
            application_name: self.application_name,
            categories: self.categories,
            policies: self.policies.unwrap_or_else(PolicyCache::in_memory),
            ambient_scope: self.ambient_scope,
            event_sink: self
                .event_sink
                .unwrap_or_else(|| Arc::new(SyslogEventSink::default())),
            trace_sink: self
                .trace_sink
                .unwrap_or_else(|| Arc::new(TracingTraceSink::new())),
            mirror: self
                .mirror
                .unwrap_or_else(|| Arc::new(WriterMirror::stderr())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventSeverity, TraceSeverity};
    use crate::policy::{DestinationPolicy, MemoryPolicyStore, PolicyStore};
    use crate::sink::MemorySink;

    fn router_with(sink: &Arc<MemorySink>, policies: PolicyCache) -> LogRouter {
        LogRouter::builder(CategoryRegistry::builtin("HowCanIDoIt"))
            .policy_cache(policies)
            .event_sink(sink.clone())
            .trace_sink(sink.clone())
            .mirror(sink.clone())
            .build()
    }

    fn site1() -> ScopeKey {
        ScopeKey::new("site1")
    }

    #[test]
    fn test_routes_to_event_log_when_policy_true() {
        let sink = Arc::new(MemorySink::new());
        let router = router_with(&sink, PolicyCache::in_memory());

        for severity in [Severity::Error, Severity::Warning, Severity::Info] {
            router.emit(severity, EventId::GeneralMessage, "Demo", "msg", Some(&site1()));
        }

        let events = sink.events();
        assert_eq!(events.len(), 3);
        assert!(sink.traces().is_empty());
        assert_eq!(events[0].severity, EventSeverity::Error);
        assert_eq!(events[1].severity, EventSeverity::Warning);
        assert_eq!(events[2].severity, EventSeverity::Information);
    }

    #[test]
    fn test_routes_to_trace_log_when_policy_false() {
        let sink = Arc::new(MemorySink::new());
        let store = Arc::new(MemoryPolicyStore::new());
        store.set(site1(), DestinationPolicy::TRACE_ONLY);
        let router = router_with(&sink, PolicyCache::new(store, DestinationPolicy::default()));

        for severity in [Severity::Error, Severity::Warning, Severity::Info] {
            router.emit(severity, EventId::GeneralMessage, "Demo", "msg", Some(&site1()));
        }

        let traces = sink.traces();
        assert_eq!(traces.len(), 3);
        assert!(sink.events().is_empty());
        assert_eq!(traces[0].severity, TraceSeverity::Unexpected);
        assert_eq!(traces[1].severity, TraceSeverity::Monitorable);
        assert_eq!(traces[2].severity, TraceSeverity::Medium);
    }

    #[test]
    fn test_verbose_only_reaches_mirror() {
        let sink = Arc::new(MemorySink::new());
        let router = router_with(&sink, PolicyCache::in_memory());

        router.verbose("Demo", "chatter");

        assert!(sink.events().is_empty());
        assert!(sink.traces().is_empty());
        assert_eq!(
            sink.lines(),
            vec!["HowCanIDoIt : Verbose : Verbose : Demo : chatter"]
        );
    }

    #[test]
    fn test_verbose_does_not_touch_policy_cache() {
        let sink = Arc::new(MemorySink::new());
        let store = Arc::new(MemoryPolicyStore::new());
        let router = router_with(
            &sink,
            PolicyCache::new(store.clone(), DestinationPolicy::default()),
        );

        router.emit(
            Severity::Verbose,
            EventId::GeneralMessage,
            "Demo",
            "chatter",
            Some(&site1()),
        );

        assert!(store.is_empty());
    }

    #[test]
    fn test_unknown_category_substituted_for_sink_but_not_mirror() {
        let sink = Arc::new(MemorySink::new());
        let router = router_with(&sink, PolicyCache::in_memory());

        router.error(EventId::GeneralMessage, "Billing", "boom", Some(&site1()));

        assert_eq!(sink.events()[0].category, "Unknown");
        assert_eq!(
            sink.lines(),
            vec!["HowCanIDoIt : Error : 1001 : Billing : boom"]
        );
    }

    #[test]
    fn test_unresolved_scope_fails_open_and_reports() {
        let sink = Arc::new(MemorySink::new());
        let router = router_with(&sink, PolicyCache::in_memory());

        router.info(EventId::GeneralMessage, "General", "hello", None);

        assert_eq!(sink.events().len(), 1);
        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("HowCanIDoIt : Error : 1009 : Logging Error : "));
        assert_eq!(lines[1], "HowCanIDoIt : Info : 1001 : General : hello");
    }

    #[test]
    fn test_ambient_scope_used_when_none_supplied() {
        let sink = Arc::new(MemorySink::new());
        let store = Arc::new(MemoryPolicyStore::new());
        store.set(ScopeKey::new("ambient"), DestinationPolicy::TRACE_ONLY);
        let router = LogRouter::builder(CategoryRegistry::builtin("HowCanIDoIt"))
            .policy_cache(PolicyCache::new(store, DestinationPolicy::default()))
            .ambient_scope(Some(ScopeKey::new("ambient")))
            .event_sink(sink.clone())
            .trace_sink(sink.clone())
            .mirror(sink.clone())
            .build();

        router.warning(EventId::GeneralMessage, "General", "careful", None);

        assert_eq!(sink.traces().len(), 1);
        assert_eq!(sink.lines().len(), 1);
    }

    #[test]
    fn test_explicit_scope_beats_ambient() {
        let sink = Arc::new(MemorySink::new());
        let store = Arc::new(MemoryPolicyStore::new());
        store.set(ScopeKey::new("ambient"), DestinationPolicy::TRACE_ONLY);
        let router = LogRouter::builder(CategoryRegistry::builtin("HowCanIDoIt"))
            .policy_cache(PolicyCache::new(store, DestinationPolicy::default()))
            .ambient_scope(Some(ScopeKey::new("ambient")))
            .event_sink(sink.clone())
            .trace_sink(sink.clone())
            .mirror(sink.clone())
            .build();

        router.warning(EventId::GeneralMessage, "General", "careful", Some(&site1()));

        assert_eq!(sink.events().len(), 1);
        assert!(sink.traces().is_empty());
    }

    #[test]
    fn test_event_failure_has_no_trace_failover() {
        let sink = Arc::new(MemorySink::new());
        sink.fail_events(true);
        let router = router_with(&sink, PolicyCache::in_memory());

        router.error(EventId::GeneralMessage, "Demo", "boom", Some(&site1()));

        assert!(sink.events().is_empty());
        assert!(sink.traces().is_empty());
        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(
            "HowCanIDoIt : Error : 1005 : Logging Error : Unable to write to event log."
        ));
        assert!(lines[0].contains("event sink disabled"));
        assert_eq!(lines[1], "HowCanIDoIt : Error : 1001 : Demo : boom");
    }

    #[test]
    fn test_trace_failure_reported_with_cause() {
        let sink = Arc::new(MemorySink::new());
        sink.fail_traces(true);
        let store = Arc::new(MemoryPolicyStore::new());
        store.set(site1(), DestinationPolicy::TRACE_ONLY);
        let router = router_with(&sink, PolicyCache::new(store, DestinationPolicy::default()));

        router.info(EventId::GeneralMessage, "Demo", "hi", Some(&site1()));

        assert!(sink.events().is_empty());
        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(" : 1006 : Logging Error : Unable to write to trace log."));
        assert!(lines[0].contains("trace sink disabled"));
    }

    #[test]
    fn test_application_name_override() {
        let sink = Arc::new(MemorySink::new());
        let router = LogRouter::builder(CategoryRegistry::builtin("area"))
            .application_name("Other")
            .mirror(sink.clone())
            .build();

        router.verbose("Demo", "x");

        assert_eq!(router.application_name(), "Other");
        assert_eq!(sink.lines(), vec!["Other : Verbose : Verbose : Demo : x"]);
    }

    #[test]
    fn test_format_line_field_order() {
        assert_eq!(
            format_line("App", "Warning", "1001", "General", "msg"),
            "App : Warning : 1001 : General : msg"
        );
    }

    #[test]
    fn test_router_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LogRouter>();
    }
}
