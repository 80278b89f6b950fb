use std::sync::Arc;
use std::thread;

use sitelog::event::{CategoryRegistry, EventId, EventSeverity, Severity, TraceSeverity};
use sitelog::policy::{DestinationPolicy, MemoryPolicyStore, PolicyCache, PolicyStore, ScopeKey};
use sitelog::router::LogRouter;
use sitelog::sink::MemorySink;

/// Router whose three sinks are separate recorders.
struct Harness {
    router: LogRouter,
    events: Arc<MemorySink>,
    traces: Arc<MemorySink>,
    mirror: Arc<MemorySink>,
    store: Arc<MemoryPolicyStore>,
}

fn harness() -> Harness {
    let events = Arc::new(MemorySink::new());
    let traces = Arc::new(MemorySink::new());
    let mirror = Arc::new(MemorySink::new());
    let store = Arc::new(MemoryPolicyStore::new());

    let router = LogRouter::builder(CategoryRegistry::builtin("HowCanIDoIt"))
        .policy_cache(PolicyCache::new(store.clone(), DestinationPolicy::default()))
        .event_sink(events.clone())
        .trace_sink(traces.clone())
        .mirror(mirror.clone())
        .build();

    Harness {
        router,
        events,
        traces,
        mirror,
        store,
    }
}

fn site1() -> ScopeKey {
    ScopeKey::new("site1")
}

#[test]
fn test_error_with_empty_cache_goes_to_event_log() {
    let h = harness();

    h.router
        .emit(Severity::Error, EventId::GeneralMessage, "Demo", "boom", Some(&site1()));

    // Default policy was created and cached for the scope.
    assert_eq!(h.store.get(&site1()), Some(DestinationPolicy::default()));

    let events = h.events.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_id.code(), 1001);
    assert_eq!(events[0].category, "Demo");
    assert_eq!(events[0].severity, EventSeverity::Error);
    assert_eq!(events[0].message, "boom");
    assert!(h.traces.traces().is_empty());

    let lines = h.mirror.lines();
    assert_eq!(lines.len(), 1);
    for field in ["HowCanIDoIt", "Error", "1001", "Demo", "boom"] {
        assert!(lines[0].contains(field), "missing {field} in {}", lines[0]);
    }
}

#[test]
fn test_error_disabled_in_policy_goes_to_trace_log() {
    let h = harness();
    h.store.set(
        site1(),
        DestinationPolicy {
            error: false,
            ..DestinationPolicy::default()
        },
    );

    h.router
        .emit(Severity::Error, EventId::GeneralMessage, "Demo", "boom", Some(&site1()));

    let traces = h.traces.traces();
    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].category, "Demo");
    assert_eq!(traces[0].severity, TraceSeverity::Unexpected);
    assert_eq!(traces[0].message, "boom");
    assert!(h.events.events().is_empty());
    assert_eq!(h.mirror.lines().len(), 1);
}

#[test]
fn test_failing_event_log_reports_and_does_not_fail_over() {
    let h = harness();
    h.events.fail_events(true);

    h.router
        .emit(Severity::Error, EventId::GeneralMessage, "Demo", "boom", Some(&site1()));

    let lines = h.mirror.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("1005"));
    assert!(lines[0].contains("Unable to write to event log"));
    assert_eq!(lines[1], "HowCanIDoIt : Error : 1001 : Demo : boom");
    assert!(h.traces.traces().is_empty());
}

#[test]
fn test_each_eligible_severity_follows_its_flag() {
    for severity in [Severity::Error, Severity::Warning, Severity::Info] {
        for flag in [true, false] {
            let h = harness();
            let mut policy = DestinationPolicy::TRACE_ONLY;
            match severity {
                Severity::Error => policy.error = flag,
                Severity::Warning => policy.warning = flag,
                Severity::Info => policy.info = flag,
                Severity::Verbose => unreachable!(),
            }
            h.store.set(site1(), policy);

            h.router
                .emit(severity, EventId::GeneralMessage, "General", "m", Some(&site1()));

            let (expected_events, expected_traces) = if flag { (1, 0) } else { (0, 1) };
            assert_eq!(h.events.events().len(), expected_events, "{severity} {flag}");
            assert_eq!(h.traces.traces().len(), expected_traces, "{severity} {flag}");
        }
    }
}

#[test]
fn test_verbose_never_reaches_event_or_trace_log() {
    let h = harness();

    h.router.verbose("Demo", "chatter");
    h.router
        .emit(Severity::Verbose, EventId::CacheMiss, "General", "more", Some(&site1()));

    assert!(h.events.events().is_empty());
    assert!(h.traces.traces().is_empty());
    let lines = h.mirror.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "HowCanIDoIt : Verbose : Verbose : General : more");
}

#[test]
fn test_mirror_line_per_call_regardless_of_outcome() {
    let h = harness();
    h.store.set(ScopeKey::new("quiet"), DestinationPolicy::TRACE_ONLY);

    let calls = [
        (Severity::Error, Some(site1())),
        (Severity::Warning, Some(ScopeKey::new("quiet"))),
        (Severity::Info, Some(site1())),
        (Severity::Verbose, None),
    ];
    for (severity, scope) in &calls {
        h.router
            .emit(*severity, EventId::GeneralMessage, "General", "m", scope.as_ref());
    }

    assert_eq!(h.mirror.lines().len(), calls.len());
}

#[test]
fn test_unresolved_scope_fails_open() {
    let h = harness();

    h.router.warning(EventId::GeneralMessage, "General", "no scope", None);

    assert_eq!(h.events.events().len(), 1);
    let lines = h.mirror.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("1009"));
    assert!(lines[0].contains("Unable to check log configuration"));
    assert!(h.store.is_empty());
}

#[test]
fn test_concurrent_emits_each_mirror_once() {
    let h = Arc::new(harness());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let h = Arc::clone(&h);
            thread::spawn(move || {
                for _ in 0..25 {
                    h.router.info(
                        EventId::GeneralMessage,
                        "General",
                        &format!("thread {i}"),
                        Some(&ScopeKey::new("shared")),
                    );
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(h.mirror.lines().len(), 100);
    assert_eq!(h.events.events().len(), 100);
    // The first-access race on "shared" may write the default several times;
    // it still ends up as a single entry holding the default.
    assert_eq!(h.store.len(), 1);
    assert_eq!(
        h.store.get(&ScopeKey::new("shared")),
        Some(DestinationPolicy::default())
    );
}
