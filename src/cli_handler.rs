//! Subcommand handling for sitelog.
//!
//! The demo front-end: each handler builds a [`LogRouter`] from configuration
//! and drives it the way an application would.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::event::{DEMO, EventId, Severity};
use crate::policy::ScopeKey;
use crate::router::LogRouter;
use crate::sink::MemorySink;

/// Messages fired by `sitelog demo`, in order.
pub const DEMO_MESSAGES: [(Severity, &str); 4] = [
    (Severity::Error, "This is a test error message"),
    (Severity::Warning, "This is a test warning message"),
    (Severity::Info, "This is a test info message"),
    (Severity::Verbose, "This is a test verbose message"),
];

/// Handle the parsed command line against a loaded configuration.
pub fn handle_command(cli: &Cli, config: &Config) -> Result<()> {
    let scope = cli.scope_key();

    match &cli.command {
        Commands::Demo { dry_run } => {
            let (router, recorder) = build_router(config, *dry_run)?;
            run_demo(&router, scope.as_ref());
            if let Some(recorder) = recorder {
                print_summary(&recorder);
            }
            Ok(())
        }
        Commands::Emit {
            severity,
            category,
            event_id,
            dry_run,
            message,
        } => {
            let (router, recorder) = build_router(config, *dry_run)?;
            router.emit(*severity, *event_id, category, message, scope.as_ref());
            if let Some(recorder) = recorder {
                print_summary(&recorder);
            }
            Ok(())
        }
        Commands::Categories => {
            list_categories(config);
            Ok(())
        }
        Commands::Config => {
            let text = config.to_toml().context("Failed to render configuration")?;
            print!("{}", text);
            Ok(())
        }
    }
}

/// Fire the demo messages through `router`.
pub fn run_demo(router: &LogRouter, scope: Option<&ScopeKey>) {
    for (severity, message) in DEMO_MESSAGES {
        debug!("Demo: {} message", severity);
        router.emit(severity, EventId::GeneralMessage, DEMO, message, scope);
    }
}

/// Build a router from config. With `dry_run`, every sink is a shared
/// [`MemorySink`] which is returned alongside and no mirror file is opened.
fn build_router(config: &Config, dry_run: bool) -> Result<(LogRouter, Option<Arc<MemorySink>>)> {
    if !dry_run {
        let builder = config
            .router_builder()
            .context("Failed to configure log router")?;
        return Ok((builder.build(), None));
    }

    let recorder = Arc::new(MemorySink::new());
    let router = config
        .base_router_builder()
        .context("Failed to configure log router")?
        .event_sink(recorder.clone())
        .trace_sink(recorder.clone())
        .mirror(recorder.clone())
        .build();
    Ok((router, Some(recorder)))
}

fn print_summary(recorder: &MemorySink) {
    println!("Event log:");
    for event in recorder.events() {
        println!(
            "  [{}] {:?} {}: {}",
            event.event_id, event.severity, event.category, event.message
        );
    }
    println!("Trace log:");
    for trace in recorder.traces() {
        println!(
            "  [{}] {:?} {}: {}",
            trace.event_id, trace.severity, trace.category, trace.message
        );
    }
    println!("Mirror:");
    for line in recorder.lines() {
        println!("  {}", line);
    }
}

fn list_categories(config: &Config) {
    let registry = config.category_registry();
    println!("Area: {}", registry.area());
    for category in registry.iter() {
        println!(
            "  {:<16} trace >= {:?}, event >= {:?}",
            category.name(),
            category.trace_threshold(),
            category.event_threshold()
        );
    }
}
