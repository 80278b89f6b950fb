//! sitelog: severity-routed application logging
//!
//! This is the entry point for the sitelog demo binary. It handles CLI
//! argument parsing, configuration loading and tracing initialization, then
//! hands off to the subcommand handler.
//!
//! # Output Streams
//!
//! - **System log**: error/warning/info messages routed to the event log go to
//!   syslog
//! - **Trace log**: messages routed to the trace log are `tracing` events on
//!   stderr, filtered like the rest of the debug output
//! - **Mirror**: audit lines go to stderr or the configured file
//! - **stdout**: only subcommand output (dry-run summaries, listings)

use anyhow::{Context, Result};
use clap::Parser;
use sitelog::{cli::Cli, cli_handler, config::ConfigLoader, sink::TRACE_TARGET};
use tracing::debug;
use tracing_subscriber::{EnvFilter, filter::Directive};

fn main() -> Result<()> {
    // Parse CLI arguments first (before any other initialization)
    let cli = Cli::parse();

    // Configuration is loaded before tracing so `general.log_level` can
    // apply; loader debug output is therefore not visible.
    let config_loader = ConfigLoader::new();
    let config = config_loader
        .load(&cli)
        .context("Failed to load configuration")?;

    init_tracing(cli.verbose, config.general.log_level.as_deref())?;

    debug!("Parsed CLI arguments: {:?}", cli);
    debug!("Loaded configuration: {:?}", config);

    cli_handler::handle_command(&cli, &config)
}

/// Initialize the tracing subscriber.
fn init_tracing(verbose: u8, configured: Option<&str>) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*};

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(tracing_filter(verbose, configured)?)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}

/// Build the subscriber filter.
///
/// The trace log target is always enabled at every level; category
/// thresholds decide what reaches it. The verbosity ladder only governs
/// internal diagnostics:
///
/// # Verbosity Levels
/// - 0 (default): `RUST_LOG`, else `general.log_level`, else warnings and errors
/// - 1 (-v): Info level
/// - 2 (-vv): Debug level
/// - 3+ (-vvv): Trace level
fn tracing_filter(verbose: u8, configured: Option<&str>) -> Result<EnvFilter> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(configured.unwrap_or("warn"))),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let trace_log = format!("{}=trace", TRACE_TARGET)
        .parse::<Directive>()
        .context("Invalid trace log filter directive")?;
    Ok(filter.add_directive(trace_log))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_log_enabled_at_default_verbosity() {
        let filter = tracing_filter(0, Some("warn")).unwrap();
        let rendered = filter.to_string();

        assert!(rendered.contains("sitelog::trace=trace"), "{rendered}");
        assert!(rendered.contains("warn"), "{rendered}");
    }

    #[test]
    fn test_trace_log_enabled_with_verbosity_flag() {
        let filter = tracing_filter(1, None).unwrap();

        assert!(filter.to_string().contains("sitelog::trace=trace"));
    }
}
