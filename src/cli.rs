//! Command-line interface definitions for sitelog.
//!
//! Uses clap's derive API for type-safe argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::event::{EventId, Severity};
use crate::policy::ScopeKey;

/// Severity-routed application logging.
///
/// sitelog sends error, warning and info messages either to the system log or
/// to the structured trace depending on a per-scope policy, and writes an
/// audit line for every message.
#[derive(Parser, Debug)]
#[command(name = "sitelog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to additional config file.
    ///
    /// This config file is merged on top of system and user configs,
    /// giving it the highest priority.
    #[arg(short = 'c', long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Policy scope for log calls (overrides `general.default_scope`).
    #[arg(short = 's', long = "scope", value_name = "KEY", global = true)]
    pub scope: Option<String>,

    /// Increase log verbosity.
    ///
    /// Can be specified multiple times:
    /// -v    = info level
    /// -vv   = debug level
    /// -vvv  = trace level
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Subcommands for sitelog.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fire the four demo messages: error, warning, info, verbose.
    Demo {
        /// Route to in-memory sinks and print what each received.
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// Log a single message.
    Emit {
        /// Severity: error, warning, info or verbose.
        #[arg(long = "severity", value_name = "SEVERITY")]
        severity: Severity,

        /// Category name. Unregistered names log under `Unknown`.
        #[arg(long = "category", value_name = "NAME", default_value = "General")]
        category: String,

        /// Numeric event id.
        #[arg(long = "event-id", value_name = "ID", default_value = "1001")]
        event_id: EventId,

        /// Route to in-memory sinks and print what each received.
        #[arg(long = "dry-run")]
        dry_run: bool,

        /// Message text.
        #[arg(required = true)]
        message: String,
    },

    /// List registered categories and their thresholds.
    Categories,

    /// Print the effective merged configuration.
    Config,
}

impl Cli {
    /// Scope given on the command line, if any.
    pub fn scope_key(&self) -> Option<ScopeKey> {
        self.scope.as_deref().map(ScopeKey::from)
    }
}
