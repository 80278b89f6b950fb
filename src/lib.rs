//! sitelog: severity-routed application logging
//!
//! A small logging façade that sends each application message to one of two
//! destinations and keeps an audit trail of everything:
//!
//! - **Event log**: the operator-facing system log (syslog)
//! - **Trace log**: the higher-volume structured trace (`tracing`)
//! - **Mirror**: one audit line per call, unconditionally
//!
//! Which of the first two receives error, warning and info messages is
//! decided per scope (e.g. per site or tenant) by a cached
//! [`policy::DestinationPolicy`]. Verbose messages only reach the mirror.
//!
//! # Failure Model
//!
//! Logging never fails the caller. Sink failures and an unresolvable scope
//! are written to the mirror as diagnostic lines and the call completes.
//!
//! # Architecture
//!
//! - **Event**: severities, categories and event ids
//! - **Policy**: per-scope destination policy and its cache
//! - **Sink**: the three destination traits and their implementations
//! - **Router**: the routing logic tying them together
//! - **Config**: hierarchical TOML configuration
//! - **CLI**: demo front-end

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod cli;
pub mod cli_handler;
pub mod config;
pub mod event;
pub mod policy;
pub mod router;
pub mod sink;
