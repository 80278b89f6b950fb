//! Configuration system for sitelog.
//!
//! This module provides TOML configuration loading with hierarchy merging.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded from multiple sources and merged in order:
//!
//! 1. System config: `/etc/sitelog/config.toml`
//! 2. User config: `~/.config/sitelog/config.toml`
//! 3. Additional config file (via `--config` flag)
//!
//! Missing system and user files are fine; the embedded defaults apply.
//!
//! # Merge Behavior
//!
//! - **Scalars** (application name, policy flags, facility, ...) are
//!   **overridden** when set
//! - **Categories** are **merged** (appended; a later entry with the same
//!   name replaces the thresholds)
//!
//! # Example
//!
//! ```toml
//! [general]
//! application_name = "HowCanIDoIt"
//! default_scope = "site1"
//!
//! [policy]
//! info_to_event_log = false
//!
//! [event_log]
//! service_name = "Workspace2 Logging Service"
//! facility = "user"
//!
//! [mirror]
//! path = "/var/log/sitelog/audit.log"
//!
//! [[categories]]
//! name = "Billing"
//! trace_severity = "medium"
//! event_severity = "warning"
//! ```

mod error;
mod loader;
mod schema;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{
    CategoryConfig, Config, DEFAULT_APPLICATION_NAME, EventLogConfig, GeneralConfig,
    MirrorConfig, PolicyConfig,
};
