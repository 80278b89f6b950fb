//! Configuration schema definitions.
//!
//! This module defines the structure of the sitelog configuration files.
//! Configuration is loaded from multiple sources and merged in order:
//!
//! 1. Embedded defaults
//! 2. System config: `/etc/sitelog/config.toml`
//! 3. User config: `~/.config/sitelog/config.toml`
//! 4. Additional config file (via `--config` flag)
//!
//! Every scalar is optional in the file so that "not set" can be told apart
//! from "set to the default" when layers are merged.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use syslog::Facility;

use super::error::ConfigError;
use crate::event::{CategoryRegistry, EventSeverity, TraceSeverity};
use crate::policy::{DestinationPolicy, MemoryPolicyStore, PolicyCache, ScopeKey};
use crate::router::{LogRouter, LogRouterBuilder};
use crate::sink::{DEFAULT_SERVICE_NAME, SyslogEventSink, WriterMirror, parse_facility};

/// Application name used when none is configured.
pub const DEFAULT_APPLICATION_NAME: &str = "HowCanIDoIt";

/// Syslog facility used when none is configured.
pub const DEFAULT_FACILITY: &str = "user";

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Default destination policy for scopes with nothing cached.
    #[serde(default)]
    pub policy: PolicyConfig,

    /// System log settings.
    #[serde(default)]
    pub event_log: EventLogConfig,

    /// Audit mirror settings.
    #[serde(default)]
    pub mirror: MirrorConfig,

    /// Categories registered in addition to the built-in ones.
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

impl Config {
    /// Merge another config into this one.
    ///
    /// Scalars set in `other` override. Category lists are appended.
    pub fn merge(&mut self, other: Config) {
        self.general.merge(other.general);
        self.policy.merge(other.policy);
        self.event_log.merge(other.event_log);
        self.mirror.merge(other.mirror);
        self.categories.extend(other.categories);
    }

    /// Check values that deserialization alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.application_name().trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "general.application_name".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        self.facility()?;

        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "categories.name".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Application name, written on every mirror line.
    pub fn application_name(&self) -> &str {
        self.general
            .application_name
            .as_deref()
            .unwrap_or(DEFAULT_APPLICATION_NAME)
    }

    /// Scope used when a log call supplies none.
    pub fn default_scope(&self) -> Option<ScopeKey> {
        self.general.default_scope.as_deref().map(ScopeKey::from)
    }

    /// Default destination policy.
    pub fn destination_policy(&self) -> DestinationPolicy {
        self.policy.to_policy()
    }

    /// Parsed syslog facility.
    pub fn facility(&self) -> Result<Facility, ConfigError> {
        let name = self
            .event_log
            .facility
            .as_deref()
            .unwrap_or(DEFAULT_FACILITY);
        parse_facility(name).ok_or_else(|| ConfigError::InvalidValue {
            field: "event_log.facility".to_string(),
            message: format!("unknown syslog facility '{}'", name),
        })
    }

    /// Built-in categories plus the configured ones.
    pub fn category_registry(&self) -> CategoryRegistry {
        self.categories.iter().fold(
            CategoryRegistry::builder(self.application_name()).with_builtin(),
            |builder, category| {
                builder.category(
                    category.name.clone(),
                    category.trace_severity,
                    category.event_severity,
                )
            },
        )
        .build()
    }

    /// Router builder carrying this config's categories, policy and scope.
    ///
    /// Sinks are the syslog event sink plus the builder's defaults. No file
    /// is opened, so this is safe to use when every sink will be replaced.
    pub fn base_router_builder(&self) -> Result<LogRouterBuilder, ConfigError> {
        self.validate()?;

        let policies = PolicyCache::new(
            Arc::new(MemoryPolicyStore::new()),
            self.destination_policy(),
        );
        let event_sink = SyslogEventSink::new(
            self.event_log
                .service_name
                .as_deref()
                .unwrap_or(DEFAULT_SERVICE_NAME),
            self.facility()?,
        );

        Ok(LogRouter::builder(self.category_registry())
            .application_name(self.application_name())
            .policy_cache(policies)
            .ambient_scope(self.default_scope())
            .event_sink(Arc::new(event_sink)))
    }

    /// Router builder wired to the production sinks this config describes,
    /// including the mirror file when `mirror.path` is set.
    pub fn router_builder(&self) -> Result<LogRouterBuilder, ConfigError> {
        let builder = self.base_router_builder()?;

        match self.mirror.path {
            Some(ref path) => {
                let mirror =
                    WriterMirror::append_to(path).map_err(|e| ConfigError::MirrorOpen {
                        path: path.clone(),
                        source: e,
                    })?;
                Ok(builder.mirror(Arc::new(mirror)))
            }
            None => Ok(builder),
        }
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// General application settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Application name written on mirror lines and used as the area name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Scope used when a log call supplies none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_scope: Option<String>,
}

impl GeneralConfig {
    fn merge(&mut self, other: GeneralConfig) {
        if other.application_name.is_some() {
            self.application_name = other.application_name;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        if other.default_scope.is_some() {
            self.default_scope = other.default_scope;
        }
    }
}

/// Default destination policy. Unset flags route to the system log.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PolicyConfig {
    /// Route errors to the system log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_to_event_log: Option<bool>,

    /// Route warnings to the system log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_to_event_log: Option<bool>,

    /// Route informational messages to the system log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_to_event_log: Option<bool>,
}

impl PolicyConfig {
    fn merge(&mut self, other: PolicyConfig) {
        self.error_to_event_log = other.error_to_event_log.or(self.error_to_event_log);
        self.warning_to_event_log = other.warning_to_event_log.or(self.warning_to_event_log);
        self.info_to_event_log = other.info_to_event_log.or(self.info_to_event_log);
    }

    /// Resolve into a policy, filling unset flags with the default.
    pub fn to_policy(&self) -> DestinationPolicy {
        let default = DestinationPolicy::default();
        DestinationPolicy {
            error: self.error_to_event_log.unwrap_or(default.error),
            warning: self.warning_to_event_log.unwrap_or(default.warning),
            info: self.info_to_event_log.unwrap_or(default.info),
        }
    }
}

/// System log settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EventLogConfig {
    /// Syslog tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    /// Syslog facility: user, daemon, local0..local7, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility: Option<String>,
}

impl EventLogConfig {
    fn merge(&mut self, other: EventLogConfig) {
        if other.service_name.is_some() {
            self.service_name = other.service_name;
        }
        if other.facility.is_some() {
            self.facility = other.facility;
        }
    }
}

/// Audit mirror settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MirrorConfig {
    /// File to append audit lines to. Standard error when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl MirrorConfig {
    fn merge(&mut self, other: MirrorConfig) {
        if other.path.is_some() {
            self.path = other.path;
        }
    }
}

/// A category declared in configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryConfig {
    /// Category name.
    pub name: String,

    /// Least severe trace level let through.
    #[serde(default = "default_trace_severity")]
    pub trace_severity: TraceSeverity,

    /// Least severe event level let through.
    #[serde(default = "default_event_severity")]
    pub event_severity: EventSeverity,
}

fn default_trace_severity() -> TraceSeverity {
    TraceSeverity::Medium
}

fn default_event_severity() -> EventSeverity {
    EventSeverity::Information
}
