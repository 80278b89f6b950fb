//! Logging categories and their registry.
//!
//! Categories are registered once at startup through
//! [`CategoryRegistry::builder`] and are read-only afterwards. Lookups never
//! fail: an unregistered name resolves to the `Unknown` category.

use std::collections::HashMap;
use std::sync::Arc;

use super::severity::{EventSeverity, TraceSeverity};

/// Name of the general-purpose category.
pub const GENERAL: &str = "General";

/// Name of the category used for logging infrastructure messages.
pub const LOGGING: &str = "Logging";

/// Name of the category used by the demo front-end.
pub const DEMO: &str = "Demo";

/// Name of the fallback category.
pub const UNKNOWN: &str = "Unknown";

/// A registered logging category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    area: Arc<str>,
    name: String,
    trace_threshold: TraceSeverity,
    event_threshold: EventSeverity,
}

impl Category {
    /// Area (application) the category belongs to.
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Category name as registered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Least severe trace level this category lets through.
    pub fn trace_threshold(&self) -> TraceSeverity {
        self.trace_threshold
    }

    /// Least severe event level this category lets through.
    pub fn event_threshold(&self) -> EventSeverity {
        self.event_threshold
    }

    /// Whether a trace at `severity` should be written for this category.
    pub fn admits_trace(&self, severity: TraceSeverity) -> bool {
        severity.passes(self.trace_threshold)
    }

    /// Whether an event at `severity` should be written for this category.
    pub fn admits_event(&self, severity: EventSeverity) -> bool {
        severity.passes(self.event_threshold)
    }
}

/// Immutable set of categories for one area.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    area: Arc<str>,
    // Keyed by lowercased name.
    categories: HashMap<String, Category>,
    // Registration order, for listing.
    order: Vec<String>,
}

impl CategoryRegistry {
    /// Start building a registry for `area`.
    pub fn builder(area: impl Into<String>) -> CategoryRegistryBuilder {
        CategoryRegistryBuilder {
            area: Arc::from(area.into()),
            entries: Vec::new(),
        }
    }

    /// Registry containing only the built-in categories.
    pub fn builtin(area: impl Into<String>) -> Self {
        Self::builder(area).with_builtin().build()
    }

    /// Area name.
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Look up a category by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.get(&name.to_ascii_lowercase())
    }

    /// Look up a category, falling back to `Unknown`.
    pub fn resolve(&self, name: &str) -> &Category {
        self.get(name).unwrap_or_else(|| self.unknown())
    }

    /// The fallback category.
    pub fn unknown(&self) -> &Category {
        // The builder always registers `Unknown`.
        &self.categories[&UNKNOWN.to_ascii_lowercase()]
    }

    /// Categories in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.order.iter().map(|key| &self.categories[key])
    }

    /// Number of registered categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Always false: `Unknown` is always registered.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Builder for [`CategoryRegistry`].
#[derive(Debug)]
pub struct CategoryRegistryBuilder {
    area: Arc<str>,
    entries: Vec<(String, TraceSeverity, EventSeverity)>,
}

impl CategoryRegistryBuilder {
    /// Register the built-in categories.
    pub fn with_builtin(self) -> Self {
        self.category(GENERAL, TraceSeverity::Medium, EventSeverity::Information)
            .category(LOGGING, TraceSeverity::Medium, EventSeverity::Information)
            .category(DEMO, TraceSeverity::Verbose, EventSeverity::Information)
            .category(UNKNOWN, TraceSeverity::High, EventSeverity::ErrorCritical)
    }

    /// Register a category. A later registration of the same name replaces
    /// the earlier thresholds.
    pub fn category(
        mut self,
        name: impl Into<String>,
        trace_threshold: TraceSeverity,
        event_threshold: EventSeverity,
    ) -> Self {
        self.entries
            .push((name.into(), trace_threshold, event_threshold));
        self
    }

    /// Freeze the registry. `Unknown` is added with its built-in thresholds
    /// if it was not registered explicitly.
    pub fn build(self) -> CategoryRegistry {
        let mut categories = HashMap::new();
        let mut order = Vec::new();

        let unknown = (
            UNKNOWN.to_string(),
            TraceSeverity::High,
            EventSeverity::ErrorCritical,
        );
        let has_unknown = self
            .entries
            .iter()
            .any(|(name, _, _)| name.eq_ignore_ascii_case(UNKNOWN));

        let entries = self
            .entries
            .into_iter()
            .chain((!has_unknown).then_some(unknown));

        for (name, trace_threshold, event_threshold) in entries {
            let key = name.to_ascii_lowercase();
            if !categories.contains_key(&key) {
                order.push(key.clone());
            }
            categories.insert(
                key,
                Category {
                    area: Arc::clone(&self.area),
                    name,
                    trace_threshold,
                    event_threshold,
                },
            );
        }

        CategoryRegistry {
            area: self.area,
            categories,
            order,
        }
    }
}
