//! Backing store for cached destination policies.

use std::collections::HashMap;
use std::sync::RwLock;

use super::destination::{DestinationPolicy, ScopeKey};

/// Scoped key/value store holding one policy per scope.
///
/// The store is owned outside the cache: entries may be evicted by their
/// owner at any time, and the cache simply repopulates on the next lookup.
pub trait PolicyStore: Send + Sync {
    /// Fetch the policy stored for `scope`, if any.
    fn get(&self, scope: &ScopeKey) -> Option<DestinationPolicy>;

    /// Store `policy` for `scope`, replacing any existing entry.
    fn set(&self, scope: ScopeKey, policy: DestinationPolicy);
}

/// Process-local in-memory policy store.
#[derive(Debug, Default)]
pub struct MemoryPolicyStore {
    entries: RwLock<HashMap<ScopeKey, DestinationPolicy>>,
}

impl MemoryPolicyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Evict the entry for `scope`, returning it.
    pub fn remove(&self, scope: &ScopeKey) -> Option<DestinationPolicy> {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(scope)
    }

    /// Number of cached scopes.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether no scope is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PolicyStore for MemoryPolicyStore {
    fn get(&self, scope: &ScopeKey) -> Option<DestinationPolicy> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(scope)
            .copied()
    }

    fn set(&self, scope: ScopeKey, policy: DestinationPolicy) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(scope, policy);
    }
}
