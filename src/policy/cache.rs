//! Lazily populated per-scope policy cache.

use std::sync::Arc;

use tracing::debug;

use super::destination::{DestinationPolicy, ScopeKey};
use super::store::{MemoryPolicyStore, PolicyStore};
use crate::event::EventId;

/// Resolves the destination policy for a scope.
///
/// On a miss the configured default policy is written back into the store
/// and reused from then on. Entries never expire from this side.
///
/// The check-then-populate sequence is not locked. Two threads that miss on
/// the same scope at the same time both compute and store the default; the
/// last write wins. Both writes carry the same value, so the race is
/// harmless and is left in place.
#[derive(Clone)]
pub struct PolicyCache {
    store: Arc<dyn PolicyStore>,
    default_policy: DestinationPolicy,
}

impl PolicyCache {
    /// Create a cache over `store` that fills misses with `default_policy`.
    pub fn new(store: Arc<dyn PolicyStore>, default_policy: DestinationPolicy) -> Self {
        Self {
            store,
            default_policy,
        }
    }

    /// Cache over a fresh in-memory store with the all-true default.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryPolicyStore::new()),
            DestinationPolicy::default(),
        )
    }

    /// Resolve the policy for `scope`, or for the global scope if `None`.
    pub fn resolve(&self, scope: Option<&ScopeKey>) -> DestinationPolicy {
        let global;
        let scope = match scope {
            Some(scope) => scope,
            None => {
                global = ScopeKey::global();
                &global
            }
        };

        if let Some(policy) = self.store.get(scope) {
            return policy;
        }

        debug!(
            event_id = EventId::CacheMiss.code(),
            scope = %scope,
            "No cached destination policy, using default"
        );

        let policy = self.default_policy;
        self.store.set(scope.clone(), policy);

        debug!(
            event_id = EventId::CacheAdded.code(),
            scope = %scope,
            "Cached destination policy"
        );

        policy
    }
}

impl std::fmt::Debug for PolicyCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyCache")
            .field("default_policy", &self.default_policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_first_resolve_returns_default() {
        let cache = PolicyCache::in_memory();
        let policy = cache.resolve(Some(&ScopeKey::new("site1")));
        assert_eq!(policy, DestinationPolicy::default());
    }

    #[test]
    fn test_miss_writes_back_to_store() {
        let store = Arc::new(MemoryPolicyStore::new());
        let cache = PolicyCache::new(store.clone(), DestinationPolicy::default());

        cache.resolve(Some(&ScopeKey::new("site1")));

        assert_eq!(
            store.get(&ScopeKey::new("site1")),
            Some(DestinationPolicy::default())
        );
    }

    #[test]
    fn test_existing_entry_is_reused() {
        let store = Arc::new(MemoryPolicyStore::new());
        store.set(ScopeKey::new("site1"), DestinationPolicy::TRACE_ONLY);
        let cache = PolicyCache::new(store.clone(), DestinationPolicy::default());

        assert_eq!(
            cache.resolve(Some(&ScopeKey::new("site1"))),
            DestinationPolicy::TRACE_ONLY
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_none_uses_global_scope() {
        let store = Arc::new(MemoryPolicyStore::new());
        let cache = PolicyCache::new(store.clone(), DestinationPolicy::default());

        cache.resolve(None);

        assert!(store.get(&ScopeKey::global()).is_some());
    }

    #[test]
    fn test_configured_default_fills_misses() {
        let custom = DestinationPolicy {
            error: true,
            warning: false,
            info: false,
        };
        let cache = PolicyCache::new(Arc::new(MemoryPolicyStore::new()), custom);

        assert_eq!(cache.resolve(Some(&ScopeKey::new("site2"))), custom);
    }

    #[test]
    fn test_evicted_entry_is_repopulated() {
        let store = Arc::new(MemoryPolicyStore::new());
        store.set(ScopeKey::new("site1"), DestinationPolicy::TRACE_ONLY);
        let cache = PolicyCache::new(store.clone(), DestinationPolicy::default());

        store.remove(&ScopeKey::new("site1"));

        assert_eq!(
            cache.resolve(Some(&ScopeKey::new("site1"))),
            DestinationPolicy::default()
        );
    }

    #[test]
    fn test_concurrent_first_resolve_yields_default() {
        // Racing misses on one scope may each write the default. Only the
        // outcome is asserted, not which thread wrote last.
        let store = Arc::new(MemoryPolicyStore::new());
        let cache = PolicyCache::new(store.clone(), DestinationPolicy::default());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                thread::spawn(move || cache.resolve(Some(&ScopeKey::new("shared"))))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), DestinationPolicy::default());
        }
        assert_eq!(store.len(), 1);
    }
}
