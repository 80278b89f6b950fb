//! Per-scope destination policy.
//!
//! A [`DestinationPolicy`] decides, for each of error/warning/info, whether a
//! message goes to the system log or to the structured trace. Policies are
//! cached per [`ScopeKey`] in a [`PolicyStore`] and created lazily with a
//! configurable default on first lookup.

mod cache;
mod destination;
mod store;

pub use cache::PolicyCache;
pub use destination::{DestinationPolicy, ScopeKey};
pub use store::{MemoryPolicyStore, PolicyStore};
