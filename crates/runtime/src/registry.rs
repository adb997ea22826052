//! Instance registry - identity-to-identifier mapping for bridged objects.
//!
//! The registry is the single authority on which native objects the remote
//! runtime knows about. Every live instance has at most one entry, keyed by
//! reference identity (two distinct objects that compare equal are still
//! distinct entries), and identifiers are never reused for the lifetime of
//! the process, not even after removal.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::instance::BridgedInstance;

/// First identifier handed out by a fresh registry; fixed for the process.
pub const FIRST_IDENTIFIER: u64 = 1;

/// How the registry holds on to a registered instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// The registry keeps the instance reachable for as long as the entry
    /// exists.
    Strong,
    /// The instance may be collected once no other strong holder exists;
    /// the entry remains queryable until removed or the referent is gone.
    Weak,
}

enum Held {
    Strong(Arc<dyn BridgedInstance>),
    Weak(Weak<dyn BridgedInstance>),
}

impl Held {
    fn resolve(&self) -> Option<Arc<dyn BridgedInstance>> {
        match self {
            Held::Strong(strong) => Some(Arc::clone(strong)),
            Held::Weak(weak) => weak.upgrade(),
        }
    }
}

struct Entry {
    identifier: u64,
    held: Held,
}

#[derive(Default)]
struct RegistryInner {
    by_key: HashMap<usize, Entry>,
    by_id: HashMap<u64, usize>,
}

/// Identity key: the thin data pointer of the instance allocation.
///
/// Compared as a thin pointer, not as a fat `*const dyn` pointer, so the
/// same object always produces the same key regardless of which trait
/// object vtable the caller's handle carries.
fn identity_key<T: BridgedInstance>(instance: &Arc<T>) -> usize {
    Arc::as_ptr(instance) as *const () as usize
}

/// Bidirectional mapping between native object identity and the stable
/// identifier naming the object to the remote runtime.
///
/// Shared behind an `Arc` by every proxy built on it; identifier uniqueness
/// depends on there being exactly one authoritative map. Both directions of
/// the mapping live under one lock so they can never desynchronize.
pub struct InstanceRegistry {
    next_id: AtomicU64,
    inner: Mutex<RegistryInner>,
}

impl Default for InstanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(FIRST_IDENTIFIER),
            inner: Mutex::new(RegistryInner::default()),
        }
    }

    /// Registers an instance, returning its identifier.
    ///
    /// Idempotent on identity: an instance that already has a live entry
    /// gets its existing identifier back, and the holding kind is left
    /// unchanged (use [`downgrade`](Self::downgrade) to change it). A stale
    /// weak entry whose referent died and whose allocation was reused by
    /// this instance is purged; its identifier stays retired.
    pub fn register<T: BridgedInstance>(&self, instance: &Arc<T>, kind: ReferenceKind) -> u64 {
        let key = identity_key(instance);
        let mut inner = self.inner.lock();

        let existing = inner
            .by_key
            .get(&key)
            .map(|entry| (entry.identifier, entry.held.resolve().is_some()));
        if let Some((identifier, alive)) = existing {
            if alive {
                return identifier;
            }
            inner.by_key.remove(&key);
            inner.by_id.remove(&identifier);
            tracing::debug!(identifier, "purged stale weak entry");
        }

        let identifier = self.next_id.fetch_add(1, Ordering::SeqCst);
        let dynamic: Arc<dyn BridgedInstance> = instance.clone();
        let held = match kind {
            ReferenceKind::Strong => Held::Strong(dynamic),
            ReferenceKind::Weak => Held::Weak(Arc::downgrade(&dynamic)),
        };
        inner.by_key.insert(key, Entry { identifier, held });
        inner.by_id.insert(identifier, key);

        tracing::debug!(
            identifier,
            type_name = instance.type_name(),
            ?kind,
            "registered instance"
        );
        identifier
    }

    /// Returns the identifier of an instance the registry must already know.
    ///
    /// Fails with [`Error::NotRegistered`] when no live entry exists for
    /// this exact instance - a lifetime-tracking bug in the caller, kept
    /// distinct from the non-failing [`contains`](Self::contains) probe.
    pub fn identifier_for<T: BridgedInstance>(&self, instance: &Arc<T>) -> Result<u64> {
        let key = identity_key(instance);
        let mut inner = self.inner.lock();

        let status = inner
            .by_key
            .get(&key)
            .map(|entry| (entry.identifier, entry.held.resolve().is_some()));
        match status {
            Some((identifier, true)) => Ok(identifier),
            Some((identifier, false)) => {
                // The entry under this address belongs to a dead referent;
                // the caller's instance merely reuses the allocation.
                inner.by_key.remove(&key);
                inner.by_id.remove(&identifier);
                tracing::debug!(identifier, "purged stale weak entry");
                Err(Error::not_registered(instance.type_name()))
            }
            None => Err(Error::not_registered(instance.type_name())),
        }
    }

    /// Non-failing existence probe for this exact instance.
    pub fn contains<T: BridgedInstance>(&self, instance: &Arc<T>) -> bool {
        let key = identity_key(instance);
        self.inner
            .lock()
            .by_key
            .get(&key)
            .is_some_and(|entry| entry.held.resolve().is_some())
    }

    /// Deletes the entry for an instance; a no-op when absent.
    ///
    /// Returns the retired identifier, which is never reassigned.
    pub fn remove<T: BridgedInstance>(&self, instance: &Arc<T>) -> Option<u64> {
        let key = identity_key(instance);
        let mut inner = self.inner.lock();
        let entry = inner.by_key.remove(&key)?;
        inner.by_id.remove(&entry.identifier);
        tracing::debug!(identifier = entry.identifier, "removed instance");
        Some(entry.identifier)
    }

    /// Downgrades a strong entry to weak, keeping its identifier.
    ///
    /// Explicitly invoked by platform glue when it hands primary ownership
    /// of the object back to the platform; nothing downgrades automatically.
    /// A no-op when the entry is already weak.
    pub fn downgrade<T: BridgedInstance>(&self, instance: &Arc<T>) -> Result<()> {
        let key = identity_key(instance);
        let mut inner = self.inner.lock();
        let entry = inner
            .by_key
            .get_mut(&key)
            .ok_or_else(|| Error::not_registered(instance.type_name()))?;

        let replacement = match &entry.held {
            Held::Strong(strong) => Some(Held::Weak(Arc::downgrade(strong))),
            Held::Weak(_) => None,
        };
        if let Some(held) = replacement {
            entry.held = held;
            tracing::debug!(identifier = entry.identifier, "downgraded to weak");
        }
        Ok(())
    }

    /// Resolves an identifier back to its instance.
    ///
    /// Strong entries always resolve; weak entries resolve only while the
    /// referent is still alive somewhere.
    pub fn instance_for(&self, identifier: u64) -> Option<Arc<dyn BridgedInstance>> {
        let inner = self.inner.lock();
        let key = inner.by_id.get(&identifier)?;
        inner.by_key.get(key)?.held.resolve()
    }

    /// Number of entries, including weak entries whose referent died but
    /// was not yet purged.
    pub fn len(&self) -> usize {
        self.inner.lock().by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    impl BridgedInstance for Widget {
        fn type_name(&self) -> &'static str {
            "Widget"
        }
    }

    #[test]
    fn register_is_idempotent_on_identity() {
        let registry = InstanceRegistry::new();
        let widget = Arc::new(Widget);

        let first = registry.register(&widget, ReferenceKind::Strong);
        let second = registry.register(&widget, ReferenceKind::Strong);

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_instances_get_distinct_identifiers() {
        let registry = InstanceRegistry::new();
        let a = Arc::new(Widget);
        let b = Arc::new(Widget);

        assert_ne!(
            registry.register(&a, ReferenceKind::Strong),
            registry.register(&b, ReferenceKind::Strong)
        );
    }

    #[test]
    fn identifiers_strictly_increase() {
        let registry = InstanceRegistry::new();
        let mut previous = 0;
        let mut holders = Vec::new();

        for i in 0..8 {
            let widget = Arc::new(Widget);
            let kind = if i % 2 == 0 {
                ReferenceKind::Strong
            } else {
                ReferenceKind::Weak
            };
            let identifier = registry.register(&widget, kind);
            assert!(identifier > previous);
            previous = identifier;
            holders.push(widget);
        }
    }

    #[test]
    fn first_identifier_is_fixed() {
        let registry = InstanceRegistry::new();
        let widget = Arc::new(Widget);
        assert_eq!(
            registry.register(&widget, ReferenceKind::Strong),
            FIRST_IDENTIFIER
        );
    }

    #[test]
    fn unregistered_lookup_fails_loudly() {
        let registry = InstanceRegistry::new();
        let widget = Arc::new(Widget);

        let error = registry.identifier_for(&widget).unwrap_err();
        assert!(error.is_not_registered());
        assert!(error.to_string().contains("Widget"));
    }

    #[test]
    fn contains_is_a_non_failing_probe() {
        let registry = InstanceRegistry::new();
        let widget = Arc::new(Widget);

        assert!(!registry.contains(&widget));
        registry.register(&widget, ReferenceKind::Strong);
        assert!(registry.contains(&widget));
    }

    #[test]
    fn remove_absent_is_a_noop() {
        let registry = InstanceRegistry::new();
        let widget = Arc::new(Widget);

        assert_eq!(registry.remove(&widget), None);
    }

    #[test]
    fn removed_identifier_is_never_reused() {
        let registry = InstanceRegistry::new();
        let a = Arc::new(Widget);
        let id_a = registry.register(&a, ReferenceKind::Strong);

        assert_eq!(registry.remove(&a), Some(id_a));
        assert!(registry.identifier_for(&a).is_err());

        let b = Arc::new(Widget);
        assert!(registry.register(&b, ReferenceKind::Strong) > id_a);
    }

    #[test]
    fn removal_leaves_other_entries_intact() {
        let registry = InstanceRegistry::new();
        let a = Arc::new(Widget);
        let b = Arc::new(Widget);
        registry.register(&a, ReferenceKind::Strong);
        let id_b = registry.register(&b, ReferenceKind::Strong);

        registry.remove(&a);
        assert_eq!(registry.identifier_for(&b).unwrap(), id_b);
    }

    #[test]
    fn downgrade_keeps_the_identifier() {
        let registry = InstanceRegistry::new();
        let widget = Arc::new(Widget);
        let identifier = registry.register(&widget, ReferenceKind::Strong);

        registry.downgrade(&widget).unwrap();
        assert_eq!(registry.identifier_for(&widget).unwrap(), identifier);

        // Second downgrade is a no-op.
        registry.downgrade(&widget).unwrap();
        assert_eq!(registry.identifier_for(&widget).unwrap(), identifier);
    }

    #[test]
    fn downgrade_unregistered_fails() {
        let registry = InstanceRegistry::new();
        let widget = Arc::new(Widget);
        assert!(registry.downgrade(&widget).unwrap_err().is_not_registered());
    }

    #[test]
    fn strong_entry_resolves_by_identifier() {
        let registry = InstanceRegistry::new();
        let widget = Arc::new(Widget);
        let identifier = registry.register(&widget, ReferenceKind::Strong);

        let resolved = registry.instance_for(identifier).unwrap();
        assert!(resolved.downcast_arc::<Widget>().is_ok());
    }

    #[test]
    fn weak_entry_stops_resolving_once_referent_dies() {
        let registry = InstanceRegistry::new();
        let widget = Arc::new(Widget);
        let identifier = registry.register(&widget, ReferenceKind::Weak);

        assert!(registry.instance_for(identifier).is_some());
        drop(widget);
        assert!(registry.instance_for(identifier).is_none());
    }

    #[test]
    fn strong_entry_keeps_the_instance_reachable() {
        let registry = InstanceRegistry::new();
        let widget = Arc::new(Widget);
        let identifier = registry.register(&widget, ReferenceKind::Strong);

        // The registry's strong hold outlives the caller's handle.
        drop(widget);
        assert!(registry.instance_for(identifier).is_some());
    }

    #[test]
    fn reregistering_keeps_the_holding_kind() {
        let registry = InstanceRegistry::new();
        let widget = Arc::new(Widget);
        let identifier = registry.register(&widget, ReferenceKind::Weak);

        // A second registration asking for strong holding is an identity
        // lookup, not a new registration: the entry stays weak.
        assert_eq!(
            registry.register(&widget, ReferenceKind::Strong),
            identifier
        );
        drop(widget);
        assert!(registry.instance_for(identifier).is_none());
    }
}
