//! Listener registry
//!
//! Callbacks are keyed by monotonically increasing tokens, so iterating the
//! map visits them in registration order. Fan-out works on a snapshot of the
//! map: a callback may unsubscribe itself or others while being notified.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct RegistryInner<E> {
    next_token: AtomicU64,
    listeners: RwLock<BTreeMap<u64, Listener<E>>>,
}

/// Removal side of the registry, erased over the event type so a
/// [`Subscription`] does not carry it
trait Deregister: Send + Sync {
    fn deregister(&self, token: u64) -> bool;
}

impl<E> Deregister for RegistryInner<E> {
    fn deregister(&self, token: u64) -> bool {
        self.listeners.write().remove(&token).is_some()
    }
}

/// Shared set of event callbacks
pub struct ListenerRegistry<E> {
    inner: Arc<RegistryInner<E>>,
}

impl<E> Clone for ListenerRegistry<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                next_token: AtomicU64::new(1),
                listeners: RwLock::new(BTreeMap::new()),
            }),
        }
    }
}

impl<E: 'static> ListenerRegistry<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`; it stays registered until the returned handle is
    /// unsubscribed or dropped
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let token = self.inner.next_token.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.write().insert(token, Arc::new(listener));

        tracing::debug!(token, "Listener registered");

        let inner: Arc<dyn Deregister> = self.inner.clone();
        Subscription {
            token,
            registry: Arc::downgrade(&inner),
            active: AtomicBool::new(true),
        }
    }

    /// Call every registered listener in registration order and return how
    /// many ran. A panicking listener is logged and does not stop the others.
    pub fn notify(&self, event: &E) -> usize {
        let snapshot: Vec<(u64, Listener<E>)> = self
            .inner
            .listeners
            .read()
            .iter()
            .map(|(token, listener)| (*token, Arc::clone(listener)))
            .collect();

        let mut delivered = 0;
        for (token, listener) in snapshot {
            match catch_unwind(AssertUnwindSafe(|| listener(event))) {
                Ok(()) => delivered += 1,
                Err(_) => tracing::warn!(token, "Listener panicked during notification"),
            }
        }
        delivered
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.inner.listeners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.listeners.read().is_empty()
    }
}

/// Handle to one registered listener
#[must_use = "dropping a Subscription removes its listener"]
pub struct Subscription {
    token: u64,
    registry: Weak<dyn Deregister>,
    active: AtomicBool,
}

impl Subscription {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Remove the listener. Only the first call has an effect; it returns
    /// whether the listener was still registered.
    pub fn unsubscribe(&self) -> bool {
        if !self.active.swap(false, Ordering::AcqRel) {
            return false;
        }

        let removed = self
            .registry
            .upgrade()
            .is_some_and(|registry| registry.deregister(self.token));

        if removed {
            tracing::debug!(token = self.token, "Listener removed");
        }
        removed
    }

    /// Keep the listener registered for the lifetime of the registry
    pub fn detach(self) {
        self.active.store(false, Ordering::Release);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("token", &self.token)
            .field("active", &self.is_active())
            .finish()
    }
}
