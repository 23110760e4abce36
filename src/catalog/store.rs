//! Reactive single-slot store for the catalog.
//!
//! The store holds exactly one [`Catalog`] and notifies registered observers
//! whenever it is replaced. Notification is synchronous: every observer runs,
//! in registration order, before `set`/`update` returns. There is no queue
//! and no coalescing.
//!
//! The store is a cheap cloneable handle; clones share the same slot. It is
//! always constructed explicitly and passed to whoever needs it, so tests
//! can build isolated instances.
//!
//! The store performs no validation of catalog contents; whatever the loader
//! hands to [`CatalogStore::set`] is published as-is.

use std::sync::{Arc, Mutex, Weak};

use uuid::Uuid;

use super::model::Catalog;

/// Observer callback invoked with each published catalog.
type Observer = Box<dyn FnMut(&Catalog) + Send>;

struct Inner {
    value: Catalog,
    observers: Vec<(Uuid, Observer)>,
}

/// Single-slot publish/subscribe cell holding the current [`Catalog`].
///
/// Observers are invoked while the store's lock is held and must not call
/// back into the store.
#[derive(Clone)]
pub struct CatalogStore {
    inner: Arc<Mutex<Inner>>,
}

impl CatalogStore {
    /// Create a store holding the empty catalog. No I/O occurs.
    pub fn new() -> Self {
        Self::with_value(Catalog::new())
    }

    /// Create a store holding the given catalog.
    pub fn with_value(value: Catalog) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value,
                observers: Vec::new(),
            })),
        }
    }

    /// Snapshot of the current catalog. Never fails; repeated calls with no
    /// intervening write return equal values.
    pub fn get_current(&self) -> Catalog {
        self.lock().value.clone()
    }

    /// Replace the catalog wholesale and notify every registered observer,
    /// in registration order, before returning.
    pub fn set(&self, catalog: Catalog) {
        let mut inner = self.lock();
        inner.value = catalog;
        Self::notify_all(&mut inner);
    }

    /// Read-modify-publish in one critical section.
    ///
    /// `f` receives the current catalog and its result becomes the new
    /// value; no other write can interleave between the read and the
    /// publish. Observers are notified exactly once.
    pub fn update(&self, f: impl FnOnce(Catalog) -> Catalog) {
        let mut inner = self.lock();
        let current = inner.value.clone();
        inner.value = f(current);
        Self::notify_all(&mut inner);
    }

    /// Register an observer.
    ///
    /// The observer is invoked exactly once with the current value before
    /// `subscribe` returns, and thereafter on every `set`/`update` until
    /// [`Subscription::unsubscribe`] is called. Subscriptions are
    /// independent of one another.
    pub fn subscribe(&self, mut observer: impl FnMut(&Catalog) + Send + 'static) -> Subscription {
        let id = Uuid::new_v4();
        let mut inner = self.lock();
        observer(&inner.value);
        inner.observers.push((id, Box::new(observer)));

        Subscription {
            inner: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.lock().observers.len()
    }

    fn notify_all(inner: &mut Inner) {
        // Split borrow: observers borrow the value immutably
        let Inner { value, observers } = inner;
        for (_, observer) in observers.iter_mut() {
            observer(value);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // An observer panic while notifying would poison the lock; the
        // value itself is always left consistent, so keep serving it.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("CatalogStore")
            .field("len", &inner.value.len())
            .field("observers", &inner.observers.len())
            .finish()
    }
}

/// Handle returned by [`CatalogStore::subscribe`].
///
/// Call [`unsubscribe`](Subscription::unsubscribe) to deregister the
/// observer. Dropping the handle without calling it leaves the subscription
/// active for the lifetime of the store.
#[derive(Debug)]
pub struct Subscription {
    inner: Weak<Mutex<Inner>>,
    id: Uuid,
}

impl Subscription {
    /// Deregister the observer. After this returns the observer receives no
    /// further notifications. Calling it after the store is gone is a no-op.
    pub fn unsubscribe(self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = match inner.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            inner.observers.retain(|(id, _)| *id != self.id);
        }
    }
}
