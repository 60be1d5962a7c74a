use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use super::Snapshot;

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registry of listeners, invoked synchronously on publish.
///
/// Clone-friendly (cloning shares the same listener list). Listeners are
/// called outside the registry lock, so a listener may subscribe or
/// unsubscribe without deadlocking.
pub struct Broadcaster<T> {
    listeners: Arc<RwLock<Vec<(SubscriptionId, Listener<T>)>>>,
    next_id: Arc<AtomicU64>,
}

/// Broadcaster of cache snapshots.
pub type SnapshotBroadcaster = Broadcaster<Snapshot>;

impl<T> Clone for Broadcaster<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<T> Default for Broadcaster<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Broadcaster<T> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Register a listener. Nothing is delivered until the next publish.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.register(Arc::new(listener)).0
    }

    pub(crate) fn register(&self, listener: Listener<T>) -> (SubscriptionId, Listener<T>) {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::clone(&listener)));
        (id, listener)
    }

    /// Remove a listener. Returns true if it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Deliver `value` to every current listener, in subscription order.
    pub fn publish(&self, value: &T) {
        let listeners: Vec<Listener<T>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        tracing::trace!(listeners = listeners.len(), "publishing");
        for listener in listeners {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
