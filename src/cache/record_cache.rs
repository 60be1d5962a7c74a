use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockWriteGuard};

use super::{CacheConfig, Snapshot, SnapshotBroadcaster, SubscriptionId};
use crate::record::{record_key, Record, RecordKey};
use crate::storage::DurableStore;

/// Ordered, deduplicated collection of records with publish-on-change.
///
/// State is only ever replaced as a whole (copy-on-write), so a [`Snapshot`]
/// handed out earlier stays valid and unchanged. Persistence, when a store is
/// attached, is best-effort: failures are logged and the cache carries on in
/// memory.
///
/// Mutations are serialized end to end: the swap, the store write and the
/// broadcast of one call all complete before the next call starts, so the
/// store and subscribers always see snapshots in the order they were
/// accepted. Listeners may read the cache or subscribe, but must not mutate
/// the cache they are called from.
///
/// Clone-friendly (cloning shares state, subscribers and store).
#[derive(Clone)]
pub struct RecordCache {
    config: CacheConfig,
    state: Arc<RwLock<Snapshot>>,
    mutations: Arc<Mutex<()>>,
    broadcaster: SnapshotBroadcaster,
    store: Option<Arc<dyn DurableStore>>,
}

impl Default for RecordCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordCache {
    /// Memory-only cache keyed on `id`.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(Arc::new(Vec::new()))),
            mutations: Arc::new(Mutex::new(())),
            broadcaster: SnapshotBroadcaster::new(),
            store: None,
        }
    }

    /// Cache backed by `store`, rehydrated from whatever it holds under the
    /// configured storage key. A missing or malformed payload means an empty cache.
    pub fn with_store<S>(config: CacheConfig, store: S) -> Self
    where
        S: DurableStore + 'static,
    {
        let store: Arc<dyn DurableStore> = Arc::new(store);
        let restored = load_persisted(store.as_ref(), &config);

        let mut cache = Self::with_config(config);
        cache.state = Arc::new(RwLock::new(Arc::new(restored)));
        cache.store = Some(store);
        cache
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Append records whose key is not already held, in input order.
    ///
    /// Subscribers are notified once per call, and only if something was added.
    /// Returns the number of records added.
    pub fn add_many<I>(&self, records: I) -> usize
    where
        I: IntoIterator<Item = Record>,
    {
        let _mutation = self.begin_mutation();
        let (snapshot, added) = {
            let mut state = self.write_state();
            let mut seen = keys_of(&state, &self.config.key_field);
            let fresh = accept_new(records, &mut seen, &self.config.key_field);
            if fresh.is_empty() {
                return 0;
            }

            let added = fresh.len();
            let mut next = Vec::with_capacity(state.len() + added);
            next.extend(state.iter().cloned());
            next.extend(fresh);
            *state = Arc::new(next);
            (Arc::clone(&state), added)
        };

        self.persist(&snapshot);
        self.broadcaster.publish(&snapshot);
        added
    }

    /// Add a single record. Returns true if it was new.
    pub fn add_one(&self, record: Record) -> bool {
        self.add_many(std::iter::once(record)) == 1
    }

    /// Defensive copy of the current records, in insertion order.
    pub fn snapshot(&self) -> Vec<Record> {
        self.current().as_ref().clone()
    }

    /// The current immutable snapshot, shared rather than copied.
    pub fn current(&self) -> Snapshot {
        Arc::clone(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Drop every record and publish the empty snapshot.
    pub fn clear(&self) {
        let _mutation = self.begin_mutation();
        let snapshot: Snapshot = Arc::new(Vec::new());
        *self.write_state() = Arc::clone(&snapshot);
        self.persist(&snapshot);
        self.broadcaster.publish(&snapshot);
    }

    pub fn count(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Subscribe to snapshot changes. The listener is immediately called with
    /// the current snapshot, then again after every accepted mutation.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let (id, listener) = self.broadcaster.register(Arc::new(listener));
        listener(&self.current());
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.broadcaster.unsubscribe(id)
    }

    fn begin_mutation(&self) -> MutexGuard<'_, ()> {
        self.mutations.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Snapshot> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, snapshot: &Snapshot) {
        let Some(store) = &self.store else {
            return;
        };

        let payload = match serde_json::to_string(snapshot.as_ref()) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize record cache");
                return;
            }
        };

        if let Err(e) = store.set(&self.config.storage_key, &payload) {
            tracing::warn!(
                key = %self.config.storage_key,
                error = %e,
                "failed to persist record cache"
            );
        }
    }
}

fn keys_of(records: &[Record], key_field: &str) -> HashSet<RecordKey> {
    records
        .iter()
        .filter_map(|record| record_key(record, key_field))
        .collect()
}

/// Records from `incoming` with a usable key not yet in `seen`; `seen` is updated.
fn accept_new<I>(incoming: I, seen: &mut HashSet<RecordKey>, key_field: &str) -> Vec<Record>
where
    I: IntoIterator<Item = Record>,
{
    let mut fresh = Vec::new();
    for record in incoming {
        match record_key(&record, key_field) {
            None => {
                tracing::debug!(key_field, "skipping record without a usable key");
            }
            Some(key) if seen.contains(&key) => {
                tracing::debug!(%key, "skipping duplicate record");
            }
            Some(key) => {
                seen.insert(key);
                fresh.push(record);
            }
        }
    }
    fresh
}

fn load_persisted(store: &dyn DurableStore, config: &CacheConfig) -> Vec<Record> {
    let payload = match store.get(&config.storage_key) {
        Ok(Some(payload)) => payload,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(
                key = %config.storage_key,
                error = %e,
                "failed to read persisted record cache"
            );
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Record>>(&payload) {
        Ok(records) => {
            let mut seen = HashSet::new();
            let restored = accept_new(records, &mut seen, &config.key_field);
            tracing::debug!(records = restored.len(), "rehydrated record cache");
            restored
        }
        Err(e) => {
            tracing::warn!(
                key = %config.storage_key,
                error = %e,
                "ignoring malformed persisted record cache"
            );
            Vec::new()
        }
    }
}
