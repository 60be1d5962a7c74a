//! Relay of cache snapshots onto an [`EventEmitter`] for out-of-band listeners.
//!
//! The emitter delivers on its own threads, so listeners registered here see
//! snapshots asynchronously, unlike [`RecordCache::subscribe`].

use event_emitter_rs::EventEmitter;
use std::sync::{Arc, Mutex, PoisonError};

use crate::cache::{RecordCache, Snapshot, SubscriptionId};
use crate::record::Record;

/// Event name every snapshot is published under.
pub const RECORDS_CHANGED: &str = "RecordsChanged";

/// Publishes cache snapshots as JSON array text under [`RECORDS_CHANGED`].
///
/// # Example
///
/// ```ignore
/// use credit_desk::{EventEmitter, RecordCache, SnapshotEmitter};
///
/// let cache = RecordCache::new();
/// let relay = SnapshotEmitter::new(EventEmitter::new());
///
/// relay.on_records(|records| println!("{} credits", records.len()));
/// relay.attach(&cache);
/// ```
#[derive(Clone)]
pub struct SnapshotEmitter {
    emitter: Arc<Mutex<EventEmitter>>,
}

impl SnapshotEmitter {
    pub fn new(emitter: EventEmitter) -> Self {
        Self {
            emitter: Arc::new(Mutex::new(emitter)),
        }
    }

    /// Register a listener for the raw JSON payload.
    pub fn on<F>(&self, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.emitter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on(RECORDS_CHANGED, listener);
    }

    /// Register a listener for decoded records. Undecodable payloads are logged and dropped.
    pub fn on_records<F>(&self, listener: F)
    where
        F: Fn(Vec<Record>) + Send + Sync + 'static,
    {
        self.on(move |payload: String| match serde_json::from_str::<Vec<Record>>(&payload) {
            Ok(records) => listener(records),
            Err(e) => tracing::warn!(error = %e, "dropping undecodable snapshot event"),
        });
    }

    /// Emit one snapshot.
    pub fn emit_snapshot(&self, snapshot: &Snapshot) {
        let payload = match serde_json::to_string(snapshot.as_ref()) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode snapshot event");
                return;
            }
        };
        self.emitter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .emit(RECORDS_CHANGED, payload);
    }

    /// Relay every snapshot of `cache`, starting with the current one.
    pub fn attach(&self, cache: &RecordCache) -> SubscriptionId {
        let relay = self.clone();
        cache.subscribe(move |snapshot| relay.emit_snapshot(snapshot))
    }
}
