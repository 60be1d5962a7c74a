//! Record cache - an in-session store of query results shared by several screens.
//!
//! Records enter through explicit add calls, are deduplicated by a key field,
//! and keep their insertion order. Every accepted change is broadcast to
//! subscribers as an immutable [`Snapshot`].
//!
//! ## Example
//!
//! ```ignore
//! use credit_desk::{CacheConfig, FileStore, RecordCache};
//!
//! let cache = RecordCache::with_store(CacheConfig::default(), FileStore::new("/var/lib/credit_desk"));
//! cache.subscribe(|snapshot| println!("{} credits cached", snapshot.len()));
//! cache.add_many(records);
//! ```

mod broadcaster;
mod record_cache;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::record::Record;

pub use broadcaster::{Broadcaster, SnapshotBroadcaster, SubscriptionId};
pub use record_cache::RecordCache;

/// An immutable, fully materialized view of the cache at one point in time.
pub type Snapshot = Arc<Vec<Record>>;

/// Cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Field holding each record's identity.
    pub key_field: String,
    /// Durable store key the snapshot is persisted under.
    pub storage_key: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key_field: "id".to_string(),
            storage_key: "creditos-cache".to_string(),
        }
    }
}
