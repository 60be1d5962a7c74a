//! credit_desk - status resolution and client-side record caching for tax credit listings.
//!
//! Two cooperating pieces:
//!
//! - [`StatusResolver`] pulls a status out of records of unknown shape, normalizes it
//!   to a [`StatusCode`] and maps that code to a label and a display class.
//! - [`RecordCache`] keeps an ordered, deduplicated and optionally persisted list of
//!   records; [`QueryView`] filters, sorts and paginates a list of records.
//!
//! ## Example
//!
//! ```ignore
//! use credit_desk::{QueryState, QueryView, RecordCache, StatusCode, StatusResolver};
//! use serde_json::json;
//!
//! let cache = RecordCache::new();
//! cache.add_many(records_from(json!([
//!     { "id": 1, "status": "EM_ANALISE" },
//!     { "id": 2, "status": "Aprovado" }
//! ])));
//!
//! let view = QueryView::default();
//! let result = view.apply(&cache.snapshot(), &QueryState::filtered("aprov"));
//!
//! let resolver = StatusResolver::new();
//! let code = resolver.status_of(&result.items[0]);
//! assert_eq!(code, StatusCode::Aprovado);
//! assert_eq!(code.label(), "Aprovado");
//! ```

mod cache;
#[cfg(feature = "emitter")]
mod emitter;
mod query;
mod record;
mod role;
mod status;
mod storage;

pub use cache::{
    Broadcaster, CacheConfig, RecordCache, Snapshot, SnapshotBroadcaster, SubscriptionId,
};
#[cfg(feature = "emitter")]
pub use emitter::{SnapshotEmitter, RECORDS_CHANGED};
pub use query::{
    page_numbers, FieldKind, QueryConfig, QueryResult, QueryState, QueryView, SortDirection,
};
pub use record::{field_text, record_key, records_from, Record, RecordKey};
pub use role::{
    can_analyze, AnalysisDecision, Approver, ParseRoleError, RoleSelector, UserRole,
    ROLE_STORAGE_KEY,
};
pub use status::{
    normalize_text, JsonNode, ParseStatusError, ResolverConfig, Shape, StatusCode, StatusResolver,
    StatusSource, DEFAULT_DISPLAY_CLASS, DEFAULT_LABEL,
};
pub use storage::{DurableStore, FileStore, InMemoryStore, StorageError};

// Re-export the EventEmitter so hosts can wire a SnapshotEmitter without naming the crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
