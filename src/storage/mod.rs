//! Durable storage - a small key to string surface used for best-effort persistence.
//!
//! The cache and the role selector treat storage as optional: every failure
//! surfaced here is logged by the caller and otherwise ignored.

mod file;
mod in_memory;

use std::fmt;

pub use file::FileStore;
pub use in_memory::InMemoryStore;

/// Error type for durable store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backing medium cannot be used at all.
    Unavailable(String),
    /// Writing `key` would exceed the store's capacity.
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },
    /// Read or write failure on the backing medium.
    Io(String),
    LockPoisoned(&'static str),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {}", msg),
            StorageError::QuotaExceeded { key, needed, limit } => write!(
                f,
                "storage quota exceeded writing {} ({} bytes needed, limit {})",
                key, needed, limit
            ),
            StorageError::Io(msg) => write!(f, "storage io error: {}", msg),
            StorageError::LockPoisoned(operation) => {
                write!(f, "storage lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Key to string persistence.
pub trait DurableStore: Send + Sync {
    /// Load the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store (or overwrite) the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value under `key`. Returns true if one existed.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;
}
