//! Key-addressed string storage.
//!
//! This is the local-storage boundary of the portal: one string payload per
//! fixed key, surviving process restarts (file backend) or living only as long
//! as the process (in-memory backend, for tests/dev). Callers own the payload
//! format; the store never inspects it.

pub mod file;
pub mod in_memory;

use std::sync::Arc;

use thiserror::Error;

pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The key contains characters the backend cannot address safely.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// A lock guarding the backend was poisoned by a panicking writer.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Fallible read/write by key.
///
/// `get` returns `Ok(None)` when the key has never been written.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Keys are limited to `[A-Za-z0-9._-]` so every backend can map them to a
/// file name without escaping.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
