use std::collections::HashMap;
use std::sync::RwLock;

use super::{KeyValueStore, StorageError, validate_key};

/// In-memory key/value store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store that already holds `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            inner: RwLock::new(map),
        }
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let map = self
            .inner
            .read()
            .map_err(|_| StorageError::Unavailable("lock poisoned".to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut map = self
            .inner
            .write()
            .map_err(|_| StorageError::Unavailable("lock poisoned".to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut map = self
            .inner
            .write()
            .map_err(|_| StorageError::Unavailable("lock poisoned".to_string()))?;
        map.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_latest_value() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("seri-arcade-gp").unwrap(), None);

        store.set("seri-arcade-gp", "first").unwrap();
        store.set("seri-arcade-gp", "second").unwrap();
        assert_eq!(store.get("seri-arcade-gp").unwrap().as_deref(), Some("second"));

        store.remove("seri-arcade-gp").unwrap();
        assert_eq!(store.get("seri-arcade-gp").unwrap(), None);
    }

    #[test]
    fn seeded_entries_are_visible() {
        let store = InMemoryKeyValueStore::with_entries([("k", "v")]);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
