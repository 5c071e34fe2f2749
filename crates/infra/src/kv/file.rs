//! File-backed key/value store (one file per key).

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError, validate_key};

/// Durable store: `{dir}/{key}.json`.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// reader sees either the previous payload or the new one, never a torn write.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Open (and create if missing) the store directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "opened file key/value store");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        let written = write_synced(&tmp, value).and_then(|()| fs::rename(&tmp, &path));
        if let Err(err) = written {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != ErrorKind::NotFound {
                    tracing::warn!(
                        path = %tmp.display(),
                        error = %cleanup,
                        "failed to remove temp file after aborted write"
                    );
                }
            }
            return Err(err.into());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn write_synced(path: &Path, value: &str) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopening_the_store() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileKeyValueStore::open(dir.path()).unwrap();
        store.set("seri-arcade-gp", r#"{"balance":300}"#).unwrap();
        drop(store);

        let reopened = FileKeyValueStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get("seri-arcade-gp").unwrap().as_deref(),
            Some(r#"{"balance":300}"#)
        );
        assert!(dir.path().join("seri-arcade-gp.json").exists());
        assert!(!dir.path().join("seri-arcade-gp.json.tmp").exists());
    }

    #[test]
    fn missing_key_reads_as_none_and_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path().join("nested")).unwrap();

        assert_eq!(store.get("absent").unwrap(), None);
        store.remove("absent").unwrap();
    }

    #[test]
    fn path_traversal_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();

        let err = store.set("../escape", "x").unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }

    #[test]
    fn failed_write_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();

        // A non-empty directory where the target file belongs makes the rename fail.
        let blocker = dir.path().join("seri-arcade-gp.json");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), b"x").unwrap();

        assert!(store.set("seri-arcade-gp", r#"{"balance":300}"#).is_err());
        assert!(!dir.path().join("seri-arcade-gp.json.tmp").exists());
    }
}
