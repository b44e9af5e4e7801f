//! Opaque key-value persistence boundary for session-scoped state.

use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::{Map, Value};
use thiserror::Error;

/// Error returned when the underlying storage cannot be read or written.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred while reading or writing the session file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The session file exists but is not a JSON object.
    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Key-value storage that survives reloads within a session.
///
/// Values are pre-encoded JSON strings; the storage layer does not interpret
/// them. Implementations are free to batch or rewrite on every call.
pub trait SessionStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the underlying storage cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the underlying storage cannot be written.
    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage. Infallible; the default for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// File-backed storage: one JSON object per session file.
///
/// The whole file is rewritten on every `store` call. Placing the file under
/// the OS temp directory (see [`default_session_path`]) gives the closest
/// filesystem analogue of session-scoped storage: it survives reloads of the
/// tool but not a machine restart.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create a storage backed by the file at `path`. The file is created on
    /// the first `store` call, not here.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_object(&self) -> Result<Map<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&raw)?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

impl SessionStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let object = self.read_object()?;
        Ok(object.get(key).and_then(Value::as_str).map(str::to_owned))
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut object = self.read_object().unwrap_or_default();
        object.insert(key.to_owned(), Value::String(value.to_owned()));
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(&Value::Object(object))?)?;
        Ok(())
    }
}

/// Return the default session file path (`<tmp>/rulescope/session.json`).
#[must_use]
pub fn default_session_path() -> PathBuf {
    std::env::temp_dir().join("rulescope").join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert!(storage.load("k").unwrap().is_none());
        storage.store("k", "v").unwrap();
        assert_eq!(storage.load("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn file_storage_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut storage = FileStorage::new(path.clone());
        assert!(storage.load("flag").unwrap().is_none());
        storage.store("flag", "true").unwrap();
        storage.store("list", "[]").unwrap();

        let reopened = FileStorage::new(path);
        assert_eq!(reopened.load("flag").unwrap().as_deref(), Some("true"));
        assert_eq!(reopened.load("list").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn corrupt_session_file_reports_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        let storage = FileStorage::new(path);
        assert!(storage.load("flag").is_err());
    }
}
