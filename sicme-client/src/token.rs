//! Access token storage
//!
//! The console keeps exactly one piece of durable state: the bearer token,
//! stored under the `access_token` key.

use serde_json::{Map, Value};
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

/// Storage key of the bearer token
pub const ACCESS_TOKEN_KEY: &str = "access_token";

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read/write/clear access to the stored token.
pub trait TokenStore: Send + Sync + Debug {
    fn read(&self) -> Option<String>;
    fn write(&self, token: &str) -> Result<(), TokenStoreError>;
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Token kept in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn read(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn write(&self, token: &str) -> Result<(), TokenStoreError> {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
        Ok(())
    }
}

/// Token persisted in a small JSON key/value file
///
/// Other keys in the file are preserved; the file is removed once the
/// token is cleared and nothing else is left in it.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, TokenStoreError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let json = fs::read_to_string(&self.path)?;
        if json.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, entries: &Map<String, Value>) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn read(&self) -> Option<String> {
        match self.load() {
            Ok(entries) => entries
                .get(ACCESS_TOKEN_KEY)
                .and_then(Value::as_str)
                .map(str::to_string),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Unreadable token file");
                None
            }
        }
    }

    fn write(&self, token: &str) -> Result<(), TokenStoreError> {
        let mut entries = self.load().unwrap_or_default();
        entries.insert(ACCESS_TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.save(&entries)
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut entries = self.load().unwrap_or_default();
        entries.remove(ACCESS_TOKEN_KEY);
        if entries.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            return Ok(());
        }
        self.save(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("session/storage.json"));

        assert!(store.read().is_none());
        store.write("tok-1").unwrap();
        assert_eq!(store.read().as_deref(), Some("tok-1"));

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"access_token\""));

        store.clear().unwrap();
        assert!(store.read().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let store = FileTokenStore::new(&path);
        store.write("tok-2").unwrap();
        store.clear().unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("theme"));
        assert!(!raw.contains("access_token"));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::with_token("abc");
        assert_eq!(store.read().as_deref(), Some("abc"));
        store.clear().unwrap();
        assert!(store.read().is_none());
    }
}
