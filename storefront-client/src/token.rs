//! Session token storage
//!
//! The bearer token lives under a single fixed key, [`TOKEN_KEY`]. The file
//! store keeps a small JSON object (`{"jwt_token": "..."}`) so the layout
//! matches a browser-style key/value storage.

use crate::{ClientError, ClientResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// Key under which the session token is stored
pub const TOKEN_KEY: &str = "jwt_token";

/// Persistent storage for the session token
pub trait TokenStore: Debug + Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

/// Process-local token store
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
    fn get(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn set(&self, token: &str) -> ClientResult<()> {
        *self.token.write() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.token.write() = None;
        Ok(())
    }
}

/// JSON file token store
///
/// Other keys found in the file are preserved on write. A missing or
/// unreadable file reads as "no token".
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> HashMap<String, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "Token file is corrupt, ignoring");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        }
    }

    fn save(&self, entries: &HashMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ClientError::Storage(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, raw).map_err(|e| ClientError::Storage(e.to_string()))
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let _guard = self.lock.read();
        self.load().remove(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    fn set(&self, token: &str) -> ClientResult<()> {
        let _guard = self.lock.write();
        let mut entries = self.load();
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.save(&entries)
    }

    fn clear(&self) -> ClientResult<()> {
        let _guard = self.lock.write();
        let mut entries = self.load();
        if entries.remove(TOKEN_KEY).is_none() {
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
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert!(store.get().is_none());
        store.set("abc").unwrap();
        assert_eq!(store.get().as_deref(), Some("abc"));
        store.clear().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_file_store_persists_under_fixed_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session").join("storage.json");

        let store = FileTokenStore::new(&path);
        assert!(store.get().is_none());
        store.set("tok-1").unwrap();

        let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["jwt_token"], "tok-1");

        // A second store over the same file sees the token
        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.get().as_deref(), Some("tok-1"));

        reopened.clear().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let store = FileTokenStore::new(&path);
        store.set("tok").unwrap();
        store.clear().unwrap();

        let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert!(raw.get("jwt_token").is_none());
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(FileTokenStore::new(&path).get().is_none());
    }
}
