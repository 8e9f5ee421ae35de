//! Persistent key-value storage for the explicit theme choice.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;

/// String-valued persistent storage (localStorage, a state file, ...).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store. Clones share the same map, so a test (or host) can keep
/// a handle while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Read without going through the trait (never fails)
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries.borrow_mut().remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.peek(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    use tracing::debug;

    use super::KeyValueStore;
    use crate::error::Result;

    /// JSON object on disk, rewritten on every `set`.
    ///
    /// Stands in for browser localStorage on native hosts.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn load(&self) -> Result<BTreeMap<String, String>> {
            if !self.path.exists() {
                return Ok(BTreeMap::new());
            }
            let raw = std::fs::read_to_string(&self.path)?;
            if raw.trim().is_empty() {
                return Ok(BTreeMap::new());
            }
            Ok(serde_json::from_str(&raw)?)
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.load()?.remove(key))
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            let mut entries = self.load()?;
            entries.insert(key.to_string(), value.to_string());

            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
            debug!("Wrote {}={} to {}", key, value, self.path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();

        store.set("theme", "dark").unwrap();
        assert_eq!(handle.get("theme").unwrap(), Some("dark".to_string()));
        assert_eq!(handle.len(), 1);

        handle.remove("theme");
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_missing_key() {
        let store = MemoryStore::with_entry("other", "x");
        assert_eq!(store.get("theme").unwrap(), None);
        assert_eq!(store.peek("other"), Some("x".to_string()));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let first = FileStore::new(&path);
        assert_eq!(first.get("theme").unwrap(), None);
        first.set("theme", "light").unwrap();
        first.set("other", "value").unwrap();

        let second = FileStore::new(&path);
        assert_eq!(second.get("theme").unwrap(), Some("light".to_string()));
        assert_eq!(second.get("other").unwrap(), Some("value".to_string()));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.get("theme"),
            Err(crate::error::ThemeError::Json(_))
        ));
    }
}
