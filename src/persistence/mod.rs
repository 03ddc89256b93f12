//! Key-value persistence
//!
//! The game keeps three small records between visits: the highest unlocked
//! level, per-level best scores and settings. All of them go through the
//! `KeyValueStore` seam so the session logic never touches browser APIs.
//!
//! - `MemoryStore`: in-process map (native builds and tests)
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)

pub mod progress;

#[cfg(target_arch = "wasm32")]
mod local_storage;

use std::collections::HashMap;

use thiserror::Error;

pub use progress::ProgressRecord;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Failure reading or writing a stored record
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("malformed value for {key}: {value:?}")]
    Malformed { key: String, value: String },
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to encode record: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// String key-value store, the shape of browser LocalStorage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Store backed by a `HashMap`; contents vanish with the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read and deserialize a JSON record; absent keys yield `None`
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>>
where
    T: serde::de::DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|_| StorageError::Malformed {
                key: key.to_string(),
                value: json,
            }),
        None => Ok(None),
    }
}

/// Serialize a record as JSON and write it
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: serde::Serialize,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_load_json_malformed() {
        let store = MemoryStore::with_entry("k", "{not json");
        let err = load_json::<Vec<u32>, _>(&store, "k").unwrap_err();
        assert!(matches!(err, StorageError::Malformed { .. }));
        assert_eq!(err.to_string(), "malformed value for k: \"{not json\"");
    }

    #[test]
    fn test_json_through_boxed_store() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        save_json(&mut store, "k", &vec![1u32, 2]).unwrap();
        let loaded: Option<Vec<u32>> = load_json(&store, "k").unwrap();
        assert_eq!(loaded, Some(vec![1, 2]));
    }
}
