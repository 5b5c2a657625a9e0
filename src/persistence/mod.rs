//! Key-value persistence
//!
//! The store only needs a synchronous string slot per key:
//! - `MemoryStorage`: in-process map, used by tests and as a fallback
//! - `LocalStorage`: browser LocalStorage (wasm32 only)
//! - `FileStorage`: one JSON file per key in a data directory (native only)

use std::collections::HashMap;

use crate::error::Result;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

/// A synchronous string slot per key
pub trait KeyValueStore {
    /// Read a slot; `Ok(None)` when nothing was ever written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with one slot
    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.slots.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_get_set() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("recipes").unwrap(), None);

        storage.set("recipes", "[]").unwrap();
        assert_eq!(storage.get("recipes").unwrap().as_deref(), Some("[]"));

        storage.set("recipes", "[1]").unwrap();
        assert_eq!(storage.get("recipes").unwrap().as_deref(), Some("[1]"));
        assert_eq!(storage.len(), 1);
        assert!(!storage.is_empty());
    }

    #[test]
    fn test_boxed_storage_delegates() {
        let mut storage: Box<dyn KeyValueStore> = Box::new(MemoryStorage::with_slot("a", "1"));
        assert_eq!(storage.get("a").unwrap().as_deref(), Some("1"));
        storage.set("b", "2").unwrap();
        assert_eq!(storage.get("b").unwrap().as_deref(), Some("2"));
    }
}
