//! Browser LocalStorage backend

use wasm_bindgen::JsValue;

use super::KeyValueStore;
use crate::error::{Error, Result};

pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// The window's LocalStorage, if the browser exposes one
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;
        Some(Self { storage })
    }
}

fn js_error(op: &str, key: &str, err: JsValue) -> Error {
    Error::Storage(format!("{op} {key}: {err:?}"))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| js_error("get", key, e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Fails when the origin's quota is exhausted
        self.storage
            .set_item(key, value)
            .map_err(|e| js_error("set", key, e))
    }
}
