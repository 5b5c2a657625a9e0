//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time (id timestamps)
//! - Storage (LocalStorage on web, a data directory on native)

use crate::persistence::KeyValueStore;

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Browser LocalStorage, or an in-memory slot when it is unavailable
/// (private browsing, sandboxed iframes).
#[cfg(target_arch = "wasm32")]
pub fn default_storage() -> Box<dyn KeyValueStore> {
    use crate::persistence::{LocalStorage, MemoryStorage};

    match LocalStorage::open() {
        Some(storage) => Box::new(storage),
        None => {
            log::warn!("LocalStorage unavailable, recipes will not survive a reload");
            Box::new(MemoryStorage::new())
        }
    }
}

/// Environment variable naming the native data directory
#[cfg(not(target_arch = "wasm32"))]
pub const DATA_DIR_ENV: &str = "RECIPE_BOX_DATA_DIR";

/// Data directory used when `RECIPE_BOX_DATA_DIR` is unset
#[cfg(not(target_arch = "wasm32"))]
pub const DEFAULT_DATA_DIR: &str = ".recipe-box";

/// File-backed storage under `$RECIPE_BOX_DATA_DIR` (or `.recipe-box`)
#[cfg(not(target_arch = "wasm32"))]
pub fn default_storage() -> Box<dyn KeyValueStore> {
    use crate::persistence::{FileStorage, MemoryStorage};

    let dir = std::env::var_os(DATA_DIR_ENV)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| DEFAULT_DATA_DIR.into());
    match FileStorage::open(&dir) {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            log::warn!("Cannot use data dir {}: {}, keeping recipes in memory", dir.display(), e);
            Box::new(MemoryStorage::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(now_millis() > 1_577_836_800_000);
    }
}
