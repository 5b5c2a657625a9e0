//! App settings and preferences
//!
//! Persisted separately from the recipes, in their own storage slot.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// App settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Slot holding the recipe collection
    pub storage_key: String,
    /// Populate sample recipes when the slot is empty
    pub seed_when_empty: bool,
    /// Ask before deleting a recipe
    pub confirm_delete: bool,
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: crate::consts::RECIPES_KEY.to_string(),
            seed_when_empty: true,
            confirm_delete: true,
            log_level: LogLevel::Info,
        }
    }
}

impl Settings {
    /// Storage key for the settings slot
    pub const STORAGE_KEY: &'static str = "recipe_box_settings";

    /// Load settings, falling back to defaults when absent or unreadable
    pub fn load(storage: &impl KeyValueStore) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Cannot read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings, writing the defaults out when the slot has never been
    /// written so they can be edited in place. An unreadable slot is left alone.
    pub fn load_or_init(storage: &mut impl KeyValueStore) -> Self {
        let absent = matches!(storage.get(Self::STORAGE_KEY), Ok(None));
        let settings = Self::load(storage);
        if absent {
            settings.save(storage);
        }
        settings
    }

    /// Save settings; failures are logged
    pub fn save(&self, storage: &mut impl KeyValueStore) {
        let result = serde_json::to_string(self)
            .map_err(crate::Error::from)
            .and_then(|json| storage.set(Self::STORAGE_KEY, &json));
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str(" warning "), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str("loud"), None);
        for level in [LogLevel::Error, LogLevel::Warn, LogLevel::Info, LogLevel::Debug, LogLevel::Trace] {
            assert_eq!(LogLevel::from_str(level.as_str()), Some(level));
        }
    }

    #[test]
    fn test_missing_settings_use_defaults() {
        let storage = MemoryStorage::new();
        let settings = Settings::load(&storage);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.storage_key, "recipes");
        assert!(settings.seed_when_empty);
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            storage_key: "my_recipes".to_string(),
            seed_when_empty: false,
            confirm_delete: false,
            log_level: LogLevel::Debug,
        };
        settings.save(&mut storage);
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let storage = MemoryStorage::with_slot(Settings::STORAGE_KEY, r#"{"confirm_delete":false}"#);
        let settings = Settings::load(&storage);
        assert!(!settings.confirm_delete);
        assert_eq!(settings.storage_key, "recipes");
        assert_eq!(settings.log_level, LogLevel::Info);
    }

    #[test]
    fn test_load_or_init_writes_defaults_once() {
        let mut storage = MemoryStorage::new();
        assert_eq!(Settings::load_or_init(&mut storage), Settings::default());
        let written = storage.get(Settings::STORAGE_KEY).unwrap().unwrap();
        assert_eq!(serde_json::from_str::<Settings>(&written).unwrap(), Settings::default());

        // Existing slots are read, not rewritten
        let custom = r#"{"confirm_delete":false}"#;
        let mut storage = MemoryStorage::with_slot(Settings::STORAGE_KEY, custom);
        assert!(!Settings::load_or_init(&mut storage).confirm_delete);
        assert_eq!(storage.get(Settings::STORAGE_KEY).unwrap().as_deref(), Some(custom));
    }

    #[test]
    fn test_load_or_init_keeps_unreadable_slot() {
        let mut storage = MemoryStorage::with_slot(Settings::STORAGE_KEY, "{not json");
        assert_eq!(Settings::load_or_init(&mut storage), Settings::default());
        assert_eq!(storage.get(Settings::STORAGE_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_corrupt_settings_use_defaults() {
        let storage = MemoryStorage::with_slot(Settings::STORAGE_KEY, "{not json");
        assert_eq!(Settings::load(&storage), Settings::default());
    }
}
