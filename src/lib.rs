//! Recipe Box - a small recipe list manager
//!
//! Core modules:
//! - `store`: The recipe collection and its operations (add, edit, delete,
//!   favorite, search, calorie tally), written through to storage
//! - `persistence`: Key-value storage backends
//! - `view`: Presentation state and user intents, independent of any UI
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Persisted preferences

pub mod error;
pub mod id;
pub mod persistence;
pub mod platform;
pub mod recipe;
pub mod settings;
pub mod store;
pub mod view;

#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{Error, Result};
pub use persistence::{KeyValueStore, MemoryStorage};
pub use recipe::{Recipe, RecipeDraft};
pub use settings::{LogLevel, Settings};
pub use store::RecipeStore;
pub use view::{Intent, ListView, RecipeView};

/// Storage constants
pub mod consts {
    /// Default slot holding the serialized recipe list
    pub const RECIPES_KEY: &str = "recipes";
}
