//! Error types for the recipe box
//!
//! Nothing here is fatal: the store reports `NotFound` for missing ids, the
//! form layer reports validation problems, and storage failures are logged by
//! the store rather than aborting an operation.

use thiserror::Error;

/// Result type alias for recipe box operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// An operation referenced an id that is not in the collection
    #[error("recipe not found: {id}")]
    NotFound { id: String },

    /// Submitted form had a blank recipe name
    #[error("recipe name must not be empty")]
    EmptyName,

    /// Submitted calories were not a non-negative integer
    #[error("invalid calories value: {0:?}")]
    InvalidCalories(String),

    /// The key-value backend refused a read or write
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Whether this is the benign missing-id outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
