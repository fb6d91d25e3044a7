//! # Store Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  KeyValueStore I/O (std::io / serde_json)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ◄── CoreError from workflows                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PosError::Store (orion-pos) ──► toast line                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use orion_core::CoreError;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the key/value file failed.
    #[error("Local storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A slot held something that is not valid JSON for its type.
    #[error("Local storage slot '{key}' is malformed: {reason}")]
    Malformed { key: String, reason: String },

    /// Value could not be encoded for storage.
    #[error("Failed to encode value for '{key}': {reason}")]
    Encode { key: String, reason: String },

    /// No platform data directory and none configured.
    #[error("No data directory available for local storage")]
    NoDataDir,

    /// A workflow hit a business rule.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// The workflow needs a signed-in user.
    #[error("Not signed in")]
    NotAuthenticated,
}

impl StoreError {
    pub fn malformed(key: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::Malformed {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// True for local storage failures (as opposed to rule violations).
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            StoreError::Io(_)
                | StoreError::Malformed { .. }
                | StoreError::Encode { .. }
                | StoreError::NoDataDir
        )
    }
}
