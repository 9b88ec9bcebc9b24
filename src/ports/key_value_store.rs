//! Key Value Store Port - Interface for persisting scalar preferences.
//!
//! Holds the handful of string entries that survive a restart. Values are
//! stored verbatim; parsing and defaulting happen in the bootstrap.

use async_trait::async_trait;

/// Errors that can occur during key value store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to serialize store: {0}")]
    Serialization(String),

    #[error("Failed to deserialize store: {0}")]
    Deserialization(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Port for string key/value persistence.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
