//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Backends are constructed once at startup and shared as `Arc<dyn Storage>`;
/// the pipeline never talks to a concrete client.
///
/// **Key format:** `assets/img/{bucket_dir}/{stem}/{name}`. See the crate root
/// documentation and [`crate::keys`].
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` to `storage_key`, replacing any existing object.
    /// Returns the public URL for the uploaded file.
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Delete a file by its storage key. Deleting a missing key is not an error.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check whether an object exists at exactly this key
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Size in bytes of a stored object, from metadata only.
    ///
    /// Returns `StorageError::NotFound` if the key does not exist.
    async fn content_length(&self, storage_key: &str) -> StorageResult<u64>;

    /// Public URL for a key; does not check that the object exists.
    fn public_url(&self, storage_key: &str) -> String;

    /// Bucket (or bucket directory) this backend writes into
    fn bucket(&self) -> &str;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
