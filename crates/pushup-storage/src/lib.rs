//! Pushup Storage Library
//!
//! Storage abstraction and backends for the pushup pipeline: S3 (and
//! S3-compatible providers) through `object_store`, plus a local filesystem
//! backend for development.
//!
//! # Storage key format
//!
//! Every object lives under `assets/img/{bucket_dir}/{stem}/`:
//!
//! - **Original**: `assets/img/{bucket_dir}/{stem}/original{.ext}`
//! - **Variants**: `assets/img/{bucket_dir}/{stem}/{size_name}.webp`
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized in the
//! `keys` module so the pipeline and all backends agree on the layout.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use pushup_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
