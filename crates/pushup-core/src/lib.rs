//! Pixel Pushup Core Library
//!
//! Configuration, error types and storage backend selection shared by the
//! storage, processing and API crates.

pub mod config;
pub mod error;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, PushupConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
