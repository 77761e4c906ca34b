//! Storage setup and initialization

use anyhow::Result;
use pushup_core::Config;
use pushup_storage::{create_storage, Storage};
use std::sync::Arc;

/// Build the storage backend, or `None` when `S3_BUCKET_NAME` is unset.
pub async fn setup_storage(config: &Config) -> Result<Option<Arc<dyn Storage>>> {
    tracing::info!(backend = %config.storage_backend(), "Initializing storage...");

    let storage = create_storage(config).await?;

    match storage {
        Some(ref storage) => tracing::info!(
            backend = %storage.backend_type(),
            bucket = %storage.bucket(),
            "Storage initialized successfully"
        ),
        None => tracing::warn!(
            "S3_BUCKET_NAME is not set; /pushup will answer 500 until it is configured"
        ),
    }

    Ok(storage)
}
