//! Application state shared by all handlers.

use pushup_core::{AppError, Config};
use pushup_storage::Storage;
use std::sync::Arc;

use crate::constants::MISSING_BUCKET_MESSAGE;
use crate::services::pushup::PushupService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no bucket is configured
    pub storage: Option<Arc<dyn Storage>>,
}

impl AppState {
    pub fn new(config: Config, storage: Option<Arc<dyn Storage>>) -> Self {
        Self { config, storage }
    }

    /// Pipeline service bound to the configured storage.
    ///
    /// Fails with a configuration error when no bucket is set.
    pub fn pushup_service(&self) -> Result<PushupService, AppError> {
        let storage = self
            .storage
            .clone()
            .ok_or_else(|| AppError::Config(MISSING_BUCKET_MESSAGE.to_string()))?;
        Ok(PushupService::new(storage, self.config.cleanup_on_failure()))
    }
}
