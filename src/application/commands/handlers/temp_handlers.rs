//! Temp File Command Handlers

use std::sync::Arc;

use crate::application::commands::CollectTempFiles;
use crate::application::error::ApplicationError;
use crate::application::ports::{TempFileStorePort, TempGcResult};

/// CollectTempFiles Handler
pub struct CollectTempFilesHandler {
    temp_store: Arc<dyn TempFileStorePort>,
}

impl CollectTempFilesHandler {
    pub fn new(temp_store: Arc<dyn TempFileStorePort>) -> Self {
        Self { temp_store }
    }

    pub async fn handle(&self, command: CollectTempFiles) -> Result<TempGcResult, ApplicationError> {
        let result = self.temp_store.collect_garbage(command.max_age).await?;

        tracing::info!(
            root = %self.temp_store.root().display(),
            deleted_files = result.deleted_files,
            freed_bytes = result.freed_bytes,
            "Temp files collected"
        );

        Ok(result)
    }
}
