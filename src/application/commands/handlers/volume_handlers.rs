//! Volume Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateVolume, DeleteVolume, SaveTranslation};
use crate::application::error::ApplicationError;
use crate::application::ports::VolumeRepositoryPort;
use crate::domain::volume::VolumeError;

// ============================================================================
// CreateVolume
// ============================================================================

/// 上传分卷响应
#[derive(Debug, Clone)]
pub struct CreateVolumeResponse {
    pub volume_id: String,
    /// 解包得到的章节数，未解包时为 0
    pub chapters: usize,
}

/// CreateVolume Handler
pub struct CreateVolumeHandler {
    volume_repo: Arc<dyn VolumeRepositoryPort>,
}

impl CreateVolumeHandler {
    pub fn new(volume_repo: Arc<dyn VolumeRepositoryPort>) -> Self {
        Self { volume_repo }
    }

    pub async fn handle(&self, command: CreateVolume) -> Result<CreateVolumeResponse, ApplicationError> {
        if !command.volume_id.is_txt() && !command.volume_id.is_epub() {
            return Err(VolumeError::UnsupportedFormat(command.volume_id.to_string()).into());
        }

        let chapters = self
            .volume_repo
            .create_volume(&command.novel_id, &command.volume_id, &command.data, command.unpack)
            .await?;

        tracing::info!(
            novel_id = %command.novel_id,
            volume_id = %command.volume_id,
            size = command.data.len(),
            chapters,
            "Volume created"
        );

        Ok(CreateVolumeResponse {
            volume_id: command.volume_id.to_string(),
            chapters,
        })
    }
}

// ============================================================================
// DeleteVolume
// ============================================================================

/// DeleteVolume Handler
pub struct DeleteVolumeHandler {
    volume_repo: Arc<dyn VolumeRepositoryPort>,
}

impl DeleteVolumeHandler {
    pub fn new(volume_repo: Arc<dyn VolumeRepositoryPort>) -> Self {
        Self { volume_repo }
    }

    pub async fn handle(&self, command: DeleteVolume) -> Result<(), ApplicationError> {
        self.volume_repo
            .delete_volume(&command.novel_id, &command.volume_id)
            .await?;

        tracing::info!(
            novel_id = %command.novel_id,
            volume_id = %command.volume_id,
            "Volume deleted"
        );

        Ok(())
    }
}

// ============================================================================
// SaveTranslation
// ============================================================================

/// SaveTranslation Handler
pub struct SaveTranslationHandler {
    volume_repo: Arc<dyn VolumeRepositoryPort>,
}

impl SaveTranslationHandler {
    pub fn new(volume_repo: Arc<dyn VolumeRepositoryPort>) -> Self {
        Self { volume_repo }
    }

    pub async fn handle(&self, command: SaveTranslation) -> Result<(), ApplicationError> {
        self.volume_repo
            .save_translation(
                &command.novel_id,
                &command.volume_id,
                command.translator,
                &command.chapter_id,
                &command.lines,
            )
            .await?;

        tracing::info!(
            novel_id = %command.novel_id,
            volume_id = %command.volume_id,
            translator = %command.translator,
            chapter_id = %command.chapter_id,
            lines = command.lines.len(),
            "Translation saved"
        );

        Ok(())
    }
}
