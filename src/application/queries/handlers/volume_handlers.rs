//! Volume Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::VolumeRepositoryPort;
use crate::application::queries::{GetChapter, ListVolumes};
use crate::domain::translation::TranslatorId;
use crate::domain::volume::VolumeSummary;

// ============================================================================
// Response DTOs
// ============================================================================

/// 章节响应
#[derive(Debug, Clone)]
pub struct ChapterResponse {
    pub chapter_id: String,
    pub lines: Vec<String>,
    /// 已有的译文，按来源顺序
    pub translations: Vec<(TranslatorId, Vec<String>)>,
}

// ============================================================================
// Handlers
// ============================================================================

/// ListVolumes Handler
pub struct ListVolumesHandler {
    volume_repo: Arc<dyn VolumeRepositoryPort>,
}

impl ListVolumesHandler {
    pub fn new(volume_repo: Arc<dyn VolumeRepositoryPort>) -> Self {
        Self { volume_repo }
    }

    pub async fn handle(&self, query: ListVolumes) -> Result<Vec<VolumeSummary>, ApplicationError> {
        Ok(self.volume_repo.list_volumes(&query.novel_id).await?)
    }
}

/// GetChapter Handler
pub struct GetChapterHandler {
    volume_repo: Arc<dyn VolumeRepositoryPort>,
}

impl GetChapterHandler {
    pub fn new(volume_repo: Arc<dyn VolumeRepositoryPort>) -> Self {
        Self { volume_repo }
    }

    pub async fn handle(&self, query: GetChapter) -> Result<ChapterResponse, ApplicationError> {
        let volume = self
            .volume_repo
            .get_volume(&query.novel_id, &query.volume_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Volume", query.volume_id.as_str()))?;

        let chapter_id = query.chapter_id;
        tokio::task::spawn_blocking(move || -> Result<ChapterResponse, ApplicationError> {
            let lines = volume
                .get_chapter(&chapter_id)?
                .ok_or_else(|| ApplicationError::not_found("Chapter", chapter_id.as_str()))?;

            let mut translations = Vec::new();
            for translator in TranslatorId::ALL {
                if let Some(zh) = volume.get_translation(translator, &chapter_id)? {
                    translations.push((translator, zh));
                }
            }

            Ok(ChapterResponse {
                chapter_id: chapter_id.to_string(),
                lines,
                translations,
            })
        })
        .await?
    }
}
