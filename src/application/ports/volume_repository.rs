//! Volume Repository Port - 出站端口
//!
//! 分卷源文件、解包后的原文与各来源译文的存取

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

use crate::domain::translation::TranslatorId;
use crate::domain::volume::{ChapterId, NovelId, VolumeId, VolumeSummary};

/// 仓储错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    Invalid(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Archive error: {0}")]
    ArchiveError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 单个分卷的内容（同步接口，在阻塞线程中使用）
pub trait VolumeContent: Send + Sync {
    /// 源文件路径
    fn source_path(&self) -> &Path;

    /// 所有章节，按章节标识排序
    fn list_chapters(&self) -> Result<BTreeSet<ChapterId>, RepositoryError>;

    /// 章节原文，章节不存在时返回 `None`
    fn get_chapter(&self, chapter_id: &ChapterId) -> Result<Option<Vec<String>>, RepositoryError>;

    /// 某来源对章节的译文，未翻译时返回 `None`
    fn get_translation(
        &self,
        translator: TranslatorId,
        chapter_id: &ChapterId,
    ) -> Result<Option<Vec<String>>, RepositoryError>;
}

/// Volume Repository Port - 出站端口
#[async_trait]
pub trait VolumeRepositoryPort: Send + Sync {
    /// 列出小说的所有分卷
    async fn list_volumes(&self, novel_id: &NovelId) -> Result<Vec<VolumeSummary>, RepositoryError>;

    /// 保存分卷源文件，`unpack` 时同时解包出章节原文，返回章节数
    async fn create_volume(
        &self,
        novel_id: &NovelId,
        volume_id: &VolumeId,
        data: &[u8],
        unpack: bool,
    ) -> Result<usize, RepositoryError>;

    /// 删除分卷及其所有派生文件，分卷不存在时什么也不做
    async fn delete_volume(&self, novel_id: &NovelId, volume_id: &VolumeId) -> Result<(), RepositoryError>;

    /// 获取分卷，源文件不存在时返回 `None`
    async fn get_volume(
        &self,
        novel_id: &NovelId,
        volume_id: &VolumeId,
    ) -> Result<Option<Box<dyn VolumeContent>>, RepositoryError>;

    /// 保存译文，行数必须与原文一致
    async fn save_translation(
        &self,
        novel_id: &NovelId,
        volume_id: &VolumeId,
        translator: TranslatorId,
        chapter_id: &ChapterId,
        lines: &[String],
    ) -> Result<(), RepositoryError>;
}
