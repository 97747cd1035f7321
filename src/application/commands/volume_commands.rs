//! Volume Commands

use crate::domain::translation::TranslatorId;
use crate::domain::volume::{ChapterId, NovelId, VolumeId};

/// 上传分卷命令
#[derive(Debug, Clone)]
pub struct CreateVolume {
    pub novel_id: NovelId,
    pub volume_id: VolumeId,
    pub data: Vec<u8>,
    /// 是否解包出章节原文
    pub unpack: bool,
}

/// 删除分卷命令
#[derive(Debug, Clone)]
pub struct DeleteVolume {
    pub novel_id: NovelId,
    pub volume_id: VolumeId,
}

/// 保存章节译文命令
#[derive(Debug, Clone)]
pub struct SaveTranslation {
    pub novel_id: NovelId,
    pub volume_id: VolumeId,
    pub translator: TranslatorId,
    pub chapter_id: ChapterId,
    pub lines: Vec<String>,
}
