//! Volume Queries

use crate::domain::volume::{ChapterId, NovelId, VolumeId};

/// 列出小说分卷查询
#[derive(Debug, Clone)]
pub struct ListVolumes {
    pub novel_id: NovelId,
}

/// 获取章节原文与译文查询
#[derive(Debug, Clone)]
pub struct GetChapter {
    pub novel_id: NovelId,
    pub volume_id: VolumeId,
    pub chapter_id: ChapterId,
}
