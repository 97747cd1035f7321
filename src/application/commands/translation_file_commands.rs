//! Translation File Commands

use crate::domain::translation::{NovelFileMode, NovelFileTranslationsMode, TranslatorId};
use crate::domain::volume::{NovelId, VolumeId};

/// 生成翻译文件命令
#[derive(Debug, Clone)]
pub struct MakeTranslationFile {
    pub novel_id: NovelId,
    pub volume_id: VolumeId,
    pub mode: NovelFileMode,
    pub translations_mode: NovelFileTranslationsMode,
    /// 翻译来源，Priority 模式下按顺序选取
    pub translations: Vec<TranslatorId>,
}
