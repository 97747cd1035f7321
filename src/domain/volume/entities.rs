//! Volume Context - Entities

use serde::{Deserialize, Serialize};

use crate::domain::translation::TranslatorId;

/// 分卷概况：章节总数与各翻译来源已完成的章节数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeSummary {
    pub volume_id: String,
    pub total: usize,
    pub baidu: usize,
    pub youdao: usize,
    pub gpt: usize,
    pub sakura: usize,
}

impl VolumeSummary {
    pub fn new(volume_id: impl Into<String>, total: usize) -> Self {
        Self {
            volume_id: volume_id.into(),
            total,
            ..Default::default()
        }
    }

    pub fn translated(&self, translator: TranslatorId) -> usize {
        match translator {
            TranslatorId::Baidu => self.baidu,
            TranslatorId::Youdao => self.youdao,
            TranslatorId::Gpt => self.gpt,
            TranslatorId::Sakura => self.sakura,
        }
    }

    pub fn set_translated(&mut self, translator: TranslatorId, count: usize) {
        let slot = match translator {
            TranslatorId::Baidu => &mut self.baidu,
            TranslatorId::Youdao => &mut self.youdao,
            TranslatorId::Gpt => &mut self.gpt,
            TranslatorId::Sakura => &mut self.sakura,
        };
        *slot = count;
    }
}
