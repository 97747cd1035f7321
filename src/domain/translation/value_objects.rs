//! Translation Context - Value Objects

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::UnknownValueError;

/// 翻译来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslatorId {
    Baidu,
    Youdao,
    Gpt,
    Sakura,
}

impl TranslatorId {
    pub const ALL: [TranslatorId; 4] = [
        TranslatorId::Baidu,
        TranslatorId::Youdao,
        TranslatorId::Gpt,
        TranslatorId::Sakura,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TranslatorId::Baidu => "baidu",
            TranslatorId::Youdao => "youdao",
            TranslatorId::Gpt => "gpt",
            TranslatorId::Sakura => "sakura",
        }
    }

    /// 文件名中使用的单字符标记
    pub fn initial(&self) -> char {
        match self {
            TranslatorId::Baidu => 'b',
            TranslatorId::Youdao => 'y',
            TranslatorId::Gpt => 'g',
            TranslatorId::Sakura => 's',
        }
    }
}

impl std::fmt::Display for TranslatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranslatorId {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baidu" => Ok(TranslatorId::Baidu),
            "youdao" => Ok(TranslatorId::Youdao),
            "gpt" => Ok(TranslatorId::Gpt),
            "sakura" => Ok(TranslatorId::Sakura),
            _ => Err(UnknownValueError::new("翻译来源", s)),
        }
    }
}

/// 下载文件的语言模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NovelFileMode {
    /// 仅原文（文库不允许）
    #[serde(rename = "jp")]
    Jp,
    /// 仅译文
    #[serde(rename = "zh")]
    Zh,
    /// 原文在前，译文在后
    #[serde(rename = "jp-zh")]
    JpZh,
    /// 译文在前，原文在后
    #[serde(rename = "zh-jp")]
    ZhJp,
}

impl NovelFileMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NovelFileMode::Jp => "jp",
            NovelFileMode::Zh => "zh",
            NovelFileMode::JpZh => "jp-zh",
            NovelFileMode::ZhJp => "zh-jp",
        }
    }
}

impl std::fmt::Display for NovelFileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NovelFileMode {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jp" => Ok(NovelFileMode::Jp),
            "zh" => Ok(NovelFileMode::Zh),
            "jp-zh" => Ok(NovelFileMode::JpZh),
            "zh-jp" => Ok(NovelFileMode::ZhJp),
            _ => Err(UnknownValueError::new("下载模式", s)),
        }
    }
}

/// 多份翻译的取用方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NovelFileTranslationsMode {
    /// 并列：所有可用翻译各占一栏
    Parallel,
    /// 优先：按顺序取第一份可用翻译
    Priority,
}

impl NovelFileTranslationsMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NovelFileTranslationsMode::Parallel => "parallel",
            NovelFileTranslationsMode::Priority => "priority",
        }
    }

    /// 文件名中使用的标记
    pub fn tag(&self) -> char {
        match self {
            NovelFileTranslationsMode::Parallel => 'B',
            NovelFileTranslationsMode::Priority => 'Y',
        }
    }
}

impl FromStr for NovelFileTranslationsMode {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parallel" => Ok(NovelFileTranslationsMode::Parallel),
            "priority" => Ok(NovelFileTranslationsMode::Priority),
            _ => Err(UnknownValueError::new("翻译取用方式", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translator_tags_round_trip() {
        for translator in TranslatorId::ALL {
            assert_eq!(translator.as_str().parse::<TranslatorId>().unwrap(), translator);
            assert_eq!(translator.as_str().chars().next(), Some(translator.initial()));
        }
        let err = "deepl".parse::<TranslatorId>().unwrap_err();
        assert_eq!(err.value, "deepl");
    }

    #[test]
    fn test_modes_parse_from_names() {
        for mode in [
            NovelFileMode::Jp,
            NovelFileMode::Zh,
            NovelFileMode::JpZh,
            NovelFileMode::ZhJp,
        ] {
            assert_eq!(mode.to_string().parse::<NovelFileMode>().unwrap(), mode);
        }
        assert!("jpzh".parse::<NovelFileMode>().is_err());

        for mode in [
            NovelFileTranslationsMode::Parallel,
            NovelFileTranslationsMode::Priority,
        ] {
            assert_eq!(mode.as_str().parse::<NovelFileTranslationsMode>().unwrap(), mode);
        }
        assert!("Priority".parse::<NovelFileTranslationsMode>().is_err());
    }

    #[test]
    fn test_mode_serde_names() {
        let json = serde_json::to_string(&NovelFileMode::ZhJp).unwrap();
        assert_eq!(json, "\"zh-jp\"");
        let mode: NovelFileMode = serde_json::from_str("\"jp-zh\"").unwrap();
        assert_eq!(mode, NovelFileMode::JpZh);

        let json = serde_json::to_string(&NovelFileTranslationsMode::Priority).unwrap();
        assert_eq!(json, "\"priority\"");
    }
}
