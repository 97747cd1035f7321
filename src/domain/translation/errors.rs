//! Translation Context - Errors

use thiserror::Error;

/// 翻译文件组装错误，均为不可恢复错误
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("文库小说不允许日语下载")]
    JpDownloadForbidden,

    #[error("严重错误：章节 '{chapter_id}' 第 {index} 份翻译行数 ({translated}) 与日文行数 ({original}) 不匹配")]
    LineCountMismatch {
        chapter_id: String,
        index: usize,
        translated: usize,
        original: usize,
    },

    #[error("章节原文缺失: {0}")]
    MissingChapter(String),

    #[error("写入失败: {0}")]
    Write(#[from] std::io::Error),
}

impl AssemblyError {
    /// 行数差（译文 - 原文），仅对行数不匹配有意义
    pub fn line_delta(&self) -> Option<isize> {
        match self {
            AssemblyError::LineCountMismatch {
                translated,
                original,
                ..
            } => Some(*translated as isize - *original as isize),
            _ => None,
        }
    }
}

/// 无法识别的翻译来源或下载模式
#[derive(Debug, Error)]
#[error("无法识别的{kind}: {value}")]
pub struct UnknownValueError {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownValueError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
