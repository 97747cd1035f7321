//! Volume Context - Value Objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::VolumeError;

/// 文库小说标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NovelId(String);

impl NovelId {
    pub fn new(id: impl Into<String>) -> Result<Self, VolumeError> {
        let id = id.into();
        if !is_safe_path_component(&id) {
            return Err(VolumeError::InvalidNovelId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NovelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 分卷标识（即上传时的文件名，如 `vol1.epub`）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VolumeId(String);

impl VolumeId {
    pub fn new(id: impl Into<String>) -> Result<Self, VolumeError> {
        let id = id.into();
        if !is_safe_path_component(&id) {
            return Err(VolumeError::InvalidVolumeId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 文件扩展名，没有扩展名时视为 `txt`
    pub fn extension(&self) -> &str {
        match self.0.rfind('.') {
            Some(pos) => &self.0[pos + 1..],
            None => "txt",
        }
    }

    pub fn is_txt(&self) -> bool {
        self.0.ends_with(".txt")
    }

    pub fn is_epub(&self) -> bool {
        self.0.ends_with(".epub")
    }
}

impl std::fmt::Display for VolumeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 章节标识
///
/// 由 EPUB 条目路径转义而来（`/` 替换为 `.`），TXT 分卷则是补零的分块序号。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChapterId(String);

impl ChapterId {
    pub fn new(id: impl Into<String>) -> Result<Self, VolumeError> {
        let id = id.into();
        if id.is_empty() || id == "." || id == ".." || id.contains('/') || id.contains('\\') {
            return Err(VolumeError::InvalidChapterId(id));
        }
        Ok(Self(id))
    }

    /// 由 EPUB 条目名得到章节标识
    pub fn from_entry_name(name: &str) -> Self {
        Self(escape_path(name))
    }

    /// 旧格式的章节标识，保留了开头的斜杠（转义后以 `.` 开头）
    pub fn legacy_from_entry_name(name: &str) -> Self {
        Self(escape_path(&format!("/{}", name)))
    }

    /// 在已有章节中查找条目对应的章节，旧格式优先
    pub fn resolve_entry(name: &str, chapters: &BTreeSet<ChapterId>) -> Option<Self> {
        let legacy = Self::legacy_from_entry_name(name);
        if chapters.contains(&legacy) {
            return Some(legacy);
        }
        let current = Self::from_entry_name(name);
        if chapters.contains(&current) {
            return Some(current);
        }
        None
    }

    /// TXT 分卷的分块章节标识
    pub fn for_text_chunk(index: usize) -> Self {
        Self(format!("{:05}", index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChapterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn escape_path(path: &str) -> String {
    path.replace('/', ".")
}

fn is_safe_path_component(s: &str) -> bool {
    !s.is_empty() && !s.starts_with('.') && !s.contains('/') && !s.contains('\\')
}
