//! Disk Volume Repository
//!
//! 目录结构（每部小说一个目录）：
//! - `{volumeId}`：上传的源文件
//! - `{volumeId}.unpack/{chapterId}`：章节原文（JSON 字符串数组）
//! - `{volumeId}.{translator}/{chapterId}`：译文（JSON 字符串数组）

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{RepositoryError, VolumeContent, VolumeRepositoryPort};
use crate::domain::translation::TranslatorId;
use crate::domain::volume::{split_text_volume, ChapterId, NovelId, VolumeId, VolumeSummary};
use crate::epub::{extract_chapters, is_partial_file, write_atomic, ArchiveError};

impl From<ArchiveError> for RepositoryError {
    fn from(err: ArchiveError) -> Self {
        match err {
            ArchiveError::Io(e) => RepositoryError::IoError(e.to_string()),
            other => RepositoryError::ArchiveError(other.to_string()),
        }
    }
}

fn io_error(e: io::Error) -> RepositoryError {
    RepositoryError::IoError(e.to_string())
}

/// 分卷在小说目录下的各路径
#[derive(Debug, Clone)]
struct VolumePaths {
    dir: PathBuf,
    volume_id: VolumeId,
}

impl VolumePaths {
    fn source(&self) -> PathBuf {
        self.dir.join(self.volume_id.as_str())
    }

    fn unpack_dir(&self) -> PathBuf {
        self.dir.join(format!("{}.unpack", self.volume_id))
    }

    fn translation_dir(&self, translator: TranslatorId) -> PathBuf {
        self.dir
            .join(format!("{}.{}", self.volume_id, translator.as_str()))
    }
}

/// 文件系统分卷仓储
pub struct DiskVolumeRepository {
    /// 文库根目录
    root: PathBuf,
    /// TXT 分卷每个章节的行数
    txt_chunk_lines: usize,
}

impl DiskVolumeRepository {
    pub fn new(root: impl AsRef<Path>, txt_chunk_lines: usize) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            txt_chunk_lines,
        }
    }

    fn novel_dir(&self, novel_id: &NovelId) -> PathBuf {
        self.root.join(novel_id.as_str())
    }

    fn paths(&self, novel_id: &NovelId, volume_id: &VolumeId) -> VolumePaths {
        VolumePaths {
            dir: self.novel_dir(novel_id),
            volume_id: volume_id.clone(),
        }
    }
}

// ============================================================================
// 同步文件操作（在阻塞线程中执行）
// ============================================================================

fn read_lines(path: &Path) -> Result<Option<Vec<String>>, RepositoryError> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(e)),
    };
    let lines = serde_json::from_slice(&data)
        .map_err(|e| RepositoryError::SerializationError(format!("{:?}: {}", path, e)))?;
    Ok(Some(lines))
}

fn write_lines(path: &Path, lines: &[String]) -> Result<(), RepositoryError> {
    let json = serde_json::to_vec(lines)
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
    write_atomic(path, |file| file.write_all(&json).map_err(io_error))
}

/// 目录下已完成写入的文件名，目录不存在时为空
fn list_file_names(dir: &Path) -> Result<Vec<String>, RepositoryError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error(e)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(io_error)?;
        if !entry.file_type().map_err(io_error)?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if !is_partial_file(&name) {
            names.push(name);
        }
    }
    Ok(names)
}

fn remove_dir_if_exists(dir: &Path) -> Result<(), RepositoryError> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_error(e)),
    }
}

/// 解析分卷章节，不触碰磁盘
fn parse_chapters(
    volume_id: &VolumeId,
    data: &[u8],
    txt_chunk_lines: usize,
) -> Result<Vec<(ChapterId, Vec<String>)>, RepositoryError> {
    if volume_id.is_txt() {
        let text = std::str::from_utf8(data).map_err(|e| {
            RepositoryError::Invalid(format!("{} is not valid UTF-8: {}", volume_id, e))
        })?;
        Ok(split_text_volume(text, txt_chunk_lines))
    } else {
        Ok(extract_chapters(Cursor::new(data))?)
    }
}

/// 写入章节原文，旧的章节与译文一并清除
fn store_chapters(
    paths: &VolumePaths,
    chapters: &[(ChapterId, Vec<String>)],
) -> Result<usize, RepositoryError> {
    let unpack_dir = paths.unpack_dir();
    remove_dir_if_exists(&unpack_dir)?;
    for translator in TranslatorId::ALL {
        remove_dir_if_exists(&paths.translation_dir(translator))?;
    }
    std::fs::create_dir_all(&unpack_dir).map_err(io_error)?;

    for (chapter_id, lines) in chapters {
        write_lines(&unpack_dir.join(chapter_id.as_str()), lines)?;
    }

    Ok(chapters.len())
}

fn create_volume_blocking(
    paths: &VolumePaths,
    data: &[u8],
    unpack: bool,
    txt_chunk_lines: usize,
) -> Result<usize, RepositoryError> {
    if !paths.volume_id.is_txt() && !paths.volume_id.is_epub() {
        return Err(RepositoryError::Invalid(format!(
            "unsupported volume format: {}",
            paths.volume_id
        )));
    }

    // 先解析再落盘，坏文件不会留下分卷
    let chapters = if unpack {
        Some(parse_chapters(&paths.volume_id, data, txt_chunk_lines)?)
    } else {
        None
    };

    std::fs::create_dir_all(&paths.dir).map_err(io_error)?;
    write_atomic(&paths.source(), |file| file.write_all(data).map_err(io_error))?;

    let Some(chapters) = chapters else {
        return Ok(0);
    };
    store_chapters(paths, &chapters).map_err(|e| {
        let _ = std::fs::remove_file(paths.source());
        let _ = remove_dir_if_exists(&paths.unpack_dir());
        e
    })
}

fn summarize_volume(paths: &VolumePaths) -> Result<VolumeSummary, RepositoryError> {
    let total = list_file_names(&paths.unpack_dir())?.len();
    let mut summary = VolumeSummary::new(paths.volume_id.as_str(), total);
    for translator in TranslatorId::ALL {
        let count = list_file_names(&paths.translation_dir(translator))?.len();
        summary.set_translated(translator, count);
    }
    Ok(summary)
}

/// 磁盘上的单个分卷
pub struct DiskVolumeContent {
    paths: VolumePaths,
    source: PathBuf,
}

impl VolumeContent for DiskVolumeContent {
    fn source_path(&self) -> &Path {
        &self.source
    }

    fn list_chapters(&self) -> Result<BTreeSet<ChapterId>, RepositoryError> {
        Ok(list_file_names(&self.paths.unpack_dir())?
            .into_iter()
            .filter_map(|name| ChapterId::new(name).ok())
            .collect())
    }

    fn get_chapter(&self, chapter_id: &ChapterId) -> Result<Option<Vec<String>>, RepositoryError> {
        read_lines(&self.paths.unpack_dir().join(chapter_id.as_str()))
    }

    fn get_translation(
        &self,
        translator: TranslatorId,
        chapter_id: &ChapterId,
    ) -> Result<Option<Vec<String>>, RepositoryError> {
        read_lines(&self.paths.translation_dir(translator).join(chapter_id.as_str()))
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, RepositoryError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, RepositoryError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| RepositoryError::IoError(format!("blocking task failed: {}", e)))?
}

async fn is_file(path: &Path) -> Result<bool, RepositoryError> {
    match fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_error(e)),
    }
}

// ============================================================================
// VolumeRepositoryPort 实现
// ============================================================================

#[async_trait]
impl VolumeRepositoryPort for DiskVolumeRepository {
    async fn list_volumes(&self, novel_id: &NovelId) -> Result<Vec<VolumeSummary>, RepositoryError> {
        let dir = self.novel_dir(novel_id);

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(e)),
        };

        let mut volumes = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
            if !entry.file_type().await.map_err(io_error)?.is_file() {
                continue;
            }
            if let Ok(volume_id) = VolumeId::new(entry.file_name().to_string_lossy().to_string()) {
                volumes.push(self.paths(novel_id, &volume_id));
            }
        }

        let mut summaries = run_blocking(move || {
            volumes.iter().map(summarize_volume).collect::<Result<Vec<_>, _>>()
        })
        .await?;
        summaries.sort_by(|a, b| a.volume_id.cmp(&b.volume_id));

        Ok(summaries)
    }

    async fn create_volume(
        &self,
        novel_id: &NovelId,
        volume_id: &VolumeId,
        data: &[u8],
        unpack: bool,
    ) -> Result<usize, RepositoryError> {
        let paths = self.paths(novel_id, volume_id);
        let data = data.to_vec();
        let txt_chunk_lines = self.txt_chunk_lines;

        let chapters =
            run_blocking(move || create_volume_blocking(&paths, &data, unpack, txt_chunk_lines))
                .await?;

        tracing::debug!(
            novel_id = %novel_id,
            volume_id = %volume_id,
            chapters,
            "Volume written to disk"
        );

        Ok(chapters)
    }

    async fn delete_volume(&self, novel_id: &NovelId, volume_id: &VolumeId) -> Result<(), RepositoryError> {
        let paths = self.paths(novel_id, volume_id);

        match fs::remove_file(paths.source()).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(io_error(e)),
        }

        run_blocking(move || {
            remove_dir_if_exists(&paths.unpack_dir())?;
            for translator in TranslatorId::ALL {
                remove_dir_if_exists(&paths.translation_dir(translator))?;
            }
            Ok(())
        })
        .await
    }

    async fn get_volume(
        &self,
        novel_id: &NovelId,
        volume_id: &VolumeId,
    ) -> Result<Option<Box<dyn VolumeContent>>, RepositoryError> {
        let paths = self.paths(novel_id, volume_id);
        let source = paths.source();

        if !is_file(&source).await? {
            return Ok(None);
        }

        Ok(Some(Box::new(DiskVolumeContent { paths, source })))
    }

    async fn save_translation(
        &self,
        novel_id: &NovelId,
        volume_id: &VolumeId,
        translator: TranslatorId,
        chapter_id: &ChapterId,
        lines: &[String],
    ) -> Result<(), RepositoryError> {
        let paths = self.paths(novel_id, volume_id);

        if !is_file(&paths.source()).await? {
            return Err(RepositoryError::NotFound(format!("{}/{}", novel_id, volume_id)));
        }

        let chapter_id = chapter_id.clone();
        let lines = lines.to_vec();

        run_blocking(move || {
            let original = read_lines(&paths.unpack_dir().join(chapter_id.as_str()))?
                .ok_or_else(|| {
                    RepositoryError::Invalid(format!("chapter {} does not exist", chapter_id))
                })?;

            if original.len() != lines.len() {
                return Err(RepositoryError::Invalid(format!(
                    "chapter {} has {} lines, translation has {}",
                    chapter_id,
                    original.len(),
                    lines.len()
                )));
            }

            let dir = paths.translation_dir(translator);
            std::fs::create_dir_all(&dir).map_err(io_error)?;
            write_lines(&dir.join(chapter_id.as_str()), &lines)
        })
        .await
    }
}
