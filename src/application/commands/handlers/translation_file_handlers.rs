//! Translation File Handlers
//!
//! 把日文原文与一份或多份译文组装成可下载的 TXT/EPUB 文件

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::commands::MakeTranslationFile;
use crate::application::error::ApplicationError;
use crate::application::ports::{TempFileStorePort, TempFileType, VolumeContent, VolumeRepositoryPort};
use crate::domain::bilingual::{merge_paragraphs, write_text_volume};
use crate::domain::translation::{
    resolve_translations, AssemblyError, NovelFileMode, NovelFileTranslationsMode, TranslatorId,
};
use crate::domain::translation_file_name;
use crate::domain::volume::{ChapterId, VolumeId};
use crate::epub::{normalize_package_document, rewrite_archive, write_atomic, XhtmlDocument};

/// 生成翻译文件响应
#[derive(Debug, Clone)]
pub struct MakeTranslationFileResponse {
    /// 临时目录中的文件名
    pub file_name: String,
    pub path: PathBuf,
}

/// MakeTranslationFile Handler
pub struct MakeTranslationFileHandler {
    volume_repo: Arc<dyn VolumeRepositoryPort>,
    temp_store: Arc<dyn TempFileStorePort>,
}

impl MakeTranslationFileHandler {
    pub fn new(volume_repo: Arc<dyn VolumeRepositoryPort>, temp_store: Arc<dyn TempFileStorePort>) -> Self {
        Self {
            volume_repo,
            temp_store,
        }
    }

    /// 分卷不存在时返回 `None`
    pub async fn handle(
        &self,
        command: MakeTranslationFile,
    ) -> Result<Option<MakeTranslationFileResponse>, ApplicationError> {
        if command.mode == NovelFileMode::Jp {
            return Err(AssemblyError::JpDownloadForbidden.into());
        }

        let volume = match self
            .volume_repo
            .get_volume(&command.novel_id, &command.volume_id)
            .await?
        {
            Some(volume) => volume,
            None => return Ok(None),
        };

        let file_name = translation_file_name(
            &command.novel_id,
            &command.volume_id,
            command.mode,
            command.translations_mode,
            &command.translations,
        );

        let job = AssemblyJob {
            volume,
            volume_id: command.volume_id.clone(),
            mode: command.mode,
            translations_mode: command.translations_mode,
            translators: command.translations.clone(),
            temp_store: Arc::clone(&self.temp_store),
            file_name: file_name.clone(),
        };

        let path = match tokio::task::spawn_blocking(move || job.run()).await? {
            Ok(path) => path,
            Err(e) => {
                tracing::error!(
                    novel_id = %command.novel_id,
                    volume_id = %command.volume_id,
                    error = %e,
                    "Translation file assembly failed"
                );
                return Err(e);
            }
        };

        tracing::info!(
            novel_id = %command.novel_id,
            volume_id = %command.volume_id,
            mode = %command.mode,
            translators = command.translations.len(),
            file_name = %file_name,
            "Translation file assembled"
        );

        Ok(Some(MakeTranslationFileResponse { file_name, path }))
    }
}

/// 在阻塞线程中执行的组装任务
struct AssemblyJob {
    volume: Box<dyn VolumeContent>,
    volume_id: VolumeId,
    mode: NovelFileMode,
    translations_mode: NovelFileTranslationsMode,
    translators: Vec<TranslatorId>,
    temp_store: Arc<dyn TempFileStorePort>,
    file_name: String,
}

impl AssemblyJob {
    fn run(self) -> Result<PathBuf, ApplicationError> {
        let dst = self.temp_store.create_file(TempFileType::Wenku, &self.file_name)?;
        let chapters = self.volume.list_chapters()?;

        if self.volume_id.is_txt() {
            let chapter_ids: Vec<ChapterId> = chapters.into_iter().collect();
            write_atomic(&dst, |file: &mut File| -> Result<(), ApplicationError> {
                let mut out = BufWriter::new(file);
                write_text_volume(
                    &mut out,
                    self.mode,
                    &chapter_ids,
                    |chapter_id| self.translations_for(chapter_id),
                    |chapter_id| Ok(self.volume.get_chapter(chapter_id)?),
                )?;
                out.flush().map_err(AssemblyError::from)?;
                Ok(())
            })?;
        } else {
            rewrite_archive(self.volume.source_path(), &dst, |name, bytes| {
                self.transform_entry(&chapters, name, bytes)
            })?;
        }

        Ok(dst)
    }

    fn translations_for(&self, chapter_id: &ChapterId) -> Result<Vec<Vec<String>>, ApplicationError> {
        resolve_translations(self.translations_mode, &self.translators, |translator| {
            self.volume.get_translation(translator, chapter_id)
        })
        .map_err(ApplicationError::from)
    }

    /// 单个 EPUB 条目的改写，`None` 表示原样保留
    fn transform_entry(
        &self,
        chapters: &BTreeSet<ChapterId>,
        name: &str,
        bytes: &[u8],
    ) -> Result<Option<Vec<u8>>, ApplicationError> {
        if let Some(chapter_id) = ChapterId::resolve_entry(name, chapters) {
            let zh_lines_list = self.translations_for(&chapter_id)?;
            if zh_lines_list.is_empty() {
                return Ok(None);
            }
            let mut doc = XhtmlDocument::parse(bytes)?;
            merge_paragraphs(&mut doc, &chapter_id, self.mode, &zh_lines_list)?;
            Ok(Some(doc.to_bytes()?))
        } else if name.ends_with("opf") {
            Ok(Some(normalize_package_document(bytes)?))
        } else if name.ends_with("css") {
            Ok(Some(Vec::new()))
        } else {
            Ok(None)
        }
    }
}
