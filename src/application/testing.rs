//! 测试用的内存端口实现

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{
    RepositoryError, TempFileError, TempFileStorePort, TempFileType, TempGcResult, VolumeContent,
    VolumeRepositoryPort,
};
use crate::domain::translation::TranslatorId;
use crate::domain::volume::{ChapterId, NovelId, VolumeId, VolumeSummary};

#[derive(Debug, Clone)]
pub struct MemoryVolume {
    source: PathBuf,
    chapters: BTreeMap<ChapterId, Vec<String>>,
    translations: HashMap<(TranslatorId, ChapterId), Vec<String>>,
}

impl MemoryVolume {
    pub fn new(source: PathBuf) -> Self {
        Self {
            source,
            chapters: BTreeMap::new(),
            translations: HashMap::new(),
        }
    }

    pub fn add_chapter(&mut self, chapter_id: ChapterId, lines: Vec<String>) {
        self.chapters.insert(chapter_id, lines);
    }

    pub fn add_translation(&mut self, translator: TranslatorId, chapter_id: ChapterId, lines: Vec<String>) {
        self.translations.insert((translator, chapter_id), lines);
    }
}

impl VolumeContent for MemoryVolume {
    fn source_path(&self) -> &Path {
        &self.source
    }

    fn list_chapters(&self) -> Result<BTreeSet<ChapterId>, RepositoryError> {
        Ok(self.chapters.keys().cloned().collect())
    }

    fn get_chapter(&self, chapter_id: &ChapterId) -> Result<Option<Vec<String>>, RepositoryError> {
        Ok(self.chapters.get(chapter_id).cloned())
    }

    fn get_translation(
        &self,
        translator: TranslatorId,
        chapter_id: &ChapterId,
    ) -> Result<Option<Vec<String>>, RepositoryError> {
        Ok(self
            .translations
            .get(&(translator, chapter_id.clone()))
            .cloned())
    }
}

#[derive(Default)]
pub struct MemoryVolumeRepository {
    volumes: Mutex<HashMap<(String, String), MemoryVolume>>,
}

impl MemoryVolumeRepository {
    pub fn insert(&self, novel_id: &str, volume_id: &str, volume: MemoryVolume) {
        if let Ok(mut volumes) = self.volumes.lock() {
            volumes.insert((novel_id.to_string(), volume_id.to_string()), volume);
        }
    }

    fn key(novel_id: &NovelId, volume_id: &VolumeId) -> (String, String) {
        (novel_id.to_string(), volume_id.to_string())
    }
}

#[async_trait]
impl VolumeRepositoryPort for MemoryVolumeRepository {
    async fn list_volumes(&self, novel_id: &NovelId) -> Result<Vec<VolumeSummary>, RepositoryError> {
        let volumes = self.volumes.lock().unwrap();
        let mut summaries: Vec<_> = volumes
            .iter()
            .filter(|((novel, _), _)| novel == novel_id.as_str())
            .map(|((_, volume_id), volume)| {
                let mut summary = VolumeSummary::new(volume_id.clone(), volume.chapters.len());
                for translator in TranslatorId::ALL {
                    let count = volume
                        .translations
                        .keys()
                        .filter(|(t, _)| *t == translator)
                        .count();
                    summary.set_translated(translator, count);
                }
                summary
            })
            .collect();
        summaries.sort_by(|a, b| a.volume_id.cmp(&b.volume_id));
        Ok(summaries)
    }

    async fn create_volume(
        &self,
        novel_id: &NovelId,
        volume_id: &VolumeId,
        _data: &[u8],
        _unpack: bool,
    ) -> Result<usize, RepositoryError> {
        let volume = MemoryVolume::new(PathBuf::from(volume_id.as_str()));
        self.insert(novel_id.as_str(), volume_id.as_str(), volume);
        Ok(0)
    }

    async fn delete_volume(&self, novel_id: &NovelId, volume_id: &VolumeId) -> Result<(), RepositoryError> {
        self.volumes.lock().unwrap().remove(&Self::key(novel_id, volume_id));
        Ok(())
    }

    async fn get_volume(
        &self,
        novel_id: &NovelId,
        volume_id: &VolumeId,
    ) -> Result<Option<Box<dyn VolumeContent>>, RepositoryError> {
        let volumes = self.volumes.lock().unwrap();
        Ok(volumes
            .get(&Self::key(novel_id, volume_id))
            .cloned()
            .map(|v| Box::new(v) as Box<dyn VolumeContent>))
    }

    async fn save_translation(
        &self,
        novel_id: &NovelId,
        volume_id: &VolumeId,
        translator: TranslatorId,
        chapter_id: &ChapterId,
        lines: &[String],
    ) -> Result<(), RepositoryError> {
        let mut volumes = self.volumes.lock().unwrap();
        let volume = volumes
            .get_mut(&Self::key(novel_id, volume_id))
            .ok_or_else(|| RepositoryError::NotFound(volume_id.to_string()))?;
        volume.add_translation(translator, chapter_id.clone(), lines.to_vec());
        Ok(())
    }
}

/// 直接使用目录的临时文件存储
pub struct DirTempStore {
    root: PathBuf,
}

impl DirTempStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl TempFileStorePort for DirTempStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn create_file(&self, file_type: TempFileType, name: &str) -> Result<PathBuf, TempFileError> {
        let dir = self.root.join(file_type.as_str());
        std::fs::create_dir_all(&dir).map_err(|e| TempFileError::IoError(e.to_string()))?;
        Ok(dir.join(name))
    }

    async fn collect_garbage(&self, _max_age: Duration) -> Result<TempGcResult, TempFileError> {
        Ok(TempGcResult::default())
    }
}
