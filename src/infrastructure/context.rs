//! Application Context
//!
//! 持有所有端口实现与 Command/Query Handlers，由配置组装

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CollectTempFilesHandler, CreateVolumeHandler, DeleteVolumeHandler, MakeTranslationFileHandler,
    SaveTranslationHandler,
    // Query handlers
    GetChapterHandler, ListVolumesHandler,
    // Ports
    TempFileStorePort, VolumeRepositoryPort,
};
use crate::config::AppConfig;
use crate::infrastructure::adapters::DiskTempFileStore;
use crate::infrastructure::persistence::DiskVolumeRepository;

/// 应用上下文
///
/// 临时目录等路径都来自这里的端口实现，不存在进程级全局状态
pub struct AppContext {
    // ========== Ports ==========
    pub volume_repo: Arc<dyn VolumeRepositoryPort>,
    pub temp_store: Arc<dyn TempFileStorePort>,

    // ========== Command Handlers ==========
    pub create_volume_handler: CreateVolumeHandler,
    pub delete_volume_handler: DeleteVolumeHandler,
    pub save_translation_handler: SaveTranslationHandler,
    pub make_translation_file_handler: MakeTranslationFileHandler,
    pub collect_temp_files_handler: CollectTempFilesHandler,

    // ========== Query Handlers ==========
    pub list_volumes_handler: ListVolumesHandler,
    pub get_chapter_handler: GetChapterHandler,
}

impl AppContext {
    /// 创建应用上下文
    pub fn new(
        volume_repo: Arc<dyn VolumeRepositoryPort>,
        temp_store: Arc<dyn TempFileStorePort>,
    ) -> Self {
        Self {
            // Ports
            volume_repo: volume_repo.clone(),
            temp_store: temp_store.clone(),

            // Command handlers
            create_volume_handler: CreateVolumeHandler::new(volume_repo.clone()),
            delete_volume_handler: DeleteVolumeHandler::new(volume_repo.clone()),
            save_translation_handler: SaveTranslationHandler::new(volume_repo.clone()),
            make_translation_file_handler: MakeTranslationFileHandler::new(
                volume_repo.clone(),
                temp_store.clone(),
            ),
            collect_temp_files_handler: CollectTempFilesHandler::new(temp_store.clone()),

            // Query handlers
            list_volumes_handler: ListVolumesHandler::new(volume_repo.clone()),
            get_chapter_handler: GetChapterHandler::new(volume_repo.clone()),
        }
    }

    /// 按配置创建基于文件系统的上下文
    pub fn from_config(config: &AppConfig) -> Self {
        let volume_repo: Arc<dyn VolumeRepositoryPort> = Arc::new(DiskVolumeRepository::new(
            &config.storage.volumes_dir,
            config.storage.txt_chunk_lines,
        ));
        let temp_store: Arc<dyn TempFileStorePort> =
            Arc::new(DiskTempFileStore::new(&config.storage.temp_dir));

        tracing::info!(
            volumes_dir = ?config.storage.volumes_dir,
            temp_dir = ?config.storage.temp_dir,
            "Application context initialized"
        );

        Self::new(volume_repo, temp_store)
    }
}
