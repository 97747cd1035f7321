//! Command Handlers

mod temp_handlers;
mod translation_file_handlers;
mod volume_handlers;

pub use temp_handlers::CollectTempFilesHandler;
pub use translation_file_handlers::{MakeTranslationFileHandler, MakeTranslationFileResponse};
pub use volume_handlers::{
    CreateVolumeHandler, CreateVolumeResponse, DeleteVolumeHandler, SaveTranslationHandler,
};
