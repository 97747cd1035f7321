//! Query Handlers

mod volume_handlers;

pub use volume_handlers::{ChapterResponse, GetChapterHandler, ListVolumesHandler};
