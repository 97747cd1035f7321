use thiserror::Error;

/// EPUB 容器与标记处理错误
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP 错误: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML 解析错误: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("文档格式错误: {0}")]
    Malformed(String),

    #[error("缺少必需元素: {0}")]
    MissingElement(&'static str),
}
