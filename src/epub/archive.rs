//! ZIP 容器重写
//!
//! 逐条读取源归档，交给回调决定是否替换内容。未替换的条目按原始压缩数据
//! 直接拷贝，保证字节级一致；条目顺序与源归档相同。

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::{write_atomic, ArchiveError};

/// 重写归档
///
/// `transform` 返回 `None` 表示原样保留该条目，返回 `Some(bytes)` 则用新内容替换
/// （允许为空）。任何错误都会中止整个重写，目标路径不会留下半成品。
pub fn rewrite_archive<E, F>(src: &Path, dst: &Path, mut transform: F) -> Result<(), E>
where
    E: From<ArchiveError>,
    F: FnMut(&str, &[u8]) -> Result<Option<Vec<u8>>, E>,
{
    let file = File::open(src).map_err(ArchiveError::from)?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(ArchiveError::from)?;

    write_atomic(dst, |out: &mut File| -> Result<(), E> {
        let mut zip = ZipWriter::new(BufWriter::new(out));

        for index in 0..archive.len() {
            let replaced = {
                let mut entry = archive.by_index(index).map_err(ArchiveError::from)?;
                if entry.is_dir() {
                    None
                } else {
                    let name = entry.name().to_string();
                    let mut bytes = Vec::new();
                    entry
                        .read_to_end(&mut bytes)
                        .map_err(ArchiveError::from)?;

                    transform(&name, &bytes)?.map(|content| {
                        let mut options = SimpleFileOptions::default()
                            .compression_method(match entry.compression() {
                                CompressionMethod::Stored => CompressionMethod::Stored,
                                _ => CompressionMethod::Deflated,
                            });
                        if let Some(modified) = entry.last_modified() {
                            options = options.last_modified_time(modified);
                        }
                        if let Some(mode) = entry.unix_mode() {
                            options = options.unix_permissions(mode);
                        }
                        (name, options, content)
                    })
                }
            };

            match replaced {
                Some((name, options, content)) => {
                    zip.start_file(name, options).map_err(ArchiveError::from)?;
                    zip.write_all(&content).map_err(ArchiveError::from)?;
                }
                None => {
                    let raw = archive.by_index_raw(index).map_err(ArchiveError::from)?;
                    zip.raw_copy_file(raw).map_err(ArchiveError::from)?;
                }
            }
        }

        let mut writer = zip.finish().map_err(ArchiveError::from)?;
        writer.flush().map_err(ArchiveError::from)?;
        Ok(())
    })
}

/// 依次读取归档中的文件条目（跳过目录）
pub fn read_entries<R, E, F>(reader: R, mut visit: F) -> Result<(), E>
where
    R: Read + Seek,
    E: From<ArchiveError>,
    F: FnMut(&str, &[u8]) -> Result<(), E>,
{
    let mut archive = ZipArchive::new(reader).map_err(ArchiveError::from)?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(ArchiveError::from)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(ArchiveError::from)?;
        visit(&name, &bytes)?;
    }
    Ok(())
}
