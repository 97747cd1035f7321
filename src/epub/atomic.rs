use std::fs::File;
use std::path::Path;

use tempfile::Builder;

use super::ArchiveError;

/// 写入中的临时文件后缀，列目录时应跳过
pub const PARTIAL_SUFFIX: &str = ".part";

/// 判断目录项是否为未完成的原子写入临时文件
pub fn is_partial_file(name: &str) -> bool {
    name.starts_with(".wenku-") && name.ends_with(PARTIAL_SUFFIX)
}

/// 原子写入文件
///
/// 内容先写入目标目录下的临时文件，全部成功后再 rename 到目标路径。
/// 写入过程中出错时临时文件随之删除，目标路径保持原状。
pub fn write_atomic<E, F>(dst: &Path, write: F) -> Result<(), E>
where
    E: From<ArchiveError>,
    F: FnOnce(&mut File) -> Result<(), E>,
{
    let parent = match dst.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = Builder::new()
        .prefix(".wenku-")
        .suffix(PARTIAL_SUFFIX)
        .tempfile_in(parent)
        .map_err(ArchiveError::from)?;
    write(tmp.as_file_mut())?;
    tmp.as_file().sync_all().map_err(ArchiveError::from)?;
    tmp.persist(dst)
        .map_err(|e| ArchiveError::from(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_write_atomic_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("out.txt");
        std::fs::write(&dst, b"old").unwrap();

        write_atomic::<ArchiveError, _>(&dst, |file| {
            file.write_all(b"new")?;
            Ok(())
        })
        .unwrap();

        assert_eq!(std::fs::read(&dst).unwrap(), b"new");
    }

    #[test]
    fn test_failed_write_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("out.txt");

        let result = write_atomic::<ArchiveError, _>(&dst, |file| {
            file.write_all(b"partial")?;
            Err(ArchiveError::Malformed("boom".to_string()))
        });

        assert!(result.is_err());
        assert!(!dst.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_partial_file_names() {
        assert!(is_partial_file(".wenku-a1B2c3.part"));
        assert!(!is_partial_file(".OEBPS.ch1.xhtml"));
        assert!(!is_partial_file("00001"));
    }
}
