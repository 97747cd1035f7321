//! 端到端流程：导入分卷、保存译文、生成下载文件、清理临时文件

use std::io::{Cursor, Read, Write};
use std::sync::Arc;
use std::time::Duration;

use tempfile::tempdir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use wenku::application::{
    ApplicationError, CollectTempFiles, CreateVolume, DeleteVolume, GetChapter, ListVolumes,
    MakeTranslationFile, SaveTranslation, TempFileStorePort, VolumeRepositoryPort,
};
use wenku::domain::translation::{
    AssemblyError, NovelFileMode, NovelFileTranslationsMode, TranslatorId,
};
use wenku::domain::volume::{ChapterId, NovelId, VolumeId};
use wenku::infrastructure::{AppContext, DiskTempFileStore, DiskVolumeRepository};

const CHAPTER: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<html xmlns="http://www.w3.org/1999/xhtml"><head><title>1</title></head>
<body><p>吾輩は猫である。</p><p class="blank"> </p><p>名前はまだ無い。</p></body></html>"#;

const PACKAGE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0">
<metadata xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>猫</dc:title><dc:language>ja</dc:language></metadata>
<manifest><item id="c1" href="ch1.xhtml" media-type="application/xhtml+xml"/></manifest>
<spine page-progression-direction="rtl"><itemref idref="c1"/></spine>
</package>"#;

fn epub_bytes() -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("mimetype", stored).unwrap();
    zip.write_all(b"application/epub+zip").unwrap();
    for (name, content) in [
        ("OEBPS/content.opf", PACKAGE),
        ("OEBPS/ch1.xhtml", CHAPTER),
        ("OEBPS/style.css", "p { writing-mode: vertical-rl; }"),
    ] {
        zip.start_file(name, deflated).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn read_entry(path: &std::path::Path, name: &str) -> String {
    let mut archive = ZipArchive::new(std::fs::File::open(path).unwrap()).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

struct Fixture {
    _volumes: tempfile::TempDir,
    _temp: tempfile::TempDir,
    ctx: AppContext,
}

fn fixture(chunk_lines: usize) -> Fixture {
    let volumes = tempdir().unwrap();
    let temp = tempdir().unwrap();
    let volume_repo: Arc<dyn VolumeRepositoryPort> =
        Arc::new(DiskVolumeRepository::new(volumes.path(), chunk_lines));
    let temp_store: Arc<dyn TempFileStorePort> = Arc::new(DiskTempFileStore::new(temp.path()));
    Fixture {
        _volumes: volumes,
        _temp: temp,
        ctx: AppContext::new(volume_repo, temp_store),
    }
}

#[tokio::test]
async fn test_text_volume_round_trip() {
    let f = fixture(2);
    let novel = NovelId::new("n1").unwrap();
    let volume = VolumeId::new("v1.txt").unwrap();

    let created = f
        .ctx
        .create_volume_handler
        .handle(CreateVolume {
            novel_id: novel.clone(),
            volume_id: volume.clone(),
            data: "一\n二\n三\n".as_bytes().to_vec(),
            unpack: true,
        })
        .await
        .unwrap();
    assert_eq!(created.chapters, 2);

    f.ctx
        .save_translation_handler
        .handle(SaveTranslation {
            novel_id: novel.clone(),
            volume_id: volume.clone(),
            translator: TranslatorId::Sakura,
            chapter_id: ChapterId::for_text_chunk(0),
            lines: lines(&["1", "2"]),
        })
        .await
        .unwrap();

    let response = f
        .ctx
        .make_translation_file_handler
        .handle(MakeTranslationFile {
            novel_id: novel.clone(),
            volume_id: volume.clone(),
            mode: NovelFileMode::ZhJp,
            translations_mode: NovelFileTranslationsMode::Priority,
            translations: vec![TranslatorId::Gpt, TranslatorId::Sakura],
        })
        .await
        .unwrap()
        .unwrap();

    let text = std::fs::read_to_string(&response.path).unwrap();
    assert_eq!(text, "1\n一\n2\n二\n// 该分段翻译缺失。\n");
    assert!(response.file_name.starts_with("n1.zh-jp.Ygs."));
    assert!(response.file_name.ends_with(".txt"));

    let summaries = f
        .ctx
        .list_volumes_handler
        .handle(ListVolumes {
            novel_id: novel.clone(),
        })
        .await
        .unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total, 2);
    assert_eq!(summaries[0].sakura, 1);

    let gc = f
        .ctx
        .collect_temp_files_handler
        .handle(CollectTempFiles {
            max_age: Duration::ZERO,
        })
        .await
        .unwrap();
    assert_eq!(gc.deleted_files, 1);
    assert!(!response.path.exists());

    f.ctx
        .delete_volume_handler
        .handle(DeleteVolume {
            novel_id: novel.clone(),
            volume_id: volume.clone(),
        })
        .await
        .unwrap();
    let summaries = f
        .ctx
        .list_volumes_handler
        .handle(ListVolumes { novel_id: novel })
        .await
        .unwrap();
    assert!(summaries.is_empty());
}

#[tokio::test]
async fn test_epub_volume_round_trip() {
    let f = fixture(1000);
    let novel = NovelId::new("n2").unwrap();
    let volume = VolumeId::new("v1.epub").unwrap();

    let created = f
        .ctx
        .create_volume_handler
        .handle(CreateVolume {
            novel_id: novel.clone(),
            volume_id: volume.clone(),
            data: epub_bytes(),
            unpack: true,
        })
        .await
        .unwrap();
    assert_eq!(created.chapters, 1);

    let chapter_id = ChapterId::from_entry_name("OEBPS/ch1.xhtml");
    let chapter = f
        .ctx
        .get_chapter_handler
        .handle(GetChapter {
            novel_id: novel.clone(),
            volume_id: volume.clone(),
            chapter_id: chapter_id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(chapter.lines, lines(&["吾輩は猫である。", "名前はまだ無い。"]));
    assert!(chapter.translations.is_empty());

    f.ctx
        .save_translation_handler
        .handle(SaveTranslation {
            novel_id: novel.clone(),
            volume_id: volume.clone(),
            translator: TranslatorId::Gpt,
            chapter_id: chapter_id.clone(),
            lines: lines(&["我是猫。", "名字还没有。"]),
        })
        .await
        .unwrap();

    let response = f
        .ctx
        .make_translation_file_handler
        .handle(MakeTranslationFile {
            novel_id: novel.clone(),
            volume_id: volume.clone(),
            mode: NovelFileMode::JpZh,
            translations_mode: NovelFileTranslationsMode::Parallel,
            translations: vec![TranslatorId::Gpt],
        })
        .await
        .unwrap()
        .unwrap();
    assert!(response.file_name.ends_with(".epub"));

    let chapter = read_entry(&response.path, "OEBPS/ch1.xhtml");
    assert!(chapter.contains("我是猫。"));
    assert!(chapter.contains("名字还没有。"));
    assert!(chapter.contains("opacity:0.4;"));
    assert!(chapter.find("吾輩は猫である。").unwrap() < chapter.find("我是猫。").unwrap());

    let package = read_entry(&response.path, "OEBPS/content.opf");
    assert!(package.contains("zh-CN"));
    assert!(package.contains("horizontal-lr"));
    assert!(!package.contains("page-progression-direction"));

    assert!(read_entry(&response.path, "OEBPS/style.css").is_empty());
    assert_eq!(read_entry(&response.path, "mimetype"), "application/epub+zip");
}

#[tokio::test]
async fn test_line_count_mismatch_leaves_no_file() {
    let f = fixture(1000);
    let novel = NovelId::new("n3").unwrap();
    let volume = VolumeId::new("v1.epub").unwrap();
    f.ctx
        .create_volume_handler
        .handle(CreateVolume {
            novel_id: novel.clone(),
            volume_id: volume.clone(),
            data: epub_bytes(),
            unpack: true,
        })
        .await
        .unwrap();

    // 绕过仓储的行数校验，直接写入行数不符的译文
    let translation_dir = f
        ._volumes
        .path()
        .join("n3")
        .join("v1.epub.baidu");
    std::fs::create_dir_all(&translation_dir).unwrap();
    std::fs::write(
        translation_dir.join("OEBPS.ch1.xhtml"),
        serde_json::to_vec(&lines(&["只有一行"])).unwrap(),
    )
    .unwrap();

    let result = f
        .ctx
        .make_translation_file_handler
        .handle(MakeTranslationFile {
            novel_id: novel.clone(),
            volume_id: volume.clone(),
            mode: NovelFileMode::Zh,
            translations_mode: NovelFileTranslationsMode::Parallel,
            translations: vec![TranslatorId::Baidu],
        })
        .await;

    match result {
        Err(ApplicationError::AssemblyError(e @ AssemblyError::LineCountMismatch { .. })) => {
            assert_eq!(e.line_delta(), Some(-1));
        }
        other => panic!("unexpected result: {:?}", other.map(|r| r.map(|r| r.file_name))),
    }

    let wenku_dir = f._temp.path().join("wenku");
    let leftovers = std::fs::read_dir(&wenku_dir)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn test_missing_volume_yields_none() {
    let f = fixture(1000);
    let response = f
        .ctx
        .make_translation_file_handler
        .handle(MakeTranslationFile {
            novel_id: NovelId::new("n4").unwrap(),
            volume_id: VolumeId::new("absent.epub").unwrap(),
            mode: NovelFileMode::Zh,
            translations_mode: NovelFileTranslationsMode::Priority,
            translations: vec![TranslatorId::Youdao],
        })
        .await
        .unwrap();
    assert!(response.is_none());
}
