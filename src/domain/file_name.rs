//! 翻译文件名
//!
//! 文件名由请求参数决定，相同请求得到相同文件名，便于客户端缓存。

use crate::domain::translation::{NovelFileMode, NovelFileTranslationsMode, TranslatorId};
use crate::domain::volume::{NovelId, VolumeId};

/// 生成翻译文件名
///
/// 格式: `{novelId}.{mode}.{B|Y}{译者首字母}.{md5(volumeId)}.{扩展名}`
pub fn translation_file_name(
    novel_id: &NovelId,
    volume_id: &VolumeId,
    mode: NovelFileMode,
    translations_mode: NovelFileTranslationsMode,
    translations: &[TranslatorId],
) -> String {
    let mut name = String::new();
    name.push_str(novel_id.as_str());
    name.push('.');
    name.push_str(mode.as_str());
    name.push('.');
    name.push(translations_mode.tag());
    for translator in translations {
        name.push(translator.initial());
    }
    name.push('.');
    name.push_str(&format!("{:x}", md5::compute(volume_id.as_str().as_bytes())));
    name.push('.');
    name.push_str(volume_id.extension());
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (NovelId, VolumeId) {
        (NovelId::new("n123").unwrap(), VolumeId::new("vol1.epub").unwrap())
    }

    #[test]
    fn test_file_name_layout() {
        let (novel, volume) = ids();
        let name = translation_file_name(
            &novel,
            &volume,
            NovelFileMode::ZhJp,
            NovelFileTranslationsMode::Parallel,
            &[TranslatorId::Sakura, TranslatorId::Gpt],
        );
        let digest = format!("{:x}", md5::compute(b"vol1.epub"));
        assert_eq!(name, format!("n123.zh-jp.Bsg.{}.epub", digest));
    }

    #[test]
    fn test_file_name_defaults_to_txt() {
        let novel = NovelId::new("n").unwrap();
        let volume = VolumeId::new("noext").unwrap();
        let name = translation_file_name(
            &novel,
            &volume,
            NovelFileMode::Zh,
            NovelFileTranslationsMode::Priority,
            &[TranslatorId::Baidu],
        );
        assert!(name.starts_with("n.zh.Yb."));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn test_file_name_stable_and_distinct() {
        let (novel, volume) = ids();
        let base = |mode, tmode, ts: &[TranslatorId]| {
            translation_file_name(&novel, &volume, mode, tmode, ts)
        };

        let a = base(NovelFileMode::Zh, NovelFileTranslationsMode::Parallel, &[TranslatorId::Gpt]);
        let b = base(NovelFileMode::Zh, NovelFileTranslationsMode::Parallel, &[TranslatorId::Gpt]);
        assert_eq!(a, b);

        let variants = [
            base(NovelFileMode::JpZh, NovelFileTranslationsMode::Parallel, &[TranslatorId::Gpt]),
            base(NovelFileMode::Zh, NovelFileTranslationsMode::Priority, &[TranslatorId::Gpt]),
            base(NovelFileMode::Zh, NovelFileTranslationsMode::Parallel, &[TranslatorId::Sakura]),
            base(
                NovelFileMode::Zh,
                NovelFileTranslationsMode::Parallel,
                &[TranslatorId::Gpt, TranslatorId::Youdao],
            ),
        ];
        for variant in &variants {
            assert_ne!(&a, variant);
        }
    }
}
