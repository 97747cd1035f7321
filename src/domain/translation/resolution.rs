//! 翻译选取策略

use super::{NovelFileTranslationsMode, TranslatorId};

/// 按策略选取某章节的译文
///
/// - Parallel: 按给定顺序收集所有存在的译文
/// - Priority: 只取第一份存在的译文，之后的来源不再读取
///
/// `fetch` 返回 `None` 表示该来源没有翻译此章节。
pub fn resolve_translations<F, E>(
    mode: NovelFileTranslationsMode,
    translators: &[TranslatorId],
    mut fetch: F,
) -> Result<Vec<Vec<String>>, E>
where
    F: FnMut(TranslatorId) -> Result<Option<Vec<String>>, E>,
{
    match mode {
        NovelFileTranslationsMode::Parallel => {
            let mut found = Vec::new();
            for translator in translators {
                if let Some(lines) = fetch(*translator)? {
                    found.push(lines);
                }
            }
            Ok(found)
        }
        NovelFileTranslationsMode::Priority => {
            for translator in translators {
                if let Some(lines) = fetch(*translator)? {
                    return Ok(vec![lines]);
                }
            }
            Ok(Vec::new())
        }
    }
}
