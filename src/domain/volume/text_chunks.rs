//! TXT 分卷切分
//!
//! TXT 没有天然的章节结构，按固定行数切块，每块作为一个章节。

use super::ChapterId;

/// 默认每个章节的行数
pub const DEFAULT_CHUNK_LINES: usize = 1000;

/// 将 TXT 文本切分为章节
///
/// - 按 `\n` 分行，去掉行尾的 `\r`
/// - 保留空行，保证翻译行号与原文一一对应
/// - 章节标识为补零序号，字典序即阅读顺序
pub fn split_text_volume(text: &str, chunk_lines: usize) -> Vec<(ChapterId, Vec<String>)> {
    let chunk_lines = chunk_lines.max(1);
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines: Vec<String> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect();

    // 末尾换行不产生额外空行
    if text.ends_with('\n') {
        lines.pop();
    }

    lines
        .chunks(chunk_lines)
        .enumerate()
        .map(|(index, chunk)| (ChapterId::for_text_chunk(index), chunk.to_vec()))
        .collect()
}
