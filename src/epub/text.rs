//! 标记文本工具

use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::Event;

/// 去掉 UTF-8 BOM
pub fn strip_bom(data: &[u8]) -> &[u8] {
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &data[3..]
    } else {
        data
    }
}

/// 去掉命名空间前缀（`dc:language` -> `language`）
pub fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

/// 解析实体引用（数字引用与 HTML5 命名实体），不认识的实体返回 `None`
pub fn resolve_entity(entity: &str) -> Option<String> {
    let Some(number) = entity.strip_prefix('#') else {
        return resolve_html5_entity(entity).map(str::to_string);
    };
    let code = match number.strip_prefix('x').or_else(|| number.strip_prefix('X')) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => number.parse::<u32>().ok()?,
    };
    char::from_u32(code).map(String::from)
}

/// 段落纯文本
///
/// 跳过 `<rt>` 注音，`<br/>` 视为空白，连续空白折叠为一个空格并去掉首尾空白。
pub fn paragraph_text(events: &[Event<'_>]) -> String {
    let mut raw = String::new();
    let mut rt_depth = 0usize;

    for event in events {
        match event {
            Event::Start(e) => {
                if rt_depth > 0 || local_name(e.name().as_ref()) == b"rt" {
                    rt_depth += 1;
                }
            }
            Event::End(_) if rt_depth > 0 => rt_depth -= 1,
            _ if rt_depth > 0 => {}
            Event::Empty(e) if local_name(e.name().as_ref()) == b"br" => raw.push(' '),
            Event::Text(e) => raw.push_str(&String::from_utf8_lossy(e)),
            Event::CData(e) => raw.push_str(&String::from_utf8_lossy(e)),
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(e);
                if let Some(resolved) = resolve_entity(&entity) {
                    raw.push_str(&resolved);
                }
            }
            _ => {}
        }
    }

    collapse_whitespace(&raw)
}

/// 空白判断，全角空格与不换行空格也算空白
pub fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

fn is_markup_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
}

// 只折叠标记语言意义上的空白，保留全角空格
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if is_markup_whitespace(c) {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }
    out
}
