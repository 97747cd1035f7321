//! OPF 包文档规范化
//!
//! - 语言改为简体中文，让 iOS 阅读器使用中文字体
//! - 强制横排，并去掉 spine 上的翻页方向，防止阅读器使用竖排

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::text::{local_name, strip_bom};
use super::ArchiveError;

pub const PACKAGE_LANGUAGE: &str = "zh-CN";
pub const WRITING_MODE_NAME: &str = "primary-writing-mode";
pub const WRITING_MODE_VALUE: &str = "horizontal-lr";
const PAGE_PROGRESSION: &[u8] = b"page-progression-direction";

#[derive(Default)]
struct State {
    in_metadata: bool,
    seen_metadata: bool,
    seen_spine: bool,
    language_done: bool,
    writing_mode_done: bool,
}

/// 规范化包文档，输出带缩进的格式
pub fn normalize_package_document(bytes: &[u8]) -> Result<Vec<u8>, ArchiveError> {
    let content = std::str::from_utf8(strip_bom(bytes))
        .map_err(|e| ArchiveError::Malformed(format!("OPF 不是 UTF-8 编码: {}", e)))?;

    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let mut state = State::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"metadata" => {
                        state.in_metadata = true;
                        state.seen_metadata = true;
                        writer.write_event(Event::Start(e.borrow()))?;
                    }
                    b"spine" => {
                        state.seen_spine = true;
                        writer.write_event(Event::Start(without_page_progression(&e)))?;
                    }
                    b"language" if state.in_metadata && !state.language_done => {
                        state.language_done = true;
                        skip_element(&mut reader)?;
                        writer.write_event(Event::Start(e.borrow()))?;
                        writer.write_event(Event::Text(BytesText::new(PACKAGE_LANGUAGE)))?;
                        writer.write_event(Event::End(e.to_end()))?;
                    }
                    b"meta" if state.in_metadata
                        && !state.writing_mode_done
                        && is_writing_mode_meta(&e) =>
                    {
                        state.writing_mode_done = true;
                        skip_element(&mut reader)?;
                        write_writing_mode_meta(&mut writer)?;
                    }
                    _ => writer.write_event(Event::Start(e.borrow()))?,
                }
            }
            Event::Empty(e) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"metadata" => {
                        state.seen_metadata = true;
                        writer.write_event(Event::Start(e.borrow()))?;
                        finish_metadata(&mut writer, &mut state)?;
                        writer.write_event(Event::End(e.to_end()))?;
                    }
                    b"spine" => {
                        state.seen_spine = true;
                        writer.write_event(Event::Empty(without_page_progression(&e)))?;
                    }
                    b"language" if state.in_metadata && !state.language_done => {
                        state.language_done = true;
                        writer.write_event(Event::Start(e.borrow()))?;
                        writer.write_event(Event::Text(BytesText::new(PACKAGE_LANGUAGE)))?;
                        writer.write_event(Event::End(e.to_end()))?;
                    }
                    b"meta" if state.in_metadata
                        && !state.writing_mode_done
                        && is_writing_mode_meta(&e) =>
                    {
                        state.writing_mode_done = true;
                        write_writing_mode_meta(&mut writer)?;
                    }
                    _ => writer.write_event(Event::Empty(e.borrow()))?,
                }
            }
            Event::End(e) => {
                if state.in_metadata && local_name(e.name().as_ref()) == b"metadata" {
                    finish_metadata(&mut writer, &mut state)?;
                }
                writer.write_event(Event::End(e))?;
            }
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }

    if !state.seen_metadata {
        return Err(ArchiveError::MissingElement("metadata"));
    }
    if !state.seen_spine {
        return Err(ArchiveError::MissingElement("spine"));
    }

    Ok(writer.into_inner())
}

/// 在 metadata 结束前补上缺失的语言与书写方向
fn finish_metadata(writer: &mut Writer<Vec<u8>>, state: &mut State) -> Result<(), ArchiveError> {
    if !state.language_done {
        state.language_done = true;
        writer.write_event(Event::Start(BytesStart::new("dc:language")))?;
        writer.write_event(Event::Text(BytesText::new(PACKAGE_LANGUAGE)))?;
        writer.write_event(Event::End(BytesEnd::new("dc:language")))?;
    }
    if !state.writing_mode_done {
        state.writing_mode_done = true;
        write_writing_mode_meta(writer)?;
    }
    state.in_metadata = false;
    Ok(())
}

fn write_writing_mode_meta(writer: &mut Writer<Vec<u8>>) -> Result<(), ArchiveError> {
    let mut meta = BytesStart::new("meta");
    meta.push_attribute(("name", WRITING_MODE_NAME));
    meta.push_attribute(("content", WRITING_MODE_VALUE));
    writer.write_event(Event::Empty(meta))?;
    Ok(())
}

fn is_writing_mode_meta(e: &BytesStart<'_>) -> bool {
    e.attributes()
        .flatten()
        .any(|attr| {
            attr.key.as_ref() == b"name" && attr.value.as_ref() == WRITING_MODE_NAME.as_bytes()
        })
}

fn without_page_progression(e: &BytesStart<'_>) -> BytesStart<'static> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut start = BytesStart::new(name);
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() != PAGE_PROGRESSION {
            start.push_attribute(attr);
        }
    }
    start
}

/// 跳过当前元素剩余内容（含结束标签）
fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), ArchiveError> {
    let mut depth = 0usize;
    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                if depth == 0 {
                    return Ok(());
                }
                depth -= 1;
            }
            Event::Eof => return Err(ArchiveError::Malformed("元素未闭合".to_string())),
            _ => {}
        }
    }
}
