//! XHTML 章节文档
//!
//! 把章节解析为事件序列，其中非空白的顶层 `<p>` 段落单独保存，便于在段落前后
//! 插入新段落。没有被修改的部分按原事件写回。

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::text::{is_blank, local_name, paragraph_text, strip_bom};
use super::ArchiveError;
use crate::domain::bilingual::ParagraphList;

enum Node {
    Event(Event<'static>),
    Paragraph(usize),
}

struct Paragraph {
    start: BytesStart<'static>,
    body: Vec<Event<'static>>,
    end: BytesEnd<'static>,
    before: Vec<String>,
    after: Vec<String>,
    removed: bool,
    attributes: Vec<(String, String)>,
}

impl Paragraph {
    fn new(start: BytesStart<'static>, body: Vec<Event<'static>>, end: BytesEnd<'static>) -> Self {
        Self {
            start,
            body,
            end,
            before: Vec::new(),
            after: Vec::new(),
            removed: false,
            attributes: Vec::new(),
        }
    }

    /// 应用属性修改后的开始标签，已有属性原位替换，新属性追加在末尾
    fn start_tag(&self) -> BytesStart<'_> {
        if self.attributes.is_empty() {
            return self.start.borrow();
        }

        let name = String::from_utf8_lossy(self.start.name().as_ref()).into_owned();
        let mut start = BytesStart::new(name);
        let mut applied = vec![false; self.attributes.len()];

        for attr in self.start.attributes().flatten() {
            let key = attr.key.as_ref();
            match self
                .attributes
                .iter()
                .position(|(name, _)| name.as_bytes() == key)
            {
                Some(i) => {
                    let (name, value) = &self.attributes[i];
                    start.push_attribute((name.as_str(), value.as_str()));
                    applied[i] = true;
                }
                None => start.push_attribute(attr),
            }
        }
        for (i, (name, value)) in self.attributes.iter().enumerate() {
            if !applied[i] {
                start.push_attribute((name.as_str(), value.as_str()));
            }
        }
        start
    }

    fn write_to(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), ArchiveError> {
        for text in &self.before {
            write_new_paragraph(writer, text)?;
        }
        if !self.removed {
            writer.write_event(Event::Start(self.start_tag()))?;
            for event in &self.body {
                writer.write_event(event.borrow())?;
            }
            writer.write_event(Event::End(self.end.borrow()))?;
        }
        for text in &self.after {
            write_new_paragraph(writer, text)?;
        }
        Ok(())
    }
}

fn write_new_paragraph(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<(), ArchiveError> {
    writer.write_event(Event::Start(BytesStart::new("p")))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new("p")))?;
    Ok(())
}

/// 可修改段落的 XHTML 文档
pub struct XhtmlDocument {
    nodes: Vec<Node>,
    paragraphs: Vec<Paragraph>,
}

impl XhtmlDocument {
    pub fn parse(bytes: &[u8]) -> Result<Self, ArchiveError> {
        let content = std::str::from_utf8(strip_bom(bytes))
            .map_err(|e| ArchiveError::Malformed(format!("章节不是 UTF-8 编码: {}", e)))?;

        let mut reader = Reader::from_str(content);
        let mut nodes = Vec::new();
        let mut paragraphs = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(start) if local_name(start.name().as_ref()) == b"p" => {
                    let start = start.into_owned();
                    let (body, end) = read_element_body(&mut reader)?;
                    if is_blank(&paragraph_text(&body)) {
                        nodes.push(Node::Event(Event::Start(start)));
                        nodes.extend(body.into_iter().map(Node::Event));
                        nodes.push(Node::Event(Event::End(end)));
                    } else {
                        nodes.push(Node::Paragraph(paragraphs.len()));
                        paragraphs.push(Paragraph::new(start, body, end));
                    }
                }
                Event::Eof => break,
                event => nodes.push(Node::Event(event.into_owned())),
            }
        }

        Ok(Self { nodes, paragraphs })
    }

    /// 各段落的纯文本，与合并时的段落一一对应
    pub fn paragraph_lines(&self) -> Vec<String> {
        self.paragraphs
            .iter()
            .map(|p| paragraph_text(&p.body))
            .collect()
    }

    /// 紧凑序列化，不额外添加缩进与换行
    pub fn to_bytes(&self) -> Result<Vec<u8>, ArchiveError> {
        let mut writer = Writer::new(Vec::new());
        for node in &self.nodes {
            match node {
                Node::Event(event) => writer.write_event(event.borrow())?,
                Node::Paragraph(index) => self.paragraphs[*index].write_to(&mut writer)?,
            }
        }
        Ok(writer.into_inner())
    }
}

impl ParagraphList for XhtmlDocument {
    fn len(&self) -> usize {
        self.paragraphs.len()
    }

    fn insert_before(&mut self, index: usize, text: &str) {
        if let Some(p) = self.paragraphs.get_mut(index) {
            p.before.push(text.to_string());
        }
    }

    fn insert_after(&mut self, index: usize, text: &str) {
        if let Some(p) = self.paragraphs.get_mut(index) {
            p.after.insert(0, text.to_string());
        }
    }

    fn remove(&mut self, index: usize) {
        if let Some(p) = self.paragraphs.get_mut(index) {
            p.removed = true;
        }
    }

    fn set_attribute(&mut self, index: usize, name: &str, value: &str) {
        if let Some(p) = self.paragraphs.get_mut(index) {
            match p.attributes.iter_mut().find(|(n, _)| n == name) {
                Some(attr) => attr.1 = value.to_string(),
                None => p.attributes.push((name.to_string(), value.to_string())),
            }
        }
    }
}

/// 读取元素内容直到与之匹配的结束标签
fn read_element_body(
    reader: &mut Reader<&[u8]>,
) -> Result<(Vec<Event<'static>>, BytesEnd<'static>), ArchiveError> {
    let mut depth = 0usize;
    let mut body = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                body.push(Event::Start(e.into_owned()));
            }
            Event::End(e) => {
                if depth == 0 {
                    return Ok((body, e.into_owned()));
                }
                depth -= 1;
                body.push(Event::End(e.into_owned()));
            }
            Event::Eof => return Err(ArchiveError::Malformed("段落标签未闭合".to_string())),
            event => body.push(event.into_owned()),
        }
    }
}

/// 章节的段落文本（解包时使用）
pub fn extract_paragraph_lines(bytes: &[u8]) -> Result<Vec<String>, ArchiveError> {
    Ok(XhtmlDocument::parse(bytes)?.paragraph_lines())
}
