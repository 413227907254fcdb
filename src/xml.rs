//! XML reader producing the core [`Element`] tree.
//!
//! Uses quick-xml's pull parser. Tags are stored by local name (namespace
//! prefixes dropped), text is unescaped, CDATA is kept as text, and
//! comments / processing instructions are discarded. Whitespace-only text
//! nodes are kept; the hierarchy builder decides what is blank.

use lawcode_core::element::Element;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Maximum nesting depth accepted before the document is rejected.
const MAX_DEPTH: usize = 512;

#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    #[error("xml syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },
    #[error("unexpected closing tag `{0}`")]
    UnexpectedClose(String),
    #[error("unclosed element `{0}` at end of input")]
    Unclosed(String),
    #[error("document has no element")]
    Empty,
    #[error("content after the document element")]
    TrailingContent,
    #[error("nesting deeper than {MAX_DEPTH} elements")]
    TooDeep,
}

/// Parse `bytes` into the document element.
pub fn parse_document(bytes: &[u8]) -> Result<Element, XmlError> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut document: Option<Element> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| syntax(&reader, e))?;
        match event {
            Event::Start(start) => {
                if document.is_some() {
                    return Err(XmlError::TrailingContent);
                }
                if stack.len() >= MAX_DEPTH {
                    return Err(XmlError::TooDeep);
                }
                stack.push(open_element(&reader, &start)?);
            }
            Event::Empty(start) => {
                if document.is_some() {
                    return Err(XmlError::TrailingContent);
                }
                let el = open_element(&reader, &start)?;
                attach(&mut stack, &mut document, el);
            }
            Event::End(end) => {
                let el = stack.pop().ok_or_else(|| {
                    let tag = String::from_utf8_lossy(end.local_name().as_ref()).into_owned();
                    XmlError::UnexpectedClose(tag)
                })?;
                attach(&mut stack, &mut document, el);
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| syntax(&reader, e))?;
                push_text(&mut stack, &text);
            }
            Event::CData(cdata) => {
                let raw = cdata.into_inner();
                push_text(&mut stack, &String::from_utf8_lossy(&raw));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::Unclosed(open.tag));
    }
    document.ok_or(XmlError::Empty)
}

fn syntax<R>(reader: &Reader<R>, error: impl std::fmt::Display) -> XmlError {
    XmlError::Syntax {
        position: reader.buffer_position() as u64,
        message: error.to_string(),
    }
}

fn open_element<R>(reader: &Reader<R>, start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let tag = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut el = Element::new(tag);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| syntax(reader, e))?;
        let raw_key = attr.key.as_ref();
        if raw_key == b"xmlns" || raw_key.starts_with(b"xmlns:") {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| syntax(reader, e))?;
        el.attributes.push((key, value.into_owned()));
    }
    Ok(el)
}

/// Hang a finished element on its parent, or make it the document element.
fn attach(stack: &mut [Element], document: &mut Option<Element>, el: Element) {
    match stack.last_mut() {
        Some(parent) => parent.push_child(el),
        None => *document = Some(el),
    }
}

/// Text outside the document element (the prolog and epilogue) is dropped.
fn push_text(stack: &mut [Element], text: &str) {
    if let Some(parent) = stack.last_mut() {
        parent.push_text(text);
    }
}
