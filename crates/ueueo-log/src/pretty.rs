//! Pretty-printing for structured payloads (JSON, XML, serializable objects).
//!
//! Malformed input never fails: it degrades to a fixed sentinel string that
//! is then logged like any other message.

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use thiserror::Error;

pub const INVALID_JSON: &str = "Invalid json content";
pub const EMPTY_JSON: &str = "Empty/Null json content";
pub const INVALID_XML: &str = "Invalid xml content";
pub const EMPTY_XML: &str = "Empty/Null xml content";
pub const INVALID_OBJECT: &str = "Invalid object content";
pub const NULL_OBJECT: &str = "Null object content";

const JSON_INDENT: &[u8] = b"    ";
const XML_INDENT: usize = 2;

/// Formats structured payloads into loggable text.
///
/// The printer only calls these when DEBUG records can be emitted; swap the
/// implementation to change how payloads look.
pub trait PayloadFormatter: Send + Sync {
    fn json(&self, json: &str) -> String {
        pretty_json(json)
    }

    fn xml(&self, xml: &str) -> String {
        pretty_xml(xml)
    }

    /// `value` is the result of serializing the caller's object.
    fn object(&self, value: serde_json::Result<Value>) -> String {
        pretty_object(value)
    }
}

/// The built-in formatter.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardFormatter;

impl PayloadFormatter for StandardFormatter {}

/// Pretty-print a JSON document with a 4-space indent.
///
/// Only objects and arrays are accepted.
pub fn pretty_json(json: &str) -> String {
    if json.is_empty() {
        return EMPTY_JSON.to_string();
    }
    let json = json.trim();
    if !json.starts_with('{') && !json.starts_with('[') {
        return INVALID_JSON.to_string();
    }
    match serde_json::from_str::<Value>(json) {
        Ok(value) => to_indented_json(&value).unwrap_or_else(|_| INVALID_JSON.to_string()),
        Err(_) => INVALID_JSON.to_string(),
    }
}

/// Pretty-print a serialized object.
///
/// Arrays and objects (maps, structs) are rendered; `null` means there was
/// nothing to print; a bare scalar is not an object.
pub fn pretty_object(value: serde_json::Result<Value>) -> String {
    match value {
        Ok(Value::Null) => NULL_OBJECT.to_string(),
        Ok(value @ (Value::Array(_) | Value::Object(_))) => {
            to_indented_json(&value).unwrap_or_else(|_| INVALID_OBJECT.to_string())
        }
        Ok(_) | Err(_) => INVALID_OBJECT.to_string(),
    }
}

fn to_indented_json(value: &Value) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[derive(Debug, Error)]
enum MalformedXml {
    #[error(transparent)]
    Parse(#[from] quick_xml::Error),

    #[error("{0}")]
    Structure(&'static str),
}

/// Re-indent an XML document with 2 spaces, with a line break forced after
/// the first tag.
pub fn pretty_xml(xml: &str) -> String {
    if xml.is_empty() {
        return EMPTY_XML.to_string();
    }
    match reindent_xml(xml) {
        Ok(formatted) => break_after_first_tag(formatted),
        Err(e) => {
            tracing::trace!("Rejected xml payload: {}", e);
            INVALID_XML.to_string()
        }
    }
}

fn reindent_xml(xml: &str) -> Result<String, MalformedXml> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', XML_INDENT);

    let mut depth = 0usize;
    let mut roots = 0usize;
    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Start(_) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(MalformedXml::Structure("closing tag without opening tag"))?;
            }
            Event::Empty(_) if depth == 0 => roots += 1,
            Event::Text(_) | Event::CData(_) if depth == 0 => {
                return Err(MalformedXml::Structure("content outside the root element"));
            }
            Event::Eof => break,
            _ => {}
        }
        writer.write_event(event)?;
    }

    if depth != 0 {
        return Err(MalformedXml::Structure("unclosed element"));
    }
    if roots != 1 {
        return Err(MalformedXml::Structure("expected exactly one root element"));
    }
    String::from_utf8(writer.into_inner()).map_err(|_| MalformedXml::Structure("not utf-8"))
}

fn break_after_first_tag(mut xml: String) -> String {
    if let Some(pos) = xml.find('>') {
        let rest = &xml[pos + 1..];
        if !rest.is_empty() && !rest.starts_with('\n') {
            xml.insert(pos + 1, '\n');
        }
    }
    xml
}
