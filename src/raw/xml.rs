//! XML adapter producing raw fragments.
//!
//! Converts a protocol XML document into the fragment convention described in
//! [`crate::raw`]. The transport normally hands over fragments directly; this
//! adapter exists for transports that deliver XML text and for fixtures.

use super::{ATTRIBUTE_PREFIX, TEXT_KEY};
use crate::error::{ConsoleError, ParseErrorKind, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

/// Element under construction.
struct Frame {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = decode_name(start.name().local_name().as_ref())?;
        let mut fields = Map::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| invalid_xml(e.to_string()))?;
            if attribute.key.as_namespace_binding().is_some() {
                continue;
            }
            let key = decode_name(attribute.key.local_name().as_ref())?;
            let value = attribute
                .unescape_value()
                .map_err(|e| invalid_xml(e.to_string()))?;
            fields.insert(
                format!("{ATTRIBUTE_PREFIX}{key}"),
                Value::String(value.into_owned()),
            );
        }
        Ok(Self {
            name,
            fields,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let value = match (self.fields.is_empty(), self.text.is_empty()) {
            (true, _) => Value::String(self.text),
            (false, true) => Value::Object(self.fields),
            (false, false) => {
                let mut fields = self.fields;
                fields.insert(TEXT_KEY.to_string(), Value::String(self.text));
                Value::Object(fields)
            }
        };
        (self.name, value)
    }

    /// Attach a closed child element, turning repeated names into arrays.
    fn attach(&mut self, name: String, value: Value) {
        match self.fields.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.fields.insert(name, value);
            }
        }
    }
}

/// Convert an XML document into a raw fragment keyed by its root element.
///
/// Namespace prefixes are dropped from element and attribute names
/// (`<vuln:cvss>` becomes `cvss`) and namespace declarations are skipped.
///
/// ```
/// use gmp_console::raw::xml::from_xml_str;
///
/// let raw = from_xml_str(r#"<get_tasks_response status="200"><task id="t1"/></get_tasks_response>"#).unwrap();
/// assert_eq!(raw["get_tasks_response"]["_status"], "200");
/// assert_eq!(raw["get_tasks_response"]["task"]["_id"], "t1");
/// ```
pub fn from_xml_str(content: &str) -> Result<Value> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut root = Frame {
        name: String::new(),
        fields: Map::new(),
        text: String::new(),
    };
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                let (name, value) = Frame::open(&start)?.close();
                stack.last_mut().unwrap_or(&mut root).attach(name, value);
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| invalid_xml("unbalanced closing tag"))?;
                let (name, value) = frame.close();
                stack.last_mut().unwrap_or(&mut root).attach(name, value);
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| invalid_xml(e.to_string()))?;
                    frame.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(invalid_xml("unexpected end of document"));
    }
    if root.fields.is_empty() {
        return Err(invalid_xml("document has no root element"));
    }
    Ok(Value::Object(root.fields))
}

fn decode_name(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| invalid_xml(format!("element name is not UTF-8: {e}")))
}

fn invalid_xml(message: impl Into<String>) -> ConsoleError {
    ConsoleError::parse("XML conversion", ParseErrorKind::InvalidXml(message.into()))
}
