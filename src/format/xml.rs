//! XML into the generic value model.
//!
//! The document element's name is dropped and its content becomes the
//! document: attributes map to `@name` keys, child elements to keys by tag
//! name (repeated tags collect into a sequence), and text next to children
//! or attributes lands under `#text`. Text-only elements are plain strings.

use super::Format;
use crate::error::{ConfigError, Result};
use crate::value::{Mapping, Value};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

#[derive(Default)]
struct Node {
    name: String,
    fields: Mapping,
    has_fields: bool,
    text: String,
}

impl Node {
    fn open(start: &BytesStart<'_>, path: &Path) -> Result<Self> {
        let mut node =
            Node { name: String::from_utf8_lossy(start.name().as_ref()).into_owned(), ..Node::default() };
        for attr in start.attributes() {
            let attr = attr.map_err(|e| ConfigError::decode(Format::Xml, path, e))?;
            let key = format!("@{}", String::from_utf8_lossy(attr.key.as_ref()));
            let value =
                attr.unescape_value().map_err(|e| ConfigError::decode(Format::Xml, path, e))?;
            node.fields.insert(key, Value::String(value.into_owned()));
            node.has_fields = true;
        }
        Ok(node)
    }

    fn add_child(&mut self, name: String, value: Value) {
        self.has_fields = true;
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

    fn finish(self) -> (String, Value) {
        let text = self.text.trim();
        if !self.has_fields {
            return (self.name, Value::String(text.to_string()));
        }
        let mut fields = self.fields;
        if !text.is_empty() {
            fields.insert("#text".to_string(), Value::String(text.to_string()));
        }
        (self.name, Value::Object(fields))
    }
}

pub(super) fn parse_xml(content: &str, path: &Path) -> Result<Mapping> {
    let decode_err = |e: &dyn std::fmt::Display| ConfigError::decode(Format::Xml, path, e);

    let mut reader = Reader::from_str(content);
    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        let event = reader.read_event().map_err(|e| decode_err(&e))?;
        match event {
            Event::Start(start) => stack.push(Node::open(&start, path)?),
            Event::Empty(start) => {
                let (name, value) = Node::open(&start, path)?.finish();
                close(&mut stack, &mut root, name, value, path)?;
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| decode_err(&"unexpected closing tag"))?;
                let (name, value) = node.finish();
                close(&mut stack, &mut root, name, value, path)?;
            }
            Event::Text(text) => {
                if let Some(node) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| decode_err(&e))?;
                    node.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctypes
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(decode_err(&format!("unclosed element <{}>", open.name)));
    }

    match root {
        Some(Value::Object(map)) => Ok(map),
        Some(other) => {
            let mut wrapped = Mapping::new();
            wrapped.insert("root".to_string(), other);
            Ok(wrapped)
        }
        None => Err(decode_err(&"document has no root element")),
    }
}

fn close(
    stack: &mut [Node],
    root: &mut Option<Value>,
    name: String,
    value: Value,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.add_child(name, value);
        return Ok(());
    }
    if root.is_some() {
        return Err(ConfigError::decode(
            Format::Xml,
            path,
            format!("multiple root elements, second is <{name}>"),
        ));
    }
    *root = Some(value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(content: &str) -> Result<Value> {
        parse_xml(content, Path::new("app.xml")).map(Value::Object)
    }

    #[test]
    fn nested_elements_become_mappings() {
        let value = parse(
            r#"<?xml version="1.0"?>
<config>
  <app_name>demo</app_name>
  <http>
    <port>8080</port>
    <address>0.0.0.0</address>
  </http>
</config>"#,
        )
        .expect("xml");
        assert_eq!(
            value,
            json!({"app_name": "demo", "http": {"port": "8080", "address": "0.0.0.0"}})
        );
    }

    #[test]
    fn repeated_elements_collect_into_sequence() {
        let value =
            parse("<config><host>a</host><host>b</host><host>c</host></config>").expect("xml");
        assert_eq!(value, json!({"host": ["a", "b", "c"]}));
    }

    #[test]
    fn attributes_and_mixed_text() {
        let value = parse(r#"<config><db driver="pg" pool="4">primary</db><flag/></config>"#)
            .expect("xml");
        assert_eq!(
            value,
            json!({"db": {"@driver": "pg", "@pool": "4", "#text": "primary"}, "flag": ""})
        );
    }

    #[test]
    fn entities_and_cdata_are_decoded() {
        let value = parse("<config><q>a &amp; b</q><raw><![CDATA[<x>]]></raw></config>")
            .expect("xml");
        assert_eq!(value["q"], "a & b");
        assert_eq!(value["raw"], "<x>");
    }

    #[test]
    fn text_only_root_is_wrapped() {
        let value = parse("<greeting>hello</greeting>").expect("xml");
        assert_eq!(value, json!({"root": "hello"}));
    }

    #[test]
    fn malformed_documents_fail() {
        assert!(parse("<config><a>1</b></config>").is_err());
        assert!(parse("<config><a>1</a>").is_err());
        assert!(parse("").is_err());
        assert!(parse("<a/><b/>").is_err());
    }
}
