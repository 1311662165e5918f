use crate::core::errors::BbbError;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};

/// Body format expected from an endpoint.
///
/// The server speaks XML by default; the recording-text-track endpoints
/// answer JSON. Both decode into the same canonical nested-mapping shape
/// so the normalizer downstream never branches on format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Xml,
    Json,
}

/// Decode a response body into a nested `serde_json::Value` mapping.
///
/// Undecodable bodies surface as [`BbbError::Parse`] carrying the
/// underlying parser's message.
pub fn decode_body(format: ResponseFormat, body: &str) -> Result<Value, BbbError> {
    match format {
        ResponseFormat::Json => {
            serde_json::from_str(body).map_err(|e| BbbError::Parse(e.to_string()))
        }
        ResponseFormat::Xml => xml_to_value(body),
    }
}

struct XmlNode {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl XmlNode {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Map::new(),
            text: String::new(),
        }
    }

    fn into_value(mut self) -> Value {
        if self.children.is_empty() {
            return Value::String(self.text);
        }
        if !self.text.is_empty() {
            self.children.insert("#text".to_string(), Value::String(self.text));
        }
        Value::Object(self.children)
    }
}

/// Convert an XML document into a mapping keyed by element name.
///
/// Element text becomes a string value, child elements become nested
/// mappings, and attributes are kept under `@`-prefixed keys. Repeated
/// sibling elements stay separate entries under generated keys
/// (`recording`, `recording2`, ...); callers iterate the mapping's values
/// in document order rather than relying on key names.
fn xml_to_value(body: &str) -> Result<Value, BbbError> {
    let mut reader = Reader::from_str(body);
    reader.trim_text(true);

    let mut stack = vec![XmlNode::new(String::new())];

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let mut node = XmlNode::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
                for attr in start.attributes() {
                    let attr = attr.map_err(|e| BbbError::Parse(e.to_string()))?;
                    let key = format!("@{}", String::from_utf8_lossy(attr.key.as_ref()));
                    let value = attr
                        .unescape_value()
                        .map_err(|e| BbbError::Parse(e.to_string()))?;
                    node.children.insert(key, Value::String(value.into_owned()));
                }
                stack.push(node);
            }
            Ok(Event::Empty(empty)) => {
                let name = String::from_utf8_lossy(empty.name().as_ref()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    insert_child(&mut parent.children, name, Value::String(String::new()));
                }
            }
            Ok(Event::Text(text)) => {
                let text = text.unescape().map_err(|e| BbbError::Parse(e.to_string()))?;
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&text);
                }
            }
            Ok(Event::CData(cdata)) => {
                let bytes = cdata.into_inner();
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&String::from_utf8_lossy(&bytes));
                }
            }
            Ok(Event::End(_)) => {
                if stack.len() < 2 {
                    return Err(BbbError::Parse("unexpected closing tag".to_string()));
                }
                let node = stack
                    .pop()
                    .ok_or_else(|| BbbError::Parse("unexpected closing tag".to_string()))?;
                let name = node.name.clone();
                let value = node.into_value();
                if let Some(parent) = stack.last_mut() {
                    insert_child(&mut parent.children, name, value);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(BbbError::Parse(e.to_string())),
        }
    }

    if stack.len() != 1 {
        return Err(BbbError::Parse("unclosed element".to_string()));
    }
    let document = stack
        .pop()
        .ok_or_else(|| BbbError::Parse("empty document".to_string()))?;
    if document.children.is_empty() {
        return Err(BbbError::Parse("no root element".to_string()));
    }
    Ok(Value::Object(document.children))
}

fn insert_child(map: &mut Map<String, Value>, name: String, value: Value) {
    if !map.contains_key(&name) {
        map.insert(name, value);
        return;
    }
    let mut n = 2;
    loop {
        let key = format!("{}{}", name, n);
        if !map.contains_key(&key) {
            map.insert(key, value);
            return;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn xml_elements_become_nested_mappings() {
        let body = "<response><returncode>SUCCESS</returncode>\
                    <version>2.0</version></response>";

        let value = decode_body(ResponseFormat::Xml, body).unwrap();

        assert_eq!(
            value,
            json!({"response": {"returncode": "SUCCESS", "version": "2.0"}})
        );
    }

    #[test]
    fn repeated_siblings_keep_document_order() {
        let body = "<response><returncode>SUCCESS</returncode><recordings>\
                    <recording><recordID>r1</recordID></recording>\
                    <recording><recordID>r2</recordID></recording>\
                    </recordings></response>";

        let value = decode_body(ResponseFormat::Xml, body).unwrap();
        let recordings = value["response"]["recordings"].as_object().unwrap();

        let ids: Vec<&Value> = recordings.values().map(|r| &r["recordID"]).collect();
        assert_eq!(ids, vec!["r1", "r2"]);
    }

    #[test]
    fn attributes_are_kept_under_prefixed_keys() {
        let body = r#"<response><meeting id="m1">Demo</meeting></response>"#;

        let value = decode_body(ResponseFormat::Xml, body).unwrap();

        assert_eq!(value["response"]["meeting"]["@id"], "m1");
        assert_eq!(value["response"]["meeting"]["#text"], "Demo");
    }

    #[test]
    fn childless_element_decodes_to_empty_string() {
        let body = "<response><returncode>SUCCESS</returncode>\
                    <recordings></recordings></response>";

        let value = decode_body(ResponseFormat::Xml, body).unwrap();

        assert_eq!(value["response"]["recordings"], "");
    }

    #[test]
    fn malformed_xml_is_a_parse_error() {
        let err = decode_body(ResponseFormat::Xml, "<response><oops></response>").unwrap_err();

        assert_eq!(err.code(), "parsingError");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = decode_body(ResponseFormat::Json, "{not json").unwrap_err();

        assert_eq!(err.code(), "parsingError");
    }

    #[test]
    fn json_bodies_pass_through() {
        let body = r#"{"response": {"returncode": "SUCCESS", "tracks": []}}"#;

        let value = decode_body(ResponseFormat::Json, body).unwrap();

        assert_eq!(value["response"]["returncode"], "SUCCESS");
    }
}
