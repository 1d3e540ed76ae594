//! ZCL document reader.
//!
//! Parses XML bytes into an owned [`Element`] tree using `quick-xml`.
//! Only element structure and attributes are kept; text, comments and
//! processing instructions are dropped. This enforces well-formedness only
//! and expects UTF-8 input without DTD entities. Validated input is read by
//! libxml2 in the [`validation`](crate::validation) module instead, which
//! also handles other encodings and internal entities.
//!
//! # Example
//!
//! ```rust
//! use zcl2sdt::reader::parse_str;
//!
//! let root = parse_str(r#"<device><endpoints><endpoint id="1"/></endpoints></device>"#).unwrap();
//! assert_eq!(root.name, "device");
//! assert_eq!(root.children()[0].children()[0].attribute("id"), Some("1"));
//! ```

use crate::element::Element;
use crate::error::{Error, Result};
use quick_xml::events::BytesStart;
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use std::io::BufRead;
use std::str;
use tracing::trace;

/// Intermediate parsed event data (owned, to avoid borrow conflicts).
enum ParsedEvent {
    Start { name: String, attrs: Vec<(String, String)> },
    End,
    Empty { name: String, attrs: Vec<(String, String)> },
    Eof,
}

/// Parses a complete XML document from a buffered reader.
///
/// Returns the root element. Fails if the document is not well-formed, has
/// no root element, or has more than one.
pub fn parse<R: BufRead>(reader: R) -> Result<Element> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.config_mut().trim_text(true);

    let mut buf = Vec::with_capacity(4096);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        buf.clear();

        let event = xml_reader
            .read_event_into(&mut buf)
            .map_err(|source| Error::Malformed {
                position: xml_reader.error_position(),
                source,
            })?;
        let event_data = match event {
            XmlEvent::Start(ref e) => Some(ParsedEvent::Start {
                name: local_name(e)?,
                attrs: extract_attrs(e)?,
            }),
            XmlEvent::End(_) => Some(ParsedEvent::End),
            XmlEvent::Empty(ref e) => Some(ParsedEvent::Empty {
                name: local_name(e)?,
                attrs: extract_attrs(e)?,
            }),
            XmlEvent::Eof => Some(ParsedEvent::Eof),
            _ => None,
        };

        match event_data {
            Some(ParsedEvent::Start { name, attrs }) => {
                trace!(element = %name, depth = stack.len(), "start");
                stack.push(build(name, attrs));
            }
            Some(ParsedEvent::Empty { name, attrs }) => {
                trace!(element = %name, depth = stack.len(), "empty");
                attach(&mut stack, &mut root, build(name, attrs))?;
            }
            Some(ParsedEvent::End) => {
                // quick-xml has already checked the end name against the open tag
                if let Some(done) = stack.pop() {
                    attach(&mut stack, &mut root, done)?;
                }
            }
            Some(ParsedEvent::Eof) => {
                if let Some(open) = stack.last() {
                    return Err(Error::SchemaValidation(format!(
                        "byte {}: unexpected end of document, <{}> is not closed",
                        xml_reader.buffer_position(),
                        open.name
                    )));
                }
                break;
            }
            None => {}
        }
    }

    root.ok_or_else(|| Error::SchemaValidation("document has no root element".to_string()))
}

/// Parses a complete XML document held in memory.
pub fn parse_bytes(bytes: &[u8]) -> Result<Element> {
    parse(bytes)
}

/// Parses a complete XML document from a string.
pub fn parse_str(xml: &str) -> Result<Element> {
    parse(xml.as_bytes())
}

fn build(name: String, attrs: Vec<(String, String)>) -> Element {
    let mut element = Element::new(name);
    for (key, value) in attrs {
        element.set_attribute(key, value);
    }
    element
}

/// Attaches a finished element to its parent, or makes it the root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(Error::SchemaValidation(format!(
            "unexpected second root element <{}>",
            element.name
        ))),
    }
}

fn local_name(e: &BytesStart<'_>) -> Result<String> {
    let local_name = e.local_name();
    Ok(str::from_utf8(local_name.as_ref())?.to_string())
}

/// Extracts attributes from a BytesStart element as owned data.
///
/// Namespace declarations are skipped and prefixed keys are reduced to
/// their local name.
fn extract_attrs(e: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = str::from_utf8(attr.key.local_name().as_ref())?.to_string();
        let value = attr.unescape_value()?.to_string();
        attrs.push((key, value));
    }
    Ok(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SIMPLE_ZCL: &str = r#"<?xml version="1.0"?>
<!-- a lamp -->
<device>
  <endpoints>
    <endpoint id="1">
      <inClusters>
        <cluster id="0x0006" name="OnOff">
          <commands>
            <command id="0x02" name="Toggle"/>
          </commands>
        </cluster>
      </inClusters>
    </endpoint>
  </endpoints>
</device>"#;

    #[test]
    fn test_parse_simple_zcl() {
        let root = parse(Cursor::new(SIMPLE_ZCL)).unwrap();

        assert_eq!(root.name, "device");
        let endpoint = &root.children()[0].children()[0];
        assert_eq!(endpoint.name, "endpoint");
        assert_eq!(endpoint.attribute("id"), Some("1"));

        let command = root
            .descendants()
            .find(|e| e.name == "command")
            .unwrap();
        assert_eq!(command.attribute("name"), Some("Toggle"));
        assert!(command.is_empty());
    }

    #[test]
    fn test_parse_unescapes_attributes() {
        let root = parse_str(r#"<cluster id="0x0001" name="Power &amp; Config"/>"#).unwrap();
        assert_eq!(root.attribute("name"), Some("Power & Config"));
    }

    #[test]
    fn test_parse_strips_namespaces() {
        let root =
            parse_str(r#"<z:device xmlns:z="urn:zcl"><z:endpoints z:kind="x"/></z:device>"#)
                .unwrap();
        assert_eq!(root.name, "device");
        assert!(root.attributes().is_empty());
        assert_eq!(root.children()[0].attribute("kind"), Some("x"));
    }

    #[test]
    fn test_mismatched_end_tag() {
        let result = parse_str("<device><endpoints></device>");
        assert!(matches!(result, Err(Error::Malformed { .. })));
    }

    #[test]
    fn test_unclosed_document() {
        let err = parse_str("<device><endpoints>").unwrap_err();
        assert!(err.to_string().contains("<endpoints> is not closed"));
    }

    #[test]
    fn test_empty_document() {
        let err = parse_str("<?xml version=\"1.0\"?>").unwrap_err();
        assert!(err.to_string().contains("no root element"));
    }

    #[test]
    fn test_second_root() {
        let err = parse_str("<device/><device/>").unwrap_err();
        assert!(err.to_string().contains("second root"));
    }
}
