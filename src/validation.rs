//! XSD validation for ZCL device profiles.
//!
//! This module checks input documents against the ZCL device schema and, on
//! success, hands back the parsed [`Element`] tree for the decoder.
//!
//! # Requirements
//!
//! This module requires the `validation` feature to be enabled and depends on
//! libxml2 being installed on the system.
//!
//! ## Installing libxml2
//!
//! **Ubuntu/Debian:**
//! ```bash
//! sudo apt-get install libxml2-dev
//! ```
//!
//! **macOS:**
//! ```bash
//! brew install libxml2
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use zcl2sdt::validation::SchemaValidator;
//!
//! // Compile the schema once, then validate as many documents as needed
//! let mut validator = SchemaValidator::bundled()?;
//! let root = validator.validate(br#"<device><endpoints/></device>"#)?;
//! assert_eq!(root.name, "device");
//! ```

use std::fs;
use std::path::Path;

use libxml::error::StructuredError;
use libxml::parser::{Parser, ParserOptions};
use libxml::schemas::{SchemaParserContext, SchemaValidationContext};
use libxml::tree::Node;
use tracing::debug;

use crate::element::Element;
use crate::error::{Error, Result};

/// Default path to the ZCL device schema (relative to the crate root).
pub const DEFAULT_SCHEMA_PATH: &str = "schema/zcl_device.xsd";

/// The ZCL device schema shipped with the crate.
pub const BUNDLED_SCHEMA: &str = include_str!("../schema/zcl_device.xsd");

/// A compiled ZCL device schema.
///
/// The schema is parsed once on construction; [`SchemaValidator::validate`]
/// can then be called for any number of documents.
pub struct SchemaValidator {
    context: SchemaValidationContext,
}

impl SchemaValidator {
    /// Loads and compiles the schema at `schema_path`.
    pub fn from_file<P: AsRef<Path>>(schema_path: P) -> Result<Self> {
        let schema_path = schema_path.as_ref();
        if !schema_path.exists() {
            return Err(Error::SchemaNotFound(schema_path.display().to_string()));
        }
        let schema = fs::read(schema_path)?;
        debug!(path = %schema_path.display(), bytes = schema.len(), "loaded schema");
        Self::from_bytes(&schema)
    }

    /// Compiles a schema held in memory.
    pub fn from_bytes(schema: &[u8]) -> Result<Self> {
        let mut schema_parser = SchemaParserContext::from_buffer(schema);
        let context = SchemaValidationContext::from_parser(&mut schema_parser)
            .map_err(|errors| Error::Schema(join_errors(&errors)))?;
        Ok(Self { context })
    }

    /// Compiles the schema bundled with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_bytes(BUNDLED_SCHEMA.as_bytes())
    }

    /// Validates raw document bytes and returns the parsed root element.
    ///
    /// libxml2 both parses and validates, so any encoding it can decode and
    /// any entity declared in the internal DTD subset is accepted. Fails with
    /// [`Error::SchemaValidation`] if the bytes are not well-formed XML or do
    /// not conform to the schema.
    pub fn validate(&mut self, raw: &[u8]) -> Result<Element> {
        let options = ParserOptions {
            recover: false,
            ..Default::default()
        };
        let doc = Parser::default()
            .parse_string_with_options(raw, options)
            .map_err(|e| Error::SchemaValidation(format!("document is not well-formed: {:?}", e)))?;

        self.context
            .validate_document(&doc)
            .map_err(|errors| Error::SchemaValidation(join_errors(&errors)))?;

        let root = doc
            .get_root_element()
            .map(|node| element_from_node(&node))
            .ok_or_else(|| Error::SchemaValidation("document has no root element".to_string()))?;

        debug!(root = %root.name, "document conforms to schema");
        Ok(root)
    }
}

/// Copies a libxml2 element and its element descendants into an owned tree.
///
/// Attribute values arrive as UTF-8 with entity references expanded. They
/// are stored sorted by name since libxml hands them back unordered.
fn element_from_node(node: &Node) -> Element {
    let mut properties: Vec<(String, String)> = node.get_properties().into_iter().collect();
    properties.sort();

    let mut element = Element::new(node.get_name());
    for (key, value) in properties {
        element.set_attribute(key, value);
    }
    for child in node.get_child_elements() {
        element.push(element_from_node(&child));
    }
    element
}

/// Validates `raw` against the schema document `schema` in one shot.
pub fn validate(raw: &[u8], schema: &[u8]) -> Result<Element> {
    SchemaValidator::from_bytes(schema)?.validate(raw)
}

/// Validates a ZCL file against the schema at `schema_path`, or the bundled
/// schema when `None`.
pub fn validate_file<P: AsRef<Path>>(xml_path: P, schema_path: Option<&Path>) -> Result<Element> {
    let xml_path = xml_path.as_ref();
    if !xml_path.exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("XML file not found: {}", xml_path.display()),
        )));
    }

    let mut validator = match schema_path {
        Some(path) => SchemaValidator::from_file(path)?,
        None => SchemaValidator::bundled()?,
    };
    validator.validate(&fs::read(xml_path)?)
}

/// Formats libxml2 diagnostics as `line:column: message`, one per problem.
fn join_errors(errors: &[StructuredError]) -> String {
    if errors.is_empty() {
        return "unknown error".to_string();
    }
    errors
        .iter()
        .map(|e| {
            let message = e.message.as_deref().unwrap_or("unknown error").trim();
            match (e.line, e.col) {
                (Some(line), Some(col)) => format!("line {}:{}: {}", line, col, message),
                (Some(line), None) => format!("line {}: {}", line, message),
                _ => message.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<device>
  <endpoints>
    <endpoint id="1">
      <inClusters>
        <cluster id="0x0006" name="OnOff">
          <attributes>
            <attribute id="0x0000" name="onOff" type="bool"/>
          </attributes>
          <commands>
            <command id="0x00" name="Off"/>
            <command id="0x40" name="OffWithEffect">
              <payload name="effectId" type="uint8"/>
            </command>
          </commands>
        </cluster>
      </inClusters>
    </endpoint>
  </endpoints>
</device>"#;

    #[test]
    fn test_validate_valid_document() {
        let mut validator = SchemaValidator::bundled().unwrap();
        let root = validator.validate(VALID.as_bytes()).unwrap();
        assert_eq!(root.name, "device");
    }

    #[test]
    fn test_validator_is_reusable() {
        let mut validator = SchemaValidator::bundled().unwrap();
        assert!(validator.validate(VALID.as_bytes()).is_ok());
        assert!(validator.validate(b"<device/>").is_err());
        assert!(validator.validate(VALID.as_bytes()).is_ok());
    }

    #[test]
    fn test_missing_required_attribute() {
        let xml = r#"<device><endpoints><endpoint/></endpoints></device>"#;
        let err = validate(xml.as_bytes(), BUNDLED_SCHEMA.as_bytes()).unwrap_err();

        assert!(matches!(err, Error::SchemaValidation(_)));
        let msg = err.to_string();
        assert!(msg.contains("endpoint"), "{}", msg);
        assert!(msg.contains("'id'"), "{}", msg);
    }

    #[test]
    fn test_unexpected_element() {
        let xml = r#"<device><endpoints><cluster id="1" name="x"/></endpoints></device>"#;
        let err = validate(xml.as_bytes(), BUNDLED_SCHEMA.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::SchemaValidation(_)));
    }

    #[test]
    fn test_two_payloads_rejected() {
        let xml = r#"<device><endpoints><endpoint id="1"><inClusters>
            <cluster id="0x0006" name="OnOff"><commands>
              <command id="1" name="On">
                <payload name="a" type="uint8"/>
                <payload name="b" type="uint8"/>
              </command>
            </commands></cluster>
          </inClusters></endpoint></endpoints></device>"#;
        assert!(validate(xml.as_bytes(), BUNDLED_SCHEMA.as_bytes()).is_err());
    }

    #[test]
    fn test_malformed_xml() {
        let err = validate(b"<device><endpoints></device>", BUNDLED_SCHEMA.as_bytes())
            .unwrap_err();
        assert!(matches!(err, Error::SchemaValidation(_)));
        assert!(err.to_string().contains("not well-formed"));
    }

    #[test]
    fn test_latin1_document() {
        let xml: &[u8] = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n\
            <device><endpoints><endpoint id=\"1\"><inClusters>\
            <cluster id=\"0x0008\" name=\"L\xFCmi\"/>\
            </inClusters></endpoint></endpoints></device>";
        let mut validator = SchemaValidator::bundled().unwrap();
        let root = validator.validate(xml).unwrap();

        let cluster = root.descendants().find(|e| e.name == "cluster").unwrap();
        assert_eq!(cluster.attribute("name"), Some("L\u{fc}mi"));
    }

    #[test]
    fn test_internal_dtd_entity() {
        let xml = r#"<?xml version="1.0"?>
<!DOCTYPE device [
  <!ENTITY onoff "OnOff">
]>
<device><endpoints><endpoint id="1"><inClusters>
  <cluster id="0x0006" name="&onoff;"/>
</inClusters></endpoint></endpoints></device>"#;
        let mut validator = SchemaValidator::bundled().unwrap();
        let root = validator.validate(xml.as_bytes()).unwrap();

        let cluster = root.descendants().find(|e| e.name == "cluster").unwrap();
        assert_eq!(cluster.attribute("id"), Some("0x0006"));
        assert_eq!(cluster.attribute("name"), Some("OnOff"));
    }

    #[test]
    fn test_tree_keeps_document_order() {
        let mut validator = SchemaValidator::bundled().unwrap();
        let root = validator.validate(VALID.as_bytes()).unwrap();

        let names: Vec<_> = root
            .descendants()
            .filter(|e| e.name == "command")
            .filter_map(|e| e.attribute("name"))
            .collect();
        assert_eq!(names, vec!["Off", "OffWithEffect"]);
        let payload = root.descendants().find(|e| e.name == "payload").unwrap();
        assert_eq!(payload.attribute("type"), Some("uint8"));
    }

    #[test]
    fn test_invalid_schema() {
        let result = SchemaValidator::from_bytes(b"<not-a-schema/>");
        assert!(matches!(result, Err(Error::Schema(_))));
    }

    #[test]
    fn test_validate_missing_schema() {
        let result = SchemaValidator::from_file("/nonexistent/path/schema.xsd");

        assert!(result.is_err());
        let err = result.err().unwrap();
        assert!(err.to_string().contains("Schema file not found"));
    }

    #[test]
    fn test_validate_missing_xml_file() {
        let result = validate_file("/nonexistent/file.xml", None);

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("XML file not found"));
    }

    #[test]
    fn test_default_schema_path_matches_bundle() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_SCHEMA_PATH);
        assert_eq!(fs::read_to_string(path).unwrap(), BUNDLED_SCHEMA);
    }
}
