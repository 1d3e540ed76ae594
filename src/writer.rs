//! XML writer for serializing element trees.
//!
//! This module serializes an [`Element`] tree, typically the SDT document
//! built by the [`encoder`](crate::encoder), with `quick-xml`. Childless
//! elements are written as self-closing tags and attributes keep their
//! insertion order, so the same tree always produces the same bytes.
//!
//! # Example
//!
//! ```rust
//! use zcl2sdt::element::Element;
//! use zcl2sdt::writer::SdtWriter;
//!
//! let mut root = Element::new("Domain").with_attribute("id", "example.SDT");
//! root.append("Devices").append("Device");
//!
//! let xml = SdtWriter::new().write_to_string(&root).unwrap();
//! assert!(xml.contains("<Device/>"));
//! ```

use crate::element::Element;
use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// Indentation used for SDT documents unless configured otherwise.
pub const DEFAULT_INDENT: &str = "  ";

/// Layout of a serialized SDT document.
///
/// The default matches what `zcl2sdt` writes: a UTF-8 XML declaration, then
/// the `Domain` tree indented by [`DEFAULT_INDENT`] per level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    /// Indentation unit per nesting level, or `None` to write the tree on one line
    pub indent: Option<String>,
    /// Whether to start with `<?xml version="1.0" encoding="UTF-8"?>`
    pub xml_declaration: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent: Some(DEFAULT_INDENT.to_string()),
            xml_declaration: true,
        }
    }
}

impl WriterConfig {
    /// Creates the default (indented, with declaration) configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the tree on a single line. The declaration setting is kept.
    pub fn compact(mut self) -> Self {
        self.indent = None;
        self
    }

    /// Indents each level with `unit`. Only the first character of `unit`
    /// is repeated, `unit.len()` times.
    pub fn with_indent_string(mut self, unit: impl Into<String>) -> Self {
        self.indent = Some(unit.into());
        self
    }

    /// Sets whether to emit the XML declaration.
    pub fn with_xml_declaration(mut self, xml_declaration: bool) -> Self {
        self.xml_declaration = xml_declaration;
        self
    }

    /// Returns true if the output is written on a single line.
    pub fn is_compact(&self) -> bool {
        self.indent.is_none()
    }
}

/// Element tree XML writer.
pub struct SdtWriter {
    config: WriterConfig,
}

impl SdtWriter {
    /// Creates a new writer with default configuration.
    pub fn new() -> Self {
        Self {
            config: WriterConfig::default(),
        }
    }

    /// Creates a new writer with the specified configuration.
    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Writes an element tree to a string.
    pub fn write_to_string(&self, root: &Element) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(root, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| Error::Utf8(e.utf8_error()))
    }

    /// Writes an element tree to any Write implementation.
    pub fn write<W: Write>(&self, root: &Element, writer: W) -> Result<()> {
        let mut xml_writer = match &self.config.indent {
            Some(unit) => {
                let (indent_char, indent_size) = indent_unit(unit);
                Writer::new_with_indent(writer, indent_char, indent_size)
            }
            None => Writer::new(writer),
        };

        if self.config.xml_declaration {
            // the indenting writer breaks the line before the root element itself
            xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }

        self.write_element(&mut xml_writer, root)?;

        if !self.config.is_compact() {
            xml_writer.get_mut().write_all(b"\n")?;
        }
        Ok(())
    }

    fn write_element<W: Write>(&self, writer: &mut Writer<W>, element: &Element) -> Result<()> {
        let mut start = BytesStart::new(element.name.as_str());
        for (key, value) in element.attributes() {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if element.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in element.children() {
            self.write_element(writer, child)?;
        }
        writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
        Ok(())
    }
}

impl Default for SdtWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits an indentation string into the (char, count) pair quick-xml expects.
fn indent_unit(indent: &str) -> (u8, usize) {
    match indent.as_bytes().first() {
        Some(&b) => (b, indent.len()),
        None => (b' ', 0),
    }
}

/// Convenience function to write an element tree to a string.
pub fn to_string(root: &Element) -> Result<String> {
    SdtWriter::new().write_to_string(root)
}

/// Convenience function to write an element tree to a string without indentation.
pub fn to_string_compact(root: &Element) -> Result<String> {
    SdtWriter::with_config(WriterConfig::new().compact()).write_to_string(root)
}
