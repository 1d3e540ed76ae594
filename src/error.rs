//! Error types for the ZCL to SDT converter.

use thiserror::Error;

/// Errors that can occur while validating, decoding or encoding a device profile.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid command-line input, reported before any conversion stage runs
    #[error("Usage error: {0}")]
    Usage(String),

    /// Schema document could not be found
    #[error("Schema file not found: {0}")]
    SchemaNotFound(String),

    /// Schema document could not be compiled
    #[error("Invalid schema: {0}")]
    Schema(String),

    /// Input is not well-formed XML or does not conform to the schema
    #[error("Schema validation failed: {0}")]
    SchemaValidation(String),

    /// Input is not well-formed XML
    #[error("XML is not well-formed at byte {position}: {source}")]
    Malformed {
        /// Byte offset where the reader stopped
        position: u64,
        /// Underlying reader error
        source: quick_xml::Error,
    },

    /// XML parsing error
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    /// XML attribute parsing error
    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// Element with no decoding rule
    #[error("Unexpected XML element: {0}")]
    UnexpectedElement(String),

    /// Required attribute missing on an element
    #[error("Missing required attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        /// Element the attribute belongs to
        element: String,
        /// Name of the missing attribute
        attribute: &'static str,
    },

    /// A decoded node had a different kind than its position requires
    #[error("Expected {expected}, found {found}")]
    UnexpectedNode {
        /// Kind required at this position
        expected: &'static str,
        /// Kind actually decoded
        found: &'static str,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl Error {
    /// Returns true for errors raised when the parsed tree has a shape the
    /// decoder has no rule for.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Error::UnexpectedElement(_) | Error::MissingAttribute { .. } | Error::UnexpectedNode { .. }
        )
    }
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, Error>;
