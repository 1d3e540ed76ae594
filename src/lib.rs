//! ZCL to oneM2M SDT conversion library.
//!
//! This crate converts a Zigbee Cluster Library (ZCL) device profile into a
//! oneM2M Smart Device Template (SDT 4.0) document.
//!
//! # Pipeline
//!
//! 1. **Validation** ([`validation`], `validation` feature) checks the input
//!    against the ZCL device schema and returns the parsed [`Element`] tree.
//! 2. **Decoding** ([`decoder`]) turns the tree into a typed [`Device`].
//! 3. **Encoding** ([`encoder`]) builds the SDT element tree, which the
//!    [`writer`] serializes.
//!
//! # Quick Start
//!
//! ```rust
//! use zcl2sdt::{decode_device, encode, reader, writer};
//!
//! let zcl = r#"<device><endpoints>
//!   <endpoint id="1"/>
//!   <endpoint id="2">
//!     <inClusters>
//!       <cluster id="0x0006" name="OnOff">
//!         <commands><command id="0x02" name="Toggle"/></commands>
//!       </cluster>
//!     </inClusters>
//!   </endpoint>
//! </endpoints></device>"#;
//!
//! let root = reader::parse_str(zcl).unwrap();
//! let device = decode_device(&root).unwrap();
//! let sdt = encode(&device, "example.SDT");
//! let xml = writer::to_string(&sdt).unwrap();
//! assert!(xml.contains(r#"<Action name="Toggle"/>"#));
//! ```
//!
//! # Module Structure
//!
//! - [`objects`] - Decoded ZCL device model
//! - [`element`] - Owned XML element tree shared by reader and encoder
//! - [`reader`] - XML bytes to element tree
//! - [`decoder`] - Element tree to device model
//! - [`encoder`] - Device model to SDT element tree
//! - [`writer`] - Element tree serialization
//! - [`convert`] - End-to-end pipeline and output file handling
//! - [`error`] - Error types
//!
//! # Optional Features
//!
//! - `validation` - XSD validation through libxml2
//! - `serde` - Enable serde serialization/deserialization of the device model
//! - `cli` - The `zcl2sdt` command-line tool

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod convert;
pub mod decoder;
pub mod element;
pub mod encoder;
pub mod error;
pub mod objects;
pub mod reader;
#[cfg(feature = "validation")]
pub mod validation;
pub mod writer;

// Re-export commonly used types at the crate root
pub use convert::{convert_element, write_document, DEFAULT_DOMAIN_ID};
pub use decoder::{decode, decode_device, DomainNode};
pub use element::Element;
pub use encoder::{encode, SDT_NAMESPACE};
pub use error::{Error, Result};
pub use objects::{Attribute, Cluster, Command, Device, Endpoint, Payload};
#[cfg(feature = "validation")]
pub use validation::SchemaValidator;
pub use writer::{SdtWriter, WriterConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
