//! End-to-end conversion: parsed tree → device → SDT document → disk.
//!
//! The output file is only written after decoding and encoding have both
//! succeeded, so a failed conversion never leaves a partial document.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::decoder::decode_device;
use crate::element::Element;
use crate::encoder::encode;
use crate::error::Result;
use crate::writer::{SdtWriter, WriterConfig};

#[cfg(feature = "validation")]
use crate::validation::SchemaValidator;

/// Domain identifier used when none is given.
pub const DEFAULT_DOMAIN_ID: &str = "example.SDT";

/// File extension appended to the domain identifier.
pub const OUTPUT_EXTENSION: &str = "xml";

/// Decodes a parsed ZCL root and renders it as an SDT document string.
pub fn convert_element(root: &Element, domain_id: &str, config: &WriterConfig) -> Result<String> {
    let device = decode_device(root)?;
    debug!(endpoints = device.endpoint_count(), "decoded device");
    let sdt = encode(&device, domain_id);
    SdtWriter::with_config(config.clone()).write_to_string(&sdt)
}

/// Validates, decodes and encodes raw ZCL bytes.
#[cfg(feature = "validation")]
pub fn convert(
    raw: &[u8],
    validator: &mut SchemaValidator,
    domain_id: &str,
    config: &WriterConfig,
) -> Result<String> {
    let root = validator.validate(raw)?;
    convert_element(&root, domain_id, config)
}

/// Converts the ZCL file at `input` and writes `<domain_id>.xml` into
/// `out_dir`. Returns the path of the written file.
#[cfg(feature = "validation")]
pub fn convert_file(
    input: &Path,
    validator: &mut SchemaValidator,
    domain_id: &str,
    out_dir: &Path,
    config: &WriterConfig,
) -> Result<PathBuf> {
    let raw = std::fs::read(input)?;
    debug!(path = %input.display(), bytes = raw.len(), "read input");
    let xml = convert(&raw, validator, domain_id, config)?;
    write_document(&xml, domain_id, out_dir)
}

/// Returns the output path for `domain_id` inside `out_dir`.
pub fn output_path(domain_id: &str, out_dir: &Path) -> PathBuf {
    out_dir.join(format!("{}.{}", domain_id, OUTPUT_EXTENSION))
}

/// Writes a rendered document to `<domain_id>.xml` in `out_dir`, replacing
/// any previous content.
pub fn write_document(xml: &str, domain_id: &str, out_dir: &Path) -> Result<PathBuf> {
    let path = output_path(domain_id, out_dir);
    let mut out = BufWriter::new(File::create(&path)?);
    out.write_all(xml.as_bytes())?;
    out.flush()?;
    info!(path = %path.display(), bytes = xml.len(), "wrote SDT document");
    Ok(path)
}
