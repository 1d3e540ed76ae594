//! zcl2sdt - Convert a ZCL device profile into a oneM2M SDT document.
//!
//! The input is validated against the ZCL device schema, decoded, and
//! rendered as an SDT 4.0 `Domain`. The result is written to
//! `<DOMAIN>.xml` in the output directory.
//!
//! # Usage
//!
//! ```bash
//! zcl2sdt [OPTIONS] --file <FILE>
//! ```
//!
//! # Examples
//!
//! ```bash
//! # Convert a profile, producing ./example.SDT.xml
//! zcl2sdt -f lamp.xml
//!
//! # Choose the domain name and output directory
//! zcl2sdt -f lamp.xml -d org.example.lamp -o out/
//!
//! # Validate against a schema on disk instead of the bundled one
//! zcl2sdt -f lamp.xml --schema schema/zcl_device.xsd
//! ```

use std::fs::File;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use zcl2sdt::convert::{convert_file, DEFAULT_DOMAIN_ID};
use zcl2sdt::validation::SchemaValidator;
use zcl2sdt::writer::WriterConfig;
use zcl2sdt::Error;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert a ZCL device profile into a oneM2M SDT document.
#[derive(Parser, Debug)]
#[command(name = "zcl2sdt")]
#[command(version = VERSION)]
#[command(about = "Convert a ZCL device profile into a oneM2M SDT document")]
#[command(long_about = "Validates a ZCL device profile against the ZCL device schema, \
    decodes its endpoints and clusters, and writes the equivalent SDT 4.0 Domain \
    to <DOMAIN>.xml.")]
struct Args {
    /// ZCL device profile to convert
    #[arg(short, long, value_name = "FILE", value_parser = existing_file)]
    file: PathBuf,

    /// Domain identifier; also names the output file
    #[arg(short, long, value_name = "DOMAIN", default_value = DEFAULT_DOMAIN_ID)]
    domain: String,

    /// Schema to validate against (defaults to the bundled ZCL device schema)
    #[arg(short, long, value_name = "XSD")]
    schema: Option<PathBuf>,

    /// Directory the output file is written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Output compact XML (no indentation)
    #[arg(long)]
    compact: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,
}

/// Accepts only paths naming an existing regular file that can be opened.
fn existing_file(arg: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(arg);
    if !path.is_file() {
        return Err(format!("The file {} does not exist!", arg));
    }
    File::open(&path).map_err(|e| format!("The file {} cannot be opened: {}", arg, e))?;
    Ok(path)
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> zcl2sdt::Result<()> {
    if !args.output_dir.is_dir() {
        return Err(Error::Usage(format!(
            "output directory {} does not exist",
            args.output_dir.display()
        )));
    }

    let mut validator = match &args.schema {
        Some(path) => SchemaValidator::from_file(path)?,
        None => SchemaValidator::bundled()?,
    };

    let mut config = WriterConfig::new();
    if args.compact {
        config = config.compact();
    }

    let path = convert_file(
        &args.file,
        &mut validator,
        &args.domain,
        &args.output_dir,
        &config,
    )?;
    info!(input = %args.file.display(), output = %path.display(), "conversion finished");
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.debug);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        let code = match e {
            Error::Usage(_) => 2,
            _ => 1,
        };
        process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_missing_file_is_a_usage_error() {
        let err = Args::try_parse_from(["zcl2sdt", "-f", "/nonexistent/device.xml"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap();
        let err = Args::try_parse_from(["zcl2sdt", "-f", path]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_is_a_usage_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("locked.xml");
        std::fs::write(&input, "<device/>").unwrap();
        std::fs::set_permissions(&input, std::fs::Permissions::from_mode(0o000)).unwrap();
        if File::open(&input).is_ok() {
            // running with privileges that bypass file modes
            return;
        }

        let err = Args::try_parse_from(["zcl2sdt", "-f", input.to_str().unwrap()]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("cannot be opened"));
    }

    #[test]
    fn test_file_is_required() {
        let err = Args::try_parse_from(["zcl2sdt"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_defaults() {
        let manifest = env!("CARGO_MANIFEST_DIR");
        let input = format!("{}/Cargo.toml", manifest);
        let args = Args::try_parse_from(["zcl2sdt", "--file", input.as_str()]).unwrap();

        assert_eq!(args.domain, DEFAULT_DOMAIN_ID);
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert!(args.schema.is_none());
        assert!(!args.compact);
    }
}
