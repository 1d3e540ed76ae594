//! inspect_device - Print the endpoints and clusters of a ZCL device profile.
//!
//! Parses and decodes a ZCL device profile (without schema validation) and
//! prints one line per cluster, marking which clusters end up as SDT
//! properties, modules, or are not rendered at all.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example inspect_device <device.xml>
//! ```

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::process;

use zcl2sdt::decode_device;
use zcl2sdt::reader::parse;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <device.xml>", args[0]);
        process::exit(1);
    }

    let file = match File::open(&args[1]) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening {}: {}", args[1], e);
            process::exit(1);
        }
    };

    let device = match parse(BufReader::new(file)).and_then(|root| decode_device(&root)) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error decoding {}: {}", args[1], e);
            process::exit(1);
        }
    };

    let rendered = device.endpoint_count() != 1;
    println!("{} endpoint(s)", device.endpoint_count());
    if !rendered {
        println!("(single endpoint: the SDT Device will be empty)");
    }

    for endpoint in device.endpoints() {
        println!("endpoint {}", endpoint.id);
        for cluster in endpoint.in_clusters() {
            let role = match (rendered, cluster.is_properties()) {
                (false, _) => "skipped",
                (true, true) => "properties",
                (true, false) => "module",
            };
            println!(
                "  in  {:<8} {:<24} {:>3} attr {:>3} cmd  -> {}",
                cluster.id,
                cluster.name,
                cluster.attributes().len(),
                cluster.commands().len(),
                role
            );
        }
        for cluster in endpoint.out_clusters() {
            println!(
                "  out {:<8} {:<24} {:>3} attr {:>3} cmd  -> not rendered",
                cluster.id,
                cluster.name,
                cluster.attributes().len(),
                cluster.commands().len()
            );
        }
    }
}
