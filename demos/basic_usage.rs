// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the mdmcfg crate.
//!
//! This example demonstrates:
//! - Parsing a managed payload document
//! - Typed reads with coercion (numbers from text, flags from "YES"/"NO")
//! - Saturation of out-of-range integers
//! - Defaults for absent keys and mismatched values
//!
//! To run this example:
//! ```bash
//! # Optionally point it at your own payload file
//! cargo run --example basic_usage -- /path/to/managed.yaml
//!
//! # See why values fell back to defaults
//! RUST_LOG=debug cargo run --example basic_usage
//! ```

use mdmcfg::prelude::*;

const SAMPLE_PAYLOAD: &str = r#"
EnrollmentURL: https://mdm.example.com:8443/enroll?site=42
CheckInterval: "900"
MaxUploadKB: 70000
AllowCamera: "NO"
RequirePasscode: YES
Price: "19.99"
AllowedApps: [mail, maps, mail, notes]
Proxy:
  Host: proxy.example.com
  Port: 8080
Certificate: !binary 3q2+7w==
Expires: !timestamp 2030-01-01T00:00:00Z
"#;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== mdmcfg: Basic Usage ===\n");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            println!("Loading payload from {}\n", path);
            ConfigAccessor::new(MemoryStore::from(FileStore::from_file(path)?.into_payload()))
        }
        None => {
            println!("Using the built-in sample payload\n");
            ConfigAccessor::new(MemoryStore::from(YamlParser::new().parse(SAMPLE_PAYLOAD)?))
        }
    };

    println!("--- Example 1: Numbers ---");
    println!("CheckInterval (u32 from text): {}", config.unsigned_int_for("CheckInterval"));
    println!("MaxUploadKB as u16 (saturated): {}", config.unsigned_short_for("MaxUploadKB"));
    println!("MaxUploadKB as i32: {}", config.int_for("MaxUploadKB"));
    println!("Price as decimal: {}", config.decimal_for("Price"));

    println!("\n--- Example 2: Flags ---");
    println!("AllowCamera: {}", config.bool_for("AllowCamera"));
    println!("RequirePasscode: {}", config.bool_for("RequirePasscode"));

    println!("\n--- Example 3: Collections ---");
    if let Some(apps) = config.ordered_set_for("AllowedApps") {
        let names: Vec<&str> = apps.iter().filter_map(RawValue::as_text).collect();
        println!("AllowedApps (deduplicated): {:?}", names);
    }
    if let Some(proxy) = config.dictionary_for("Proxy") {
        let proxy = ConfigAccessor::new(MemoryStore::from(proxy));
        println!(
            "Proxy: {}:{}",
            proxy.string_for("Host"),
            proxy.unsigned_short_for("Port")
        );
    }

    println!("\n--- Example 4: URLs, data and dates ---");
    if let Some(mut parts) = config.url_components_for("EnrollmentURL") {
        println!("Enrollment host: {:?}, port: {:?}", parts.host, parts.port);
        parts.host = Some("staging.example.com".to_string());
        if let Ok(staging) = parts.to_url() {
            println!("Staging URL: {}", staging);
        }
    }
    println!(
        "Certificate bytes: {}",
        config.data_for("Certificate").map_or(0, |d| d.len())
    );
    println!("Expires: {:?}", config.date_for("Expires"));

    println!("\n--- Example 5: Defaults ---");
    println!("Missing string: {:?}", config.string_for("Missing"));
    println!("Missing int: {}", config.int_for("Missing"));
    println!("Missing array: {:?}", config.array_for("Missing"));
    println!("AllowCamera read as int: {}", config.int_for("AllowCamera"));
    println!("Is 'Missing' present? {}", config.contains_key("Missing"));

    println!("\n=== Example Complete ===");
    Ok(())
}
