// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for integration tests.

use mdmcfg::adapters::MemoryStore;
use mdmcfg::domain::RawValue;
use std::io::Write;
use tempfile::NamedTempFile;

/// A payload shaped like a typical device management profile.
#[allow(dead_code)]
pub fn managed_store() -> MemoryStore {
    MemoryStore::named("profile")
        .with_value("EnrollmentURL", "https://mdm.example.com/enroll")
        .with_value("CheckInterval", "900")
        .with_value("MaxRetries", 5)
        .with_value("AllowCamera", "NO")
        .with_value("RequirePasscode", true)
        .with_value("Price", "19.99")
        .with_value("Greeting", "hello")
        .with_value("Tags", RawValue::sequence([1, 2, 2, 3]))
        .with_value(
            "Proxy",
            RawValue::mapping([("Host", "proxy.example.com"), ("Port", "8080")]),
        )
        .with_value("Retired", RawValue::Null)
}

/// Writes `content` to a temp file whose name ends with `suffix`.
#[allow(dead_code)]
pub fn temp_payload(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

/// Installs a test subscriber so `debug!`/`trace!` fallback paths run with logging on.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
