// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed, total accessors over a managed configuration payload.
//!
//! Device management systems hand applications a loosely typed key/value payload:
//! a number may arrive as a string, a flag as `"YES"`, a list where a single value
//! was expected. This crate reads such a payload through [`ConfigAccessor`], whose
//! `<type>_for(key)` methods always return a value of the requested type. When the
//! key is absent or the stored value cannot be converted, the type's default is
//! returned instead (`false`, `0`, `'0'` for the char types, `""` or `None`) and
//! the reason is logged.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: the value model ([`RawValue`]), the coercion rules (`as_*`
//!   methods on `RawValue`), the default table ([`TargetType`]) and errors
//! - **Ports**: [`RawStore`], the only thing the accessor reads from, plus the
//!   parser and watcher seams used to load and refresh payload files
//! - **Adapters**: stores backed by memory, the environment, payload files and a
//!   shared snapshot that can be republished while readers are active
//! - **Service**: [`ConfigAccessor`] itself
//!
//! # Coercion at a glance
//!
//! - Integers saturate at the bounds of the requested width instead of wrapping
//! - Floats truncate toward zero when an integer is requested
//! - Numeric strings are parsed after trimming; other strings read as `0`
//! - Strings are never produced from numbers
//! - Sets and ordered sets are built from sequences only
//! - A stored null behaves exactly like an absent key
//!
//! # Feature Flags
//!
//! - `yaml`: YAML payload files (default)
//! - `json`: JSON payload files (default)
//! - `env`: environment variable store (default)
//! - `reload`: file watching and `SharedStore::follow_file`
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use mdmcfg::prelude::*;
//!
//! let store = MemoryStore::new()
//!     .with_value("EnrollmentURL", "https://mdm.example.com/enroll")
//!     .with_value("CheckInterval", "900")
//!     .with_value("AllowedApps", RawValue::sequence(["mail", "maps", "mail"]));
//! let config = ConfigAccessor::new(store);
//!
//! assert_eq!(config.unsigned_int_for("CheckInterval"), 900);
//! assert_eq!(config.ordered_set_for("AllowedApps").map(|s| s.len()), Some(2));
//! assert!(!config.bool_for("Missing"));
//! ```
//!
//! # Loading a payload file
//!
//! ```rust,no_run
//! use mdmcfg::prelude::*;
//!
//! # fn main() -> mdmcfg::domain::Result<()> {
//! let config = ConfigAccessor::new(FileStore::from_file("/etc/mdm/managed.yaml")?);
//! let tenant = config.string_for("Tenant");
//! # Ok(())
//! # }
//! ```
//!
//! [`ConfigAccessor`]: crate::service::ConfigAccessor
//! [`RawValue`]: crate::domain::RawValue
//! [`TargetType`]: crate::domain::TargetType
//! [`RawStore`]: crate::ports::RawStore

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        AttributedString, ConfigError, ConfigKey, Number, Payload, RawValue, Result, TargetType,
        UrlComponents,
    };
    pub use crate::ports::{ConfigWatcher, PayloadParser, RawStore};
    pub use crate::service::ConfigAccessor;

    pub use crate::adapters::{MemoryStore, SharedStore};

    // Re-export adapters based on feature flags
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvVarStore;
    #[cfg(any(feature = "yaml", feature = "json"))]
    pub use crate::adapters::FileStore;
    #[cfg(feature = "reload")]
    pub use crate::adapters::FileWatcher;
    #[cfg(feature = "json")]
    pub use crate::adapters::JsonParser;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlParser;
}
