// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing the value model and the coercion engine.
//!
//! Nothing in here performs I/O. Stores hand [`RawValue`]s in; the coercion rules
//! and the default table decide what a typed read returns.

pub mod attributed_string;
pub mod coercion;
pub mod config_key;
pub mod defaults;
pub mod errors;
pub mod raw_value;
pub mod url_components;

// Re-export commonly used types
pub use attributed_string::{AttributeRun, AttributedString};
pub use coercion::SaturatingInt;
pub use config_key::ConfigKey;
pub use defaults::{Fallback, TargetType, CHAR_ZERO};
pub use errors::{ConfigError, Result};
pub use raw_value::{Number, Payload, RawValue, ValueKind};
pub use url_components::UrlComponents;
