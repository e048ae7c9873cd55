// SPDX-License-Identifier: MIT OR Apache-2.0

//! Coercion rules from [`RawValue`] to typed results.
//!
//! Every rule is an `as_*` method on [`RawValue`] that takes the key being read (for
//! error context) and returns `Result<T>`. The rules are split by family:
//!
//! - [`numeric`]: booleans, the saturating integer family, floats, decimals, numbers
//! - [`text`]: strings, attributed strings, URLs and URL components
//! - [`collection`]: bytes, timestamps, mappings, sequences, sets and ordered sets
//!
//! A stored [`RawValue::Null`] is reported as [`ConfigError::KeyAbsent`], so absence
//! and explicit null fall back identically.

pub mod collection;
pub mod numeric;
pub mod text;

pub use numeric::SaturatingInt;

use crate::domain::{ConfigError, RawValue};

/// Builds the error for a value that cannot become `expected`.
pub(crate) fn reject(key: &str, expected: &'static str, raw: &RawValue) -> ConfigError {
    match raw {
        RawValue::Null => ConfigError::KeyAbsent {
            key: key.to_string(),
        },
        other => ConfigError::mismatch(key, expected, other.kind()),
    }
}
