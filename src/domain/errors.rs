// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! The typed accessors never surface these errors: they resolve every failure to the
//! target type's default. The coercion methods on [`RawValue`](crate::domain::RawValue)
//! and the adapter constructors return them so callers (and logs) can see why a
//! value fell back. All errors use `thiserror`.

use crate::domain::raw_value::ValueKind;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// Marked `#[non_exhaustive]` to allow for future additions without breaking
/// backwards compatibility.
///
/// # Examples
///
/// ```
/// use mdmcfg::domain::errors::ConfigError;
///
/// fn lookup() -> Result<String, ConfigError> {
///     Err(ConfigError::KeyAbsent {
///         key: "server.url".to_string(),
///     })
/// }
///
/// assert!(lookup().unwrap_err().is_key_absent());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The requested key is not present in the store, or is stored as null.
    #[error("Configuration key not found: {key}")]
    KeyAbsent {
        /// The key that was not found
        key: String,
    },

    /// The stored variant cannot be converted to the requested type.
    #[error("Configuration value for key '{key}' is {found}, expected {expected}")]
    TypeMismatch {
        /// The key being converted
        key: String,
        /// The requested target type name
        expected: &'static str,
        /// The variant that was actually stored
        found: ValueKind,
    },

    /// A textual value failed to parse as the requested structured type.
    #[error("Failed to parse configuration value for key '{key}' as {target_type}: {source}")]
    ParseFailure {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: &'static str,
        /// The underlying parse error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An error occurred in a configuration store.
    #[error("Configuration store '{store_name}' error: {message}")]
    SourceError {
        /// The name of the store that encountered the error
        store_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse a payload document.
    #[error("Failed to parse configuration payload: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error occurred in a configuration watcher.
    #[error("Configuration watcher error: {message}")]
    WatcherError {
        /// The error message
        message: String,
        /// The underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a `TypeMismatch` error.
    pub fn mismatch(key: &str, expected: &'static str, found: ValueKind) -> Self {
        ConfigError::TypeMismatch {
            key: key.to_string(),
            expected,
            found,
        }
    }

    /// Creates a `ParseFailure` error from any parse error.
    pub fn parse_failure<E>(key: &str, target_type: &'static str, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ConfigError::ParseFailure {
            key: key.to_string(),
            target_type,
            source: Box::new(err),
        }
    }

    /// Returns `true` if this error reports a missing key.
    pub fn is_key_absent(&self) -> bool {
        matches!(self, ConfigError::KeyAbsent { .. })
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
