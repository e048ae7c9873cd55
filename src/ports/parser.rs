// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payload parser trait definition.
//!
//! This module defines the `PayloadParser` trait, which turns a payload document
//! (YAML, JSON, etc.) into a [`Payload`] that a store can serve.

use crate::domain::{Payload, Result};

/// A trait for parsing payload documents.
///
/// The top level of a document must be a mapping; its entries become the payload's
/// keys. Nested mappings and sequences are kept as [`RawValue`](crate::domain::RawValue)
/// trees, not flattened, because accessors such as `dictionary_for` and `array_for`
/// read them whole.
///
/// # Examples
///
/// ```rust
/// use mdmcfg::ports::PayloadParser;
/// use mdmcfg::domain::{Payload, RawValue, Result};
///
/// struct LineParser;
///
/// impl PayloadParser for LineParser {
///     fn parse(&self, content: &str) -> Result<Payload> {
///         Ok(content
///             .lines()
///             .filter_map(|line| line.split_once('='))
///             .map(|(k, v)| (k.to_string(), RawValue::from(v)))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["properties"]
///     }
/// }
///
/// let payload = LineParser.parse("Tenant=example").unwrap();
/// assert_eq!(payload.get("Tenant"), Some(&RawValue::from("example")));
/// ```
pub trait PayloadParser: Send + Sync {
    /// Parses document content into a payload.
    ///
    /// # Returns
    ///
    /// * `Ok(Payload)` - The top-level entries of the document
    /// * `Err(ConfigError::ParseError)` - The document is malformed or its top level
    ///   is not a mapping
    fn parse(&self, content: &str) -> Result<Payload>;

    /// Returns the file extensions (without the leading dot) handled by this parser.
    fn supported_extensions(&self) -> &[&str];

    /// Returns `true` if `extension` is handled by this parser, ignoring ASCII case.
    fn supports(&self, extension: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawValue;

    // Test implementation of PayloadParser for testing purposes
    struct TestParser;

    impl PayloadParser for TestParser {
        fn parse(&self, _content: &str) -> Result<Payload> {
            let mut payload = Payload::new();
            payload.insert("Tenant".to_string(), RawValue::from("example"));
            payload.insert(
                "Servers".to_string(),
                RawValue::sequence(["a.example", "b.example"]),
            );
            Ok(payload)
        }

        fn supported_extensions(&self) -> &[&str] {
            &["test", "tst"]
        }
    }

    #[test]
    fn test_parser_parse_keeps_nested_values() {
        let payload = TestParser.parse("dummy content").unwrap();
        assert_eq!(payload.len(), 2);
        assert!(matches!(payload.get("Servers"), Some(RawValue::Sequence(items)) if items.len() == 2));
    }

    #[test]
    fn test_parser_supported_extensions() {
        let extensions = TestParser.supported_extensions();
        assert_eq!(extensions, &["test", "tst"]);
    }

    #[test]
    fn test_parser_supports_ignores_case() {
        assert!(TestParser.supports("TST"));
        assert!(TestParser.supports("test"));
        assert!(!TestParser.supports("yaml"));
    }
}
