// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text coercions: strings, attributed strings and URLs.
//!
//! Only [`RawValue::String`] sources are accepted. Numbers are not stringified.

use super::reject;
use crate::domain::{AttributedString, ConfigError, RawValue, Result, UrlComponents};
use url::Url;

impl RawValue {
    /// Copies the string value.
    pub fn as_string(&self, key: &str) -> Result<String> {
        match self {
            RawValue::String(s) => Ok(s.clone()),
            other => Err(reject(key, "string", other)),
        }
    }

    /// Wraps the string value in an [`AttributedString`] with no attributes.
    pub fn as_attributed_string(&self, key: &str) -> Result<AttributedString> {
        match self {
            RawValue::String(s) => Ok(AttributedString::plain(s.as_str())),
            other => Err(reject(key, "attributed string", other)),
        }
    }

    /// Parses the string value as an absolute URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdmcfg::domain::RawValue;
    ///
    /// let url = RawValue::from("https://example.com/a").as_url("k").unwrap();
    /// assert_eq!(url.scheme(), "https");
    /// assert_eq!(url.host_str(), Some("example.com"));
    ///
    /// assert!(RawValue::from("not a url").as_url("k").is_err());
    /// ```
    pub fn as_url(&self, key: &str) -> Result<Url> {
        match self {
            RawValue::String(s) => {
                Url::parse(s).map_err(|e| ConfigError::parse_failure(key, "url", e))
            }
            other => Err(reject(key, "url", other)),
        }
    }

    /// Parses the string value as an absolute URL and decomposes it.
    pub fn as_url_components(&self, key: &str) -> Result<UrlComponents> {
        match self {
            RawValue::String(s) => UrlComponents::parse(s)
                .map_err(|e| ConfigError::parse_failure(key, "url components", e)),
            other => Err(reject(key, "url components", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValueKind;

    #[test]
    fn test_as_string() {
        assert_eq!(RawValue::from("hello").as_string("k").unwrap(), "hello");
        assert_eq!(RawValue::from("  spaces  ").as_string("k").unwrap(), "  spaces  ");
        assert_eq!(RawValue::from("").as_string("k").unwrap(), "");
    }

    #[test]
    fn test_as_string_does_not_stringify() {
        let err = RawValue::from(42).as_string("k").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TypeMismatch {
                found: ValueKind::Integer,
                ..
            }
        ));
        assert!(RawValue::Null.as_string("k").unwrap_err().is_key_absent());
    }

    #[test]
    fn test_as_attributed_string() {
        let s = RawValue::from("Welcome").as_attributed_string("k").unwrap();
        assert_eq!(s.text(), "Welcome");
        assert!(!s.has_attributes());
        assert!(RawValue::from(true).as_attributed_string("k").is_err());
    }

    #[test]
    fn test_as_url() {
        let url = RawValue::from("https://example.com/a").as_url("k").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.path(), "/a");
    }

    #[test]
    fn test_as_url_parse_failure() {
        for input in ["not a url", "", "example.com/no-scheme", "http://[bad"] {
            let err = RawValue::from(input).as_url("k").unwrap_err();
            assert!(
                matches!(err, ConfigError::ParseFailure { target_type: "url", .. }),
                "Accepted {:?}",
                input
            );
        }
        assert!(RawValue::mapping([("url", "https://x.test")]).as_url("k").is_err());
    }

    #[test]
    fn test_as_url_components() {
        let parts = RawValue::from("https://example.com:8443/enroll?id=7")
            .as_url_components("k")
            .unwrap();
        assert_eq!(parts.host.as_deref(), Some("example.com"));
        assert_eq!(parts.port, Some(8443));
        assert_eq!(parts.query.as_deref(), Some("id=7"));
        assert!(RawValue::from("not a url").as_url_components("k").is_err());
    }
}
