// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON payload parser.
//!
//! JSON has no byte or date types, so a JSON payload only yields the null, bool,
//! number, string, sequence and mapping variants.

use crate::domain::{ConfigError, Payload, RawValue, Result};
use crate::ports::PayloadParser;
use serde_json::Value;

/// JSON parser implementation.
///
/// # Examples
///
/// ```rust
/// use mdmcfg::adapters::JsonParser;
/// use mdmcfg::domain::RawValue;
/// use mdmcfg::ports::PayloadParser;
///
/// let payload = JsonParser::new()
///     .parse(r#"{"Port": 8443, "Strict": true}"#)
///     .unwrap();
/// assert_eq!(payload.get("Strict"), Some(&RawValue::from(true)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl JsonParser {
    /// Creates a new JSON parser.
    pub fn new() -> Self {
        JsonParser
    }

    fn convert(value: Value) -> RawValue {
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RawValue::Integer(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    RawValue::Integer(i128::from(u))
                } else {
                    RawValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => RawValue::String(s),
            Value::Array(items) => {
                RawValue::Sequence(items.into_iter().map(Self::convert).collect())
            }
            Value::Object(map) => RawValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, Self::convert(v)))
                    .collect(),
            ),
        }
    }
}

impl PayloadParser for JsonParser {
    fn parse(&self, content: &str) -> Result<Payload> {
        let value: Value = serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse JSON: {}", e),
            source: Some(Box::new(e)),
        })?;

        match Self::convert(value) {
            RawValue::Mapping(map) => Ok(map),
            other => Err(ConfigError::ParseError {
                message: format!(
                    "JSON payload must be an object at the top level, found {}",
                    other.kind()
                ),
                source: None,
            }),
        }
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}
