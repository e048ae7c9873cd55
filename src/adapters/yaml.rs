// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML payload parser.
//!
//! Converts a YAML document into a [`Payload`]. Two tags extend the plain YAML
//! scalar set so a document can carry every [`RawValue`] variant:
//!
//! - `!binary` on a base64 string produces [`RawValue::Bytes`]
//! - `!timestamp` on an RFC 3339 string produces [`RawValue::Timestamp`]
//!
//! Any other tag is ignored and its inner value kept.

use crate::domain::{ConfigError, Payload, RawValue, Result};
use crate::ports::PayloadParser;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde_yaml::value::TaggedValue;
use serde_yaml::Value;
use std::collections::BTreeMap;

/// YAML parser implementation.
///
/// # Examples
///
/// ```rust
/// use mdmcfg::adapters::YamlParser;
/// use mdmcfg::domain::RawValue;
/// use mdmcfg::ports::PayloadParser;
///
/// let parser = YamlParser::new();
/// let yaml = "ServerURL: https://mdm.example\nPort: 8443\nServers: [a, b]";
/// let payload = parser.parse(yaml).unwrap();
///
/// assert_eq!(payload.get("Port"), Some(&RawValue::from(8443)));
/// assert!(matches!(payload.get("Servers"), Some(RawValue::Sequence(_))));
/// ```
#[derive(Debug, Clone)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    /// Converts a YAML value into a raw value, recursing into collections.
    fn convert(value: Value) -> Result<RawValue> {
        Ok(match value {
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
            Value::Sequence(items) => RawValue::Sequence(
                items
                    .into_iter()
                    .map(Self::convert)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Mapping(map) => RawValue::Mapping(Self::convert_mapping(map)?),
            Value::Tagged(tagged) => Self::convert_tagged(*tagged)?,
        })
    }

    /// Converts a mapping, skipping entries whose key is not a string.
    fn convert_mapping(map: serde_yaml::Mapping) -> Result<BTreeMap<String, RawValue>> {
        let mut result = BTreeMap::new();
        for (key, val) in map {
            match key {
                Value::String(key) => {
                    result.insert(key, Self::convert(val)?);
                }
                other => {
                    tracing::debug!("Skipping non-string YAML mapping key: {:?}", other);
                }
            }
        }
        Ok(result)
    }

    fn convert_tagged(tagged: TaggedValue) -> Result<RawValue> {
        let TaggedValue { tag, value } = tagged;

        if tag == "binary" {
            let text = Self::tagged_text(&value, "binary")?;
            let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            let bytes = BASE64
                .decode(compact.as_bytes())
                .map_err(|e| ConfigError::ParseError {
                    message: format!("Invalid base64 in !binary value: {}", e),
                    source: Some(Box::new(e)),
                })?;
            return Ok(RawValue::Bytes(bytes));
        }

        if tag == "timestamp" {
            let text = Self::tagged_text(&value, "timestamp")?;
            let parsed = DateTime::parse_from_rfc3339(text.trim()).map_err(|e| {
                ConfigError::ParseError {
                    message: format!("Invalid RFC 3339 date in !timestamp value: {}", e),
                    source: Some(Box::new(e)),
                }
            })?;
            return Ok(RawValue::Timestamp(parsed.with_timezone(&Utc)));
        }

        tracing::debug!("Ignoring unknown YAML tag {}", tag);
        Self::convert(value)
    }

    fn tagged_text<'a>(value: &'a Value, tag: &str) -> Result<&'a str> {
        value.as_str().ok_or_else(|| ConfigError::ParseError {
            message: format!("!{} must tag a string", tag),
            source: None,
        })
    }
}

impl Default for YamlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadParser for YamlParser {
    fn parse(&self, content: &str) -> Result<Payload> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse YAML: {}", e),
            source: Some(Box::new(e)),
        })?;

        match value {
            // An empty document is an empty payload
            Value::Null => Ok(Payload::new()),
            Value::Mapping(map) => Self::convert_mapping(map),
            other => Err(ConfigError::ParseError {
                message: format!(
                    "YAML payload must be a mapping at the top level, found {}",
                    Self::describe(&other)
                ),
                source: None,
            }),
        }
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

impl YamlParser {
    fn describe(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Sequence(_) => "a sequence",
            Value::Mapping(_) => "a mapping",
            Value::Tagged(_) => "a tagged value",
        }
    }
}
