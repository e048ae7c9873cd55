// SPDX-License-Identifier: MIT OR Apache-2.0

//! The untyped value model handed out by configuration stores.
//!
//! A [`RawValue`] is everything a managed payload can contain. Stores and parsers
//! produce them; the coercion methods in [`crate::domain::coercion`] turn them into
//! typed results.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A materialized payload: every key a store holds, with its raw value.
pub type Payload = BTreeMap<String, RawValue>;

/// An untyped configuration value.
///
/// Equality is structural. Floats compare by bit pattern after folding `-0.0` into
/// `0.0` and every NaN into a single NaN, which makes `Eq` and `Hash` total so raw
/// values can live in hash sets.
///
/// # Examples
///
/// ```
/// use mdmcfg::domain::RawValue;
///
/// let value = RawValue::sequence([1, 2, 2, 3]);
/// assert_eq!(value.kind().to_string(), "sequence");
/// assert_eq!(RawValue::from(f64::NAN), RawValue::from(f64::NAN));
/// ```
#[derive(Clone, Debug, Default)]
pub enum RawValue {
    /// Explicit null marker.
    #[default]
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar, wide enough for every signed and unsigned 64-bit value.
    Integer(i128),
    /// Double precision float scalar.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Opaque byte buffer.
    Bytes(Vec<u8>),
    /// A point in time, tagged as such by the store.
    Timestamp(DateTime<Utc>),
    /// Ordered, heterogeneous sequence.
    Sequence(Vec<RawValue>),
    /// Nested mapping with string keys.
    Mapping(BTreeMap<String, RawValue>),
}

/// The variant tag of a [`RawValue`], used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`RawValue::Null`]
    Null,
    /// [`RawValue::Bool`]
    Bool,
    /// [`RawValue::Integer`]
    Integer,
    /// [`RawValue::Float`]
    Float,
    /// [`RawValue::String`]
    String,
    /// [`RawValue::Bytes`]
    Bytes,
    /// [`RawValue::Timestamp`]
    Timestamp,
    /// [`RawValue::Sequence`]
    Sequence,
    /// [`RawValue::Mapping`]
    Mapping,
}

impl ValueKind {
    /// Returns the lowercase name of the variant.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Bytes => "bytes",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A boxed number, as returned by `number_for`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    /// An integral number.
    Integer(i128),
    /// A floating point number.
    Float(f64),
}

impl Number {
    /// Returns the number as an `f64`, rounding wide integers.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// Returns `true` if the number is integral.
    pub fn is_integer(self) -> bool {
        matches!(self, Number::Integer(_))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}

impl RawValue {
    /// Builds a [`RawValue::Sequence`] from anything convertible to raw values.
    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RawValue>,
    {
        RawValue::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Builds a [`RawValue::Mapping`] from key/value pairs.
    pub fn mapping<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RawValue>,
    {
        RawValue::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns the variant tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            RawValue::Null => ValueKind::Null,
            RawValue::Bool(_) => ValueKind::Bool,
            RawValue::Integer(_) => ValueKind::Integer,
            RawValue::Float(_) => ValueKind::Float,
            RawValue::String(_) => ValueKind::String,
            RawValue::Bytes(_) => ValueKind::Bytes,
            RawValue::Timestamp(_) => ValueKind::Timestamp,
            RawValue::Sequence(_) => ValueKind::Sequence,
            RawValue::Mapping(_) => ValueKind::Mapping,
        }
    }

    /// Returns `true` for [`RawValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Borrows the string content, if this is a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Folds signed zeros and NaN payloads so equal-looking floats compare equal.
fn canonical_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

impl PartialEq for RawValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RawValue::Null, RawValue::Null) => true,
            (RawValue::Bool(a), RawValue::Bool(b)) => a == b,
            (RawValue::Integer(a), RawValue::Integer(b)) => a == b,
            (RawValue::Float(a), RawValue::Float(b)) => canonical_bits(*a) == canonical_bits(*b),
            (RawValue::String(a), RawValue::String(b)) => a == b,
            (RawValue::Bytes(a), RawValue::Bytes(b)) => a == b,
            (RawValue::Timestamp(a), RawValue::Timestamp(b)) => a == b,
            (RawValue::Sequence(a), RawValue::Sequence(b)) => a == b,
            (RawValue::Mapping(a), RawValue::Mapping(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for RawValue {}

impl Hash for RawValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            RawValue::Null => {}
            RawValue::Bool(b) => b.hash(state),
            RawValue::Integer(i) => i.hash(state),
            RawValue::Float(f) => canonical_bits(*f).hash(state),
            RawValue::String(s) => s.hash(state),
            RawValue::Bytes(b) => b.hash(state),
            RawValue::Timestamp(t) => t.hash(state),
            RawValue::Sequence(items) => items.hash(state),
            RawValue::Mapping(map) => map.hash(state),
        }
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            RawValue::Null => serializer.serialize_unit(),
            RawValue::Bool(b) => serializer.serialize_bool(*b),
            RawValue::Integer(i) => {
                if let Ok(v) = i64::try_from(*i) {
                    serializer.serialize_i64(v)
                } else if let Ok(v) = u64::try_from(*i) {
                    serializer.serialize_u64(v)
                } else {
                    serializer.serialize_i128(*i)
                }
            }
            RawValue::Float(f) => serializer.serialize_f64(*f),
            RawValue::String(s) => serializer.serialize_str(s),
            RawValue::Bytes(b) => serializer.serialize_str(&BASE64.encode(b)),
            RawValue::Timestamp(t) => serializer.serialize_str(&t.to_rfc3339()),
            RawValue::Sequence(items) => serializer.collect_seq(items),
            RawValue::Mapping(map) => serializer.collect_map(map),
        }
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RawValue {
                fn from(v: $t) -> Self {
                    RawValue::Integer(v as i128)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<f32> for RawValue {
    fn from(v: f32) -> Self {
        RawValue::Float(f64::from(v))
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::String(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::String(s)
    }
}

impl From<DateTime<Utc>> for RawValue {
    fn from(t: DateTime<Utc>) -> Self {
        RawValue::Timestamp(t)
    }
}

impl From<Vec<RawValue>> for RawValue {
    fn from(items: Vec<RawValue>) -> Self {
        RawValue::Sequence(items)
    }
}

impl From<BTreeMap<String, RawValue>> for RawValue {
    fn from(map: BTreeMap<String, RawValue>) -> Self {
        RawValue::Mapping(map)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Null, Into::into)
    }
}
