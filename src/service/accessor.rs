// SPDX-License-Identifier: MIT OR Apache-2.0

//! The typed, total accessor over a [`RawStore`].
//!
//! Every `<type>_for` method looks a key up in the store, coerces the raw value to
//! the requested type and, on any failure, returns that type's default. Failures are
//! logged at `debug` with the key, the target type and the reason; saturation of an
//! out-of-range integer is not a failure and is logged at `trace` by the coercer.

use crate::domain::{
    AttributedString, ConfigError, ConfigKey, Number, Payload, RawValue, Result, TargetType,
    UrlComponents, CHAR_ZERO,
};
use crate::ports::RawStore;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use std::collections::{BTreeMap, HashSet};
use url::Url;

/// Generates the integer accessors, which differ only in width, target tag and default.
macro_rules! integer_accessors {
    ($($(#[$meta:meta])* $name:ident => $t:ty, $target:ident = $default:expr;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&self, key: &str) -> $t {
                self.value_or(key, TargetType::$target, $default, RawValue::as_integer::<$t>)
            }
        )*
    };
}

/// Typed read access to a configuration payload.
///
/// The accessor never mutates or caches the store: each call performs one fresh
/// lookup, so a store that publishes new snapshots is observed on the next call.
/// None of the `<type>_for` methods can fail or panic.
///
/// # Examples
///
/// ```rust
/// use mdmcfg::prelude::*;
///
/// let store = MemoryStore::new()
///     .with_value("ServerURL", "https://mdm.example/enroll")
///     .with_value("MaxRetries", "5")
///     .with_value("AllowCamera", "NO");
/// let config = ConfigAccessor::new(store);
///
/// assert_eq!(config.int_for("MaxRetries"), 5);
/// assert!(!config.bool_for("AllowCamera"));
/// assert_eq!(config.url_for("ServerURL").unwrap().host_str(), Some("mdm.example"));
///
/// // Absent keys fall back to the type's default
/// assert_eq!(config.string_for("Missing"), "");
/// assert_eq!(config.array_for("Missing"), None);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigAccessor<S> {
    store: S,
}

impl<S: RawStore> ConfigAccessor<S> {
    /// Creates an accessor over `store`.
    ///
    /// Pass a reference or an `Arc` to share one store between accessors.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the accessor and returns the store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Looks `key` up and applies `coerce`. A missing key is `KeyAbsent`.
    fn resolve<T>(&self, key: &str, coerce: impl FnOnce(&RawValue, &str) -> Result<T>) -> Result<T> {
        match self.store.get_str(key) {
            Some(raw) => coerce(&raw, key),
            None => Err(ConfigError::KeyAbsent {
                key: key.to_string(),
            }),
        }
    }

    fn log_fallback(&self, key: &str, target: TargetType, err: &ConfigError) {
        tracing::debug!(
            "Using {} default ({}) for key '{}' from store '{}': {}",
            target,
            target.fallback(),
            key,
            self.store.name(),
            err
        );
    }

    /// Resolves a value type, returning `default` on failure.
    fn value_or<T>(
        &self,
        key: &str,
        target: TargetType,
        default: T,
        coerce: impl FnOnce(&RawValue, &str) -> Result<T>,
    ) -> T {
        self.resolve(key, coerce).unwrap_or_else(|err| {
            self.log_fallback(key, target, &err);
            default
        })
    }

    /// Resolves an object type, returning `None` on failure.
    fn object_or<T>(
        &self,
        key: &str,
        target: TargetType,
        coerce: impl FnOnce(&RawValue, &str) -> Result<T>,
    ) -> Option<T> {
        match self.resolve(key, coerce) {
            Ok(value) => Some(value),
            Err(err) => {
                self.log_fallback(key, target, &err);
                None
            }
        }
    }

    /// Reads a boolean.
    ///
    /// Accepts booleans, numbers (nonzero is `true`) and the strings `true`/`yes`/`1`
    /// and `false`/`no`/`0` in any case. Any other string reads as `false`.
    pub fn bool_for(&self, key: &str) -> bool {
        self.value_or(key, TargetType::Bool, false, RawValue::as_bool)
    }

    integer_accessors! {
        /// Reads a signed 8-bit integer, saturating at its bounds.
        ///
        /// Falls back to the character `'0'` (48), not NUL.
        char_for => i8, Char = CHAR_ZERO as i8;
        /// Reads an unsigned 8-bit integer, saturating at its bounds.
        ///
        /// Falls back to the character `'0'` (48), not NUL.
        unsigned_char_for => u8, UnsignedChar = CHAR_ZERO;
        /// Reads a signed 16-bit integer, saturating at its bounds.
        short_for => i16, Short = 0;
        /// Reads an unsigned 16-bit integer, saturating at its bounds.
        unsigned_short_for => u16, UnsignedShort = 0;
        /// Reads a signed 32-bit integer, saturating at its bounds.
        ///
        /// Floats truncate toward zero and numeric strings are parsed after trimming.
        ///
        /// ```rust
        /// use mdmcfg::prelude::*;
        ///
        /// let config = ConfigAccessor::new(
        ///     MemoryStore::new()
        ///         .with_value("Huge", 1_i64 << 40)
        ///         .with_value("Ratio", -2.9)
        ///         .with_value("Text", " 42 "),
        /// );
        /// assert_eq!(config.int_for("Huge"), i32::MAX);
        /// assert_eq!(config.int_for("Ratio"), -2);
        /// assert_eq!(config.int_for("Text"), 42);
        /// ```
        int_for => i32, Int = 0;
        /// Reads an unsigned 32-bit integer, saturating at its bounds.
        unsigned_int_for => u32, UnsignedInt = 0;
        /// Reads a signed 64-bit integer, saturating at its bounds.
        long_for => i64, Long = 0;
        /// Reads an unsigned 64-bit integer, saturating at its bounds.
        unsigned_long_for => u64, UnsignedLong = 0;
        /// Reads a signed 64-bit integer, saturating at its bounds.
        long_long_for => i64, LongLong = 0;
        /// Reads an unsigned 64-bit integer, saturating at its bounds.
        unsigned_long_long_for => u64, UnsignedLongLong = 0;
        /// Reads a pointer-width signed integer, saturating at its bounds.
        integer_for => isize, Integer = 0;
        /// Reads a pointer-width unsigned integer, saturating at its bounds.
        unsigned_integer_for => usize, UnsignedInteger = 0;
    }

    /// Reads a single-precision float. Values beyond `f32` range become infinite.
    pub fn float_for(&self, key: &str) -> f32 {
        self.value_or(key, TargetType::Float, 0.0, RawValue::as_f32)
    }

    /// Reads a double-precision float.
    pub fn double_for(&self, key: &str) -> f64 {
        self.value_or(key, TargetType::Double, 0.0, RawValue::as_f64)
    }

    /// Reads an exact decimal.
    ///
    /// Strings are parsed as base-10 decimals without going through binary floating
    /// point, so `"19.99"` is exactly 19.99.
    pub fn decimal_for(&self, key: &str) -> BigDecimal {
        self.value_or(
            key,
            TargetType::Decimal,
            BigDecimal::from(0_i64),
            RawValue::as_decimal,
        )
    }

    /// Reads an exact decimal. Same rules as [`decimal_for`](Self::decimal_for).
    pub fn decimal_number_for(&self, key: &str) -> BigDecimal {
        self.value_or(
            key,
            TargetType::DecimalNumber,
            BigDecimal::from(0_i64),
            RawValue::as_decimal,
        )
    }

    /// Reads a stored number without converting it. Booleans read as 0 or 1.
    pub fn number_for(&self, key: &str) -> Option<Number> {
        self.object_or(key, TargetType::Number, RawValue::as_number)
    }

    /// Reads a string. Numbers are not stringified.
    pub fn string_for(&self, key: &str) -> String {
        self.value_or(key, TargetType::String, String::new(), RawValue::as_string)
    }

    /// Reads a string for the caller to modify.
    pub fn mutable_string_for(&self, key: &str) -> String {
        self.value_or(
            key,
            TargetType::MutableString,
            String::new(),
            RawValue::as_string,
        )
    }

    /// Reads a string as an attributed string with no attributes.
    pub fn attributed_string_for(&self, key: &str) -> AttributedString {
        self.value_or(
            key,
            TargetType::AttributedString,
            AttributedString::default(),
            RawValue::as_attributed_string,
        )
    }

    /// Reads a string as an attributed string for the caller to decorate.
    pub fn mutable_attributed_string_for(&self, key: &str) -> AttributedString {
        self.value_or(
            key,
            TargetType::MutableAttributedString,
            AttributedString::default(),
            RawValue::as_attributed_string,
        )
    }

    /// Reads a byte buffer.
    pub fn data_for(&self, key: &str) -> Option<Vec<u8>> {
        self.object_or(key, TargetType::Data, RawValue::as_bytes)
    }

    /// Reads a byte buffer for the caller to modify.
    pub fn mutable_data_for(&self, key: &str) -> Option<Vec<u8>> {
        self.object_or(key, TargetType::MutableData, RawValue::as_bytes)
    }

    /// Reads a timestamp. Date-like strings are not parsed.
    pub fn date_for(&self, key: &str) -> Option<DateTime<Utc>> {
        self.object_or(key, TargetType::Date, RawValue::as_timestamp)
    }

    /// Reads a nested mapping.
    pub fn dictionary_for(&self, key: &str) -> Option<BTreeMap<String, RawValue>> {
        self.object_or(key, TargetType::Dictionary, RawValue::as_mapping)
    }

    /// Reads a nested mapping for the caller to modify.
    pub fn mutable_dictionary_for(&self, key: &str) -> Option<BTreeMap<String, RawValue>> {
        self.object_or(key, TargetType::MutableDictionary, RawValue::as_mapping)
    }

    /// Reads a sequence.
    pub fn array_for(&self, key: &str) -> Option<Vec<RawValue>> {
        self.object_or(key, TargetType::Array, RawValue::as_sequence)
    }

    /// Reads a sequence for the caller to modify.
    pub fn mutable_array_for(&self, key: &str) -> Option<Vec<RawValue>> {
        self.object_or(key, TargetType::MutableArray, RawValue::as_sequence)
    }

    /// Reads a sequence as a set. A scalar is not wrapped into a one-element set.
    pub fn set_for(&self, key: &str) -> Option<HashSet<RawValue>> {
        self.object_or(key, TargetType::Set, RawValue::as_set)
    }

    /// Reads a sequence as a set for the caller to modify.
    pub fn mutable_set_for(&self, key: &str) -> Option<HashSet<RawValue>> {
        self.object_or(key, TargetType::MutableSet, RawValue::as_set)
    }

    /// Reads a sequence as an ordered set; first occurrences keep their position.
    pub fn ordered_set_for(&self, key: &str) -> Option<IndexSet<RawValue>> {
        self.object_or(key, TargetType::OrderedSet, RawValue::as_ordered_set)
    }

    /// Reads a sequence as an ordered set for the caller to modify.
    pub fn mutable_ordered_set_for(&self, key: &str) -> Option<IndexSet<RawValue>> {
        self.object_or(key, TargetType::MutableOrderedSet, RawValue::as_ordered_set)
    }

    /// Reads an absolute URL.
    pub fn url_for(&self, key: &str) -> Option<Url> {
        self.object_or(key, TargetType::Url, RawValue::as_url)
    }

    /// Reads an absolute URL decomposed into editable parts.
    pub fn url_components_for(&self, key: &str) -> Option<UrlComponents> {
        self.object_or(key, TargetType::UrlComponents, RawValue::as_url_components)
    }

    /// Returns the stored value as is. A stored null reads as `None`.
    pub fn object_for(&self, key: &str) -> Option<RawValue> {
        self.object_or(key, TargetType::Object, |raw, key| {
            if raw.is_null() {
                Err(ConfigError::KeyAbsent {
                    key: key.to_string(),
                })
            } else {
                Ok(raw.clone())
            }
        })
    }

    /// Returns `true` if the store holds any value for `key`, including null.
    ///
    /// This is the only way to tell an absent key from one whose value could not
    /// be coerced.
    pub fn contains_key(&self, key: &str) -> bool {
        self.store.get_str(key).is_some()
    }

    /// Returns every key in the store.
    pub fn keys(&self) -> Vec<ConfigKey> {
        self.store.keys()
    }

    /// Returns a copy of the whole payload.
    pub fn raw_configuration(&self) -> Payload {
        self.store
            .keys()
            .into_iter()
            .filter_map(|key| self.store.get(&key).map(|value| (key.into_string(), value)))
            .collect()
    }
}
