// SPDX-License-Identifier: MIT OR Apache-2.0

//! Numeric coercions: booleans, integers, floats, decimals and boxed numbers.
//!
//! Integer targets never wrap. Sources are first widened to `i128` (floats are
//! truncated toward zero, numeric strings parsed) and then clamped to the
//! destination's bounds.

use super::reject;
use crate::domain::{ConfigError, Number, RawValue, Result, ValueKind};
use bigdecimal::BigDecimal;

/// An integer type the coercion engine can saturate into.
///
/// Implemented for every primitive integer up to 64 bits plus `isize`/`usize`.
pub trait SaturatingInt: Copy {
    /// Type name used in diagnostics.
    const NAME: &'static str;
    /// Smallest representable value, widened.
    const MIN: i128;
    /// Largest representable value, widened.
    const MAX: i128;

    /// Narrows a value already known to lie within `MIN..=MAX`.
    fn from_clamped(value: i128) -> Self;

    /// Clamps `value` to `MIN..=MAX` and narrows it.
    fn saturate(value: i128) -> Self {
        Self::from_clamped(value.clamp(Self::MIN, Self::MAX))
    }
}

macro_rules! impl_saturating_int {
    ($($t:ty),*) => {
        $(
            impl SaturatingInt for $t {
                const NAME: &'static str = stringify!($t);
                const MIN: i128 = <$t>::MIN as i128;
                const MAX: i128 = <$t>::MAX as i128;

                fn from_clamped(value: i128) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_saturating_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Truncates a float toward zero; the cast saturates at the `i128` bounds.
fn widen_float(key: &str, target: &'static str, value: f64) -> Result<i128> {
    if value.is_nan() {
        return Err(ConfigError::mismatch(key, target, ValueKind::Float));
    }
    Ok(value.trunc() as i128)
}

/// Parses integer text, accepting float notation (`"3.7"`, `"1e3"`) as a fallback.
fn widen_text(key: &str, target: &'static str, text: &str) -> Result<i128> {
    let trimmed = text.trim();
    match trimmed.parse::<i128>() {
        Ok(value) => Ok(value),
        Err(int_err) => {
            // "inf" and "NaN" parse as floats but are not numbers a payload means
            let has_digits = trimmed.bytes().any(|b| b.is_ascii_digit());
            match trimmed.parse::<f64>() {
                Ok(value) if has_digits && !value.is_nan() => Ok(value.trunc() as i128),
                _ => Err(ConfigError::parse_failure(key, target, int_err)),
            }
        }
    }
}

fn parse_bool_text(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

impl RawValue {
    /// Converts the value to a boolean.
    ///
    /// Booleans pass through. Strings are matched case-insensitively against
    /// `true`/`yes`/`1` and `false`/`no`/`0`. Numbers are `true` when nonzero.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdmcfg::domain::RawValue;
    ///
    /// assert!(RawValue::from("YES").as_bool("k").unwrap());
    /// assert!(!RawValue::from(0).as_bool("k").unwrap());
    /// assert!(RawValue::from("maybe").as_bool("k").is_err());
    /// ```
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        match self {
            RawValue::Bool(b) => Ok(*b),
            RawValue::Integer(i) => Ok(*i != 0),
            RawValue::Float(f) if !f.is_nan() => Ok(*f != 0.0),
            RawValue::String(s) => parse_bool_text(s)
                .ok_or_else(|| ConfigError::mismatch(key, "bool", ValueKind::String)),
            other => Err(reject(key, "bool", other)),
        }
    }

    /// Converts the value to any [`SaturatingInt`], clamping out-of-range values.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdmcfg::domain::RawValue;
    ///
    /// assert_eq!(RawValue::from(300).as_integer::<u8>("k").unwrap(), 255);
    /// assert_eq!(RawValue::from(-2.9).as_integer::<i32>("k").unwrap(), -2);
    /// assert_eq!(RawValue::from(" 42 ").as_integer::<i16>("k").unwrap(), 42);
    /// ```
    pub fn as_integer<T: SaturatingInt>(&self, key: &str) -> Result<T> {
        let wide = match self {
            RawValue::Integer(i) => *i,
            RawValue::Float(f) => widen_float(key, T::NAME, *f)?,
            RawValue::String(s) => widen_text(key, T::NAME, s)?,
            other => return Err(reject(key, T::NAME, other)),
        };

        let value = T::saturate(wide);
        if !(T::MIN..=T::MAX).contains(&wide) {
            tracing::trace!(
                "Saturated value {} for key '{}' to the {} range",
                wide,
                key,
                T::NAME
            );
        }
        Ok(value)
    }

    /// Converts the value to an `f64`.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        match self {
            RawValue::Float(f) => Ok(*f),
            RawValue::Integer(i) => Ok(*i as f64),
            RawValue::String(s) => {
                let trimmed = s.trim();
                match trimmed.parse::<f64>() {
                    // Overflowing digits become infinite; spelled-out "inf" or "NaN" are refused
                    Ok(value) if trimmed.bytes().any(|b| b.is_ascii_digit()) => Ok(value),
                    Ok(_) => Err(ConfigError::mismatch(key, "f64", ValueKind::String)),
                    Err(e) => Err(ConfigError::parse_failure(key, "f64", e)),
                }
            }
            other => Err(reject(key, "f64", other)),
        }
    }

    /// Converts the value to an `f32`; out-of-range magnitudes become infinite.
    pub fn as_f32(&self, key: &str) -> Result<f32> {
        self.as_f64(key).map(|v| v as f32)
    }

    /// Converts the value to an exact decimal.
    ///
    /// Strings are parsed as base-10 decimals without a binary detour. Floats use
    /// their shortest round-trip representation, so `0.1` becomes exactly `0.1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdmcfg::domain::RawValue;
    ///
    /// let price = RawValue::from("19.99").as_decimal("k").unwrap();
    /// assert_eq!(price.to_string(), "19.99");
    /// ```
    pub fn as_decimal(&self, key: &str) -> Result<BigDecimal> {
        let text = match self {
            RawValue::String(s) => s.trim().to_string(),
            RawValue::Integer(i) => i.to_string(),
            RawValue::Float(f) if f.is_finite() => f.to_string(),
            other => return Err(reject(key, "decimal", other)),
        };
        text.parse::<BigDecimal>()
            .map_err(|e| ConfigError::parse_failure(key, "decimal", e))
    }

    /// Boxes a numeric value without converting it. Booleans box as 0 or 1.
    pub fn as_number(&self, key: &str) -> Result<Number> {
        match self {
            RawValue::Integer(i) => Ok(Number::Integer(*i)),
            RawValue::Float(f) => Ok(Number::Float(*f)),
            RawValue::Bool(b) => Ok(Number::Integer(i128::from(*b))),
            other => Err(reject(key, "number", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_bool_true_variants() {
        for val in ["true", "True", "TRUE", "yes", "Yes", "YES", "1", " yes "] {
            let value = RawValue::from(val);
            assert!(value.as_bool("test.key").unwrap(), "Failed for value: {}", val);
        }
        assert!(RawValue::from(true).as_bool("test.key").unwrap());
        assert!(RawValue::from(1).as_bool("test.key").unwrap());
        assert!(RawValue::from(-7).as_bool("test.key").unwrap());
        assert!(RawValue::from(0.5).as_bool("test.key").unwrap());
    }

    #[test]
    fn test_as_bool_false_variants() {
        for val in ["false", "False", "FALSE", "no", "No", "NO", "0"] {
            let value = RawValue::from(val);
            assert!(!value.as_bool("test.key").unwrap(), "Failed for value: {}", val);
        }
        assert!(!RawValue::from(false).as_bool("test.key").unwrap());
        assert!(!RawValue::from(0).as_bool("test.key").unwrap());
        assert!(!RawValue::from(0.0).as_bool("test.key").unwrap());
    }

    #[test]
    fn test_as_bool_invalid() {
        for raw in [
            RawValue::from("on"),
            RawValue::from(""),
            RawValue::from(f64::NAN),
            RawValue::sequence([true]),
        ] {
            assert!(raw.as_bool("test.key").is_err(), "Accepted {:?}", raw);
        }
        assert!(RawValue::Null.as_bool("test.key").unwrap_err().is_key_absent());
    }

    #[test]
    fn test_as_bool_unrecognized_text_is_a_mismatch() {
        for text in ["on", "maybe", " ", "truthy"] {
            let err = RawValue::from(text).as_bool("test.key").unwrap_err();
            assert!(
                matches!(
                    err,
                    ConfigError::TypeMismatch {
                        expected: "bool",
                        found: ValueKind::String,
                        ..
                    }
                ),
                "Unexpected error for {:?}: {}",
                text,
                err
            );
        }
    }

    #[test]
    fn test_as_integer_in_range() {
        assert_eq!(RawValue::from(42).as_integer::<i32>("k").unwrap(), 42);
        assert_eq!(RawValue::from(-42).as_integer::<i64>("k").unwrap(), -42);
        assert_eq!(RawValue::from("-17").as_integer::<i8>("k").unwrap(), -17);
        assert_eq!(RawValue::from("+5").as_integer::<u16>("k").unwrap(), 5);
    }

    #[test]
    fn test_as_integer_saturates() {
        assert_eq!(RawValue::from(128).as_integer::<i8>("k").unwrap(), i8::MAX);
        assert_eq!(RawValue::from(-129).as_integer::<i8>("k").unwrap(), i8::MIN);
        assert_eq!(RawValue::from(-1).as_integer::<u32>("k").unwrap(), 0);
        assert_eq!(RawValue::from(70_000).as_integer::<u16>("k").unwrap(), u16::MAX);
        assert_eq!(
            RawValue::from(u64::MAX).as_integer::<i64>("k").unwrap(),
            i64::MAX
        );
        assert_eq!(
            RawValue::from(i64::MIN).as_integer::<u64>("k").unwrap(),
            u64::MIN
        );
        assert_eq!(
            RawValue::Integer(i128::MAX).as_integer::<u64>("k").unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn test_as_integer_from_float_truncates() {
        assert_eq!(RawValue::from(3.99).as_integer::<i32>("k").unwrap(), 3);
        assert_eq!(RawValue::from(-3.99).as_integer::<i32>("k").unwrap(), -3);
        assert_eq!(RawValue::from(1e300).as_integer::<i64>("k").unwrap(), i64::MAX);
        assert_eq!(
            RawValue::from(f64::NEG_INFINITY).as_integer::<i16>("k").unwrap(),
            i16::MIN
        );
        assert!(RawValue::from(f64::NAN).as_integer::<i32>("k").is_err());
    }

    #[test]
    fn test_as_integer_from_text() {
        assert_eq!(RawValue::from("3.7").as_integer::<i32>("k").unwrap(), 3);
        assert_eq!(RawValue::from("1e3").as_integer::<u16>("k").unwrap(), 1000);
        assert_eq!(
            RawValue::from("99999999999999999999999999999999999999999")
                .as_integer::<u64>("k")
                .unwrap(),
            u64::MAX
        );
        assert_eq!(
            RawValue::from("-1e400").as_integer::<i32>("k").unwrap(),
            i32::MIN
        );
    }

    #[test]
    fn test_as_integer_invalid() {
        for raw in [
            RawValue::from("not_a_number"),
            RawValue::from("inf"),
            RawValue::from("NaN"),
            RawValue::from(""),
            RawValue::from(true),
            RawValue::Bytes(vec![1]),
        ] {
            assert!(raw.as_integer::<i32>("k").is_err(), "Accepted {:?}", raw);
        }
    }

    #[test]
    fn test_saturating_int_bounds() {
        assert_eq!(<u8 as SaturatingInt>::MAX, 255);
        assert_eq!(<i16 as SaturatingInt>::MIN, -32768);
        assert_eq!(<usize as SaturatingInt>::NAME, "usize");
        assert_eq!(i8::saturate(1000), 127);
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(RawValue::from(3.25).as_f64("k").unwrap(), 3.25);
        assert_eq!(RawValue::from(-4).as_f64("k").unwrap(), -4.0);
        assert_eq!(RawValue::from(" 2.5 ").as_f64("k").unwrap(), 2.5);
        assert!(RawValue::from("abc").as_f64("k").is_err());
        assert!(RawValue::from(false).as_f64("k").is_err());
        assert!(RawValue::from("NaN").as_f64("k").is_err());
        assert!(RawValue::from("-inf").as_f64("k").is_err());
        assert!(RawValue::from("1e400").as_f64("k").unwrap().is_infinite());
    }

    #[test]
    fn test_as_f32_narrows() {
        assert_eq!(RawValue::from(0.5).as_f32("k").unwrap(), 0.5f32);
        assert!(RawValue::from(1e300).as_f32("k").unwrap().is_infinite());
    }

    #[test]
    fn test_as_decimal_is_exact() {
        let expected: BigDecimal = "19.99".parse().unwrap();
        assert_eq!(RawValue::from("19.99").as_decimal("k").unwrap(), expected);

        let tenth: BigDecimal = "0.1".parse().unwrap();
        assert_eq!(RawValue::from(0.1).as_decimal("k").unwrap(), tenth);

        let big: BigDecimal = "18446744073709551615".parse().unwrap();
        assert_eq!(RawValue::from(u64::MAX).as_decimal("k").unwrap(), big);
    }

    #[test]
    fn test_as_decimal_invalid() {
        assert!(RawValue::from("12,50").as_decimal("k").is_err());
        assert!(RawValue::from(f64::INFINITY).as_decimal("k").is_err());
        assert!(RawValue::from(true).as_decimal("k").is_err());
    }

    #[test]
    fn test_as_number() {
        assert_eq!(RawValue::from(5).as_number("k").unwrap(), Number::Integer(5));
        assert_eq!(RawValue::from(0.5).as_number("k").unwrap(), Number::Float(0.5));
        assert_eq!(RawValue::from(true).as_number("k").unwrap(), Number::Integer(1));
        assert!(RawValue::from("5").as_number("k").is_err());
    }
}
