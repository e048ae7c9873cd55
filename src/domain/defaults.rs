// SPDX-License-Identifier: MIT OR Apache-2.0

//! The target type catalog and its default table.
//!
//! Every typed accessor is tagged with a [`TargetType`]. When a key is absent or its
//! value cannot be coerced, the accessor returns the value described by
//! [`TargetType::fallback`].

use std::fmt;

/// The character `'0'`, returned by `char_for` and `unsigned_char_for` on fallback.
pub const CHAR_ZERO: u8 = b'0';

/// The value an accessor returns when coercion is impossible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fallback {
    /// `false`.
    False,
    /// The character `'0'` ([`CHAR_ZERO`]), for the char types.
    CharZero,
    /// Numeric zero of the target width (`0` or `0.0`).
    Zero,
    /// The decimal representation of zero.
    DecimalZero,
    /// An empty `String`.
    EmptyString,
    /// An empty attributed string with no attributes.
    EmptyAttributedString,
    /// `None`.
    Null,
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Fallback::False => "false",
            Fallback::CharZero => "character zero",
            Fallback::Zero => "zero",
            Fallback::DecimalZero => "decimal zero",
            Fallback::EmptyString => "empty string",
            Fallback::EmptyAttributedString => "empty attributed string",
            Fallback::Null => "none",
        };
        f.write_str(text)
    }
}

/// Every semantic type the accessor surface can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetType {
    /// Read by `bool_for`.
    Bool,
    /// Read by `char_for`.
    Char,
    /// Read by `unsigned_char_for`.
    UnsignedChar,
    /// Read by `short_for`.
    Short,
    /// Read by `unsigned_short_for`.
    UnsignedShort,
    /// Read by `int_for`.
    Int,
    /// Read by `unsigned_int_for`.
    UnsignedInt,
    /// Read by `long_for`.
    Long,
    /// Read by `unsigned_long_for`.
    UnsignedLong,
    /// Read by `long_long_for`.
    LongLong,
    /// Read by `unsigned_long_long_for`.
    UnsignedLongLong,
    /// Read by `integer_for`.
    Integer,
    /// Read by `unsigned_integer_for`.
    UnsignedInteger,
    /// Read by `float_for`.
    Float,
    /// Read by `double_for`.
    Double,
    /// Read by `decimal_for`.
    Decimal,
    /// Read by `decimal_number_for`.
    DecimalNumber,
    /// Read by `number_for`.
    Number,
    /// Read by `string_for`.
    String,
    /// Read by `mutable_string_for`.
    MutableString,
    /// Read by `attributed_string_for`.
    AttributedString,
    /// Read by `mutable_attributed_string_for`.
    MutableAttributedString,
    /// Read by `data_for`.
    Data,
    /// Read by `mutable_data_for`.
    MutableData,
    /// Read by `date_for`.
    Date,
    /// Read by `dictionary_for`.
    Dictionary,
    /// Read by `mutable_dictionary_for`.
    MutableDictionary,
    /// Read by `array_for`.
    Array,
    /// Read by `mutable_array_for`.
    MutableArray,
    /// Read by `set_for`.
    Set,
    /// Read by `mutable_set_for`.
    MutableSet,
    /// Read by `ordered_set_for`.
    OrderedSet,
    /// Read by `mutable_ordered_set_for`.
    MutableOrderedSet,
    /// Read by `url_for`.
    Url,
    /// Read by `url_components_for`.
    UrlComponents,
    /// Read by `object_for`.
    Object,
}

impl TargetType {
    /// The whole catalog, in accessor order.
    pub const ALL: [TargetType; 36] = [
        TargetType::Bool,
        TargetType::Char,
        TargetType::UnsignedChar,
        TargetType::Short,
        TargetType::UnsignedShort,
        TargetType::Int,
        TargetType::UnsignedInt,
        TargetType::Long,
        TargetType::UnsignedLong,
        TargetType::LongLong,
        TargetType::UnsignedLongLong,
        TargetType::Integer,
        TargetType::UnsignedInteger,
        TargetType::Float,
        TargetType::Double,
        TargetType::Decimal,
        TargetType::DecimalNumber,
        TargetType::Number,
        TargetType::String,
        TargetType::MutableString,
        TargetType::AttributedString,
        TargetType::MutableAttributedString,
        TargetType::Data,
        TargetType::MutableData,
        TargetType::Date,
        TargetType::Dictionary,
        TargetType::MutableDictionary,
        TargetType::Array,
        TargetType::MutableArray,
        TargetType::Set,
        TargetType::MutableSet,
        TargetType::OrderedSet,
        TargetType::MutableOrderedSet,
        TargetType::Url,
        TargetType::UrlComponents,
        TargetType::Object,
    ];

    /// The default table.
    ///
    /// This describes the value each accessor falls back to; the accessors produce
    /// that value themselves and this table is used to name it in logs.
    pub fn fallback(self) -> Fallback {
        use TargetType::*;
        match self {
            Bool => Fallback::False,
            Char | UnsignedChar => Fallback::CharZero,
            Short | UnsignedShort | Int | UnsignedInt | Long | UnsignedLong | LongLong
            | UnsignedLongLong | Integer | UnsignedInteger | Float | Double => Fallback::Zero,
            Decimal | DecimalNumber => Fallback::DecimalZero,
            String | MutableString => Fallback::EmptyString,
            AttributedString | MutableAttributedString => Fallback::EmptyAttributedString,
            Number | Data | MutableData | Date | Dictionary | MutableDictionary | Array
            | MutableArray | Set | MutableSet | OrderedSet | MutableOrderedSet | Url
            | UrlComponents | Object => Fallback::Null,
        }
    }

    /// Returns `true` for types that fall back to `None` rather than a value.
    pub fn is_object(self) -> bool {
        self.fallback() == Fallback::Null
    }

    /// Human-readable name used in logs.
    pub fn name(self) -> &'static str {
        use TargetType::*;
        match self {
            Bool => "bool",
            Char => "char",
            UnsignedChar => "unsigned char",
            Short => "short",
            UnsignedShort => "unsigned short",
            Int => "int",
            UnsignedInt => "unsigned int",
            Long => "long",
            UnsignedLong => "unsigned long",
            LongLong => "long long",
            UnsignedLongLong => "unsigned long long",
            Integer => "integer",
            UnsignedInteger => "unsigned integer",
            Float => "float",
            Double => "double",
            Decimal => "decimal",
            DecimalNumber => "decimal number",
            Number => "number",
            String => "string",
            MutableString => "mutable string",
            AttributedString => "attributed string",
            MutableAttributedString => "mutable attributed string",
            Data => "data",
            MutableData => "mutable data",
            Date => "date",
            Dictionary => "dictionary",
            MutableDictionary => "mutable dictionary",
            Array => "array",
            MutableArray => "mutable array",
            Set => "set",
            MutableSet => "mutable set",
            OrderedSet => "ordered set",
            MutableOrderedSet => "mutable ordered set",
            Url => "url",
            UrlComponents => "url components",
            Object => "object",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_no_duplicates() {
        let unique: HashSet<TargetType> = TargetType::ALL.into_iter().collect();
        assert_eq!(unique.len(), TargetType::ALL.len());

        let names: HashSet<&str> = TargetType::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), TargetType::ALL.len());
    }

    #[test]
    fn test_value_types_fall_back_to_zero_like_values() {
        assert_eq!(TargetType::Bool.fallback(), Fallback::False);
        assert_eq!(TargetType::Char.fallback(), Fallback::CharZero);
        assert_eq!(TargetType::UnsignedChar.fallback(), Fallback::CharZero);
        assert_eq!(TargetType::Short.fallback(), Fallback::Zero);
        assert_eq!(TargetType::UnsignedLongLong.fallback(), Fallback::Zero);
        assert_eq!(TargetType::Float.fallback(), Fallback::Zero);
        assert_eq!(TargetType::Decimal.fallback(), Fallback::DecimalZero);
    }

    #[test]
    fn test_object_types_fall_back_to_null() {
        for target in [
            TargetType::Data,
            TargetType::Date,
            TargetType::Dictionary,
            TargetType::Array,
            TargetType::Set,
            TargetType::MutableOrderedSet,
            TargetType::Url,
            TargetType::UrlComponents,
        ] {
            assert!(target.is_object(), "{} should be an object type", target);
        }
        assert!(!TargetType::String.is_object());
        assert_eq!(TargetType::MutableString.fallback(), Fallback::EmptyString);
        assert_eq!(
            TargetType::AttributedString.fallback(),
            Fallback::EmptyAttributedString
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(TargetType::UnsignedShort.to_string(), "unsigned short");
        assert_eq!(Fallback::DecimalZero.to_string(), "decimal zero");
        assert_eq!(Fallback::CharZero.to_string(), "character zero");
        assert_eq!(char::from(CHAR_ZERO), '0');
    }
}
