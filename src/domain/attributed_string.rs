// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rich text values.
//!
//! Managed payloads only ever carry plain strings, so an [`AttributedString`] read
//! from a store always starts without attributes. Callers that need styling (for
//! example a banner message pushed by the management server) can add runs to the
//! owned value afterwards.

use crate::domain::RawValue;
use std::fmt;
use std::ops::Range;

/// A named attribute applied to a byte range of an [`AttributedString`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeRun {
    /// Byte range of the text the attribute covers.
    pub range: Range<usize>,
    /// Attribute name, e.g. `"bold"` or `"link"`.
    pub name: String,
    /// Attribute value.
    pub value: RawValue,
}

/// A string with optional attribute runs.
///
/// # Examples
///
/// ```
/// use mdmcfg::domain::{AttributedString, RawValue};
///
/// let mut banner = AttributedString::plain("Device managed by Example Corp");
/// assert!(!banner.has_attributes());
///
/// assert!(banner.add_attribute(0..6, "bold", RawValue::from(true)));
/// assert_eq!(banner.attributes_at(3).count(), 1);
/// assert_eq!(banner.text(), "Device managed by Example Corp");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributedString {
    text: String,
    runs: Vec<AttributeRun>,
}

impl AttributedString {
    /// Wraps `text` with no attributes.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            runs: Vec::new(),
        }
    }

    /// Returns the underlying text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the attribute runs in insertion order.
    pub fn runs(&self) -> &[AttributeRun] {
        &self.runs
    }

    /// Returns the text length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns `true` if any attribute run is present.
    pub fn has_attributes(&self) -> bool {
        !self.runs.is_empty()
    }

    /// Applies an attribute to `range`.
    ///
    /// Returns `false` and leaves the string untouched when the range is empty, out
    /// of bounds, or does not fall on character boundaries.
    pub fn add_attribute(
        &mut self,
        range: Range<usize>,
        name: impl Into<String>,
        value: RawValue,
    ) -> bool {
        if range.start >= range.end
            || range.end > self.text.len()
            || !self.text.is_char_boundary(range.start)
            || !self.text.is_char_boundary(range.end)
        {
            return false;
        }
        self.runs.push(AttributeRun {
            range,
            name: name.into(),
            value,
        });
        true
    }

    /// Iterates over the runs covering the byte at `index`.
    pub fn attributes_at(&self, index: usize) -> impl Iterator<Item = &AttributeRun> {
        self.runs.iter().filter(move |run| run.range.contains(&index))
    }

    /// Appends unattributed text.
    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Drops all attributes, returning the plain text.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl From<String> for AttributedString {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

impl From<&str> for AttributedString {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl fmt::Display for AttributedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_has_no_attributes() {
        let s = AttributedString::plain("hello");
        assert_eq!(s.text(), "hello");
        assert_eq!(s.len(), 5);
        assert!(!s.has_attributes());
        assert!(s.runs().is_empty());
    }

    #[test]
    fn test_default_is_empty() {
        let s = AttributedString::default();
        assert!(s.is_empty());
        assert_eq!(s, AttributedString::plain(""));
    }

    #[test]
    fn test_add_attribute_rejects_bad_ranges() {
        let mut s = AttributedString::plain("héllo");
        assert!(!s.add_attribute(2..2, "empty", RawValue::Null));
        assert!(!s.add_attribute(0..10, "too.long", RawValue::Null));
        // 'é' spans bytes 1..3
        assert!(!s.add_attribute(0..2, "split.char", RawValue::Null));
        assert!(!s.has_attributes());

        assert!(s.add_attribute(0..3, "ok", RawValue::Null));
        assert_eq!(s.runs().len(), 1);
    }

    #[test]
    fn test_attributes_at() {
        let mut s = AttributedString::plain("abcdef");
        s.add_attribute(0..3, "bold", RawValue::from(true));
        s.add_attribute(2..6, "color", RawValue::from("red"));

        let names: Vec<&str> = s.attributes_at(2).map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["bold", "color"]);
        assert_eq!(s.attributes_at(5).count(), 1);
        assert_eq!(s.attributes_at(6).count(), 0);
    }

    #[test]
    fn test_push_str_and_display() {
        let mut s = AttributedString::from("Managed");
        s.push_str(" device");
        assert_eq!(s.to_string(), "Managed device");
        assert_eq!(s.into_text(), "Managed device");
    }
}
