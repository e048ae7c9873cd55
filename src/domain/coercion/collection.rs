// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object coercions: bytes, timestamps, mappings and sequence-derived collections.
//!
//! Collections are rebuilt one level deep. Elements are copied as raw values and
//! never re-coerced. Sets require a sequence source; a scalar or mapping is a
//! mismatch, not a one-element set.

use super::reject;
use crate::domain::{RawValue, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use std::collections::{BTreeMap, HashSet};

impl RawValue {
    /// Copies a byte buffer.
    pub fn as_bytes(&self, key: &str) -> Result<Vec<u8>> {
        match self {
            RawValue::Bytes(b) => Ok(b.clone()),
            other => Err(reject(key, "bytes", other)),
        }
    }

    /// Returns a timestamp. Only values the store tagged as timestamps qualify;
    /// date-like strings and epoch numbers are mismatches.
    pub fn as_timestamp(&self, key: &str) -> Result<DateTime<Utc>> {
        match self {
            RawValue::Timestamp(t) => Ok(*t),
            other => Err(reject(key, "timestamp", other)),
        }
    }

    /// Copies a nested mapping, keys verbatim.
    pub fn as_mapping(&self, key: &str) -> Result<BTreeMap<String, RawValue>> {
        match self {
            RawValue::Mapping(map) => Ok(map.clone()),
            other => Err(reject(key, "mapping", other)),
        }
    }

    /// Copies a sequence, preserving order.
    pub fn as_sequence(&self, key: &str) -> Result<Vec<RawValue>> {
        match self {
            RawValue::Sequence(items) => Ok(items.clone()),
            other => Err(reject(key, "sequence", other)),
        }
    }

    /// Collects a sequence into a set, discarding order and duplicates.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdmcfg::domain::RawValue;
    ///
    /// let set = RawValue::sequence([1, 2, 2, 3]).as_set("k").unwrap();
    /// assert_eq!(set.len(), 3);
    /// assert!(set.contains(&RawValue::from(2)));
    /// ```
    pub fn as_set(&self, key: &str) -> Result<HashSet<RawValue>> {
        match self {
            RawValue::Sequence(items) => Ok(items.iter().cloned().collect()),
            other => Err(reject(key, "set", other)),
        }
    }

    /// Collects a sequence into an ordered set; the first occurrence of each
    /// element keeps its position.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdmcfg::domain::RawValue;
    ///
    /// let set = RawValue::sequence(["b", "a", "b", "c"]).as_ordered_set("k").unwrap();
    /// let order: Vec<&str> = set.iter().filter_map(RawValue::as_text).collect();
    /// assert_eq!(order, vec!["b", "a", "c"]);
    /// ```
    pub fn as_ordered_set(&self, key: &str) -> Result<IndexSet<RawValue>> {
        match self {
            RawValue::Sequence(items) => Ok(items.iter().cloned().collect()),
            other => Err(reject(key, "ordered set", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfigError, ValueKind};

    #[test]
    fn test_as_bytes() {
        let raw = RawValue::Bytes(vec![0xde, 0xad]);
        assert_eq!(raw.as_bytes("k").unwrap(), vec![0xde, 0xad]);
        assert!(RawValue::from("dead").as_bytes("k").is_err());
    }

    #[test]
    fn test_as_timestamp_requires_tag() {
        let now = Utc::now();
        assert_eq!(RawValue::from(now).as_timestamp("k").unwrap(), now);
        assert!(RawValue::from("2024-01-01T00:00:00Z").as_timestamp("k").is_err());
        assert!(RawValue::from(1_700_000_000).as_timestamp("k").is_err());
    }

    #[test]
    fn test_as_mapping_keeps_keys_verbatim() {
        let raw = RawValue::mapping([("Key One", 1), ("key one", 2)]);
        let map = raw.as_mapping("k").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["Key One"], RawValue::from(1));
        assert!(RawValue::sequence([1]).as_mapping("k").is_err());
    }

    #[test]
    fn test_as_sequence_preserves_order_and_duplicates() {
        let raw = RawValue::sequence([3, 1, 3]);
        assert_eq!(
            raw.as_sequence("k").unwrap(),
            vec![RawValue::from(3), RawValue::from(1), RawValue::from(3)]
        );
    }

    #[test]
    fn test_as_set_collapses_duplicates() {
        let set = RawValue::sequence([1, 2, 2, 3]).as_set("k").unwrap();
        let expected: HashSet<RawValue> = [1, 2, 3].into_iter().map(RawValue::from).collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_as_ordered_set_first_occurrence_wins() {
        let set = RawValue::sequence([1, 2, 2, 3]).as_ordered_set("k").unwrap();
        let items: Vec<RawValue> = set.into_iter().collect();
        assert_eq!(
            items,
            vec![RawValue::from(1), RawValue::from(2), RawValue::from(3)]
        );

        let set = RawValue::sequence([3, 1, 3, 2, 1]).as_ordered_set("k").unwrap();
        let items: Vec<RawValue> = set.into_iter().collect();
        assert_eq!(
            items,
            vec![RawValue::from(3), RawValue::from(1), RawValue::from(2)]
        );
    }

    #[test]
    fn test_sets_do_not_wrap_scalars() {
        for raw in [
            RawValue::from(1),
            RawValue::from("a"),
            RawValue::mapping([("a", 1)]),
        ] {
            let err = raw.as_set("k").unwrap_err();
            assert!(matches!(err, ConfigError::TypeMismatch { expected: "set", .. }));
            assert!(raw.as_ordered_set("k").is_err());
        }
    }

    #[test]
    fn test_nested_elements_are_not_coerced() {
        let raw = RawValue::sequence([RawValue::sequence([1, 1]), RawValue::from("1")]);
        let set = raw.as_set("k").unwrap();
        assert!(set.contains(&RawValue::sequence([1, 1])));
        assert!(set.contains(&RawValue::from("1")));
        assert!(!set.contains(&RawValue::from(1)));
    }

    #[test]
    fn test_null_collection_is_absent() {
        let err = RawValue::Null.as_sequence("k").unwrap_err();
        assert!(err.is_key_absent());
        let err = RawValue::from(true).as_bytes("k").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TypeMismatch {
                found: ValueKind::Bool,
                ..
            }
        ));
    }
}
