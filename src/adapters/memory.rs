// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory store adapter.
//!
//! Holds a fixed [`Payload`]. Hosts that already have the managed document in hand
//! wrap it here, and tests use it as the standard double for [`RawStore`].

use crate::domain::{ConfigKey, Payload, RawValue};
use crate::ports::RawStore;

/// A named, immutable payload held in memory.
///
/// # Examples
///
/// ```rust
/// use mdmcfg::adapters::MemoryStore;
/// use mdmcfg::ports::RawStore;
///
/// let store = MemoryStore::new()
///     .with_value("Tenant", "example")
///     .with_value("MaxRetries", 5);
///
/// assert_eq!(store.keys().len(), 2);
/// assert!(store.get_str("Tenant").is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryStore {
    name: String,
    values: Payload,
}

impl MemoryStore {
    /// Creates an empty store named `"memory"`.
    pub fn new() -> Self {
        Self::named("memory")
    }

    /// Creates an empty store with the given log name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Payload::new(),
        }
    }

    /// Adds or replaces one entry.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Returns the payload.
    pub fn payload(&self) -> &Payload {
        &self.values
    }

    /// Consumes the store and returns its payload.
    pub fn into_payload(self) -> Payload {
        self.values
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Payload> for MemoryStore {
    fn from(values: Payload) -> Self {
        Self {
            name: "memory".to_string(),
            values,
        }
    }
}

impl FromIterator<(String, RawValue)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Payload>())
    }
}

impl RawStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &ConfigKey) -> Option<RawValue> {
        self.values.get(key.as_str()).cloned()
    }

    fn keys(&self) -> Vec<ConfigKey> {
        self.values.keys().map(|k| ConfigKey::from(k.as_str())).collect()
    }
}
