// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payload key newtype.
//!
//! Managed payload keys are opaque, case-sensitive strings (`ServerURL`,
//! `com.example.sync.interval`). `ConfigKey` keeps them apart from ordinary string
//! values in store signatures.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A key into a configuration payload.
///
/// Keys are compared verbatim: no case folding and no path splitting.
///
/// # Examples
///
/// ```
/// use mdmcfg::domain::ConfigKey;
///
/// let key = ConfigKey::from("ServerURL");
/// assert_eq!(key.as_str(), "ServerURL");
/// assert_ne!(key, ConfigKey::from("serverurl"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ConfigKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashMap};

    #[test]
    fn test_config_key_round_trip() {
        let key = ConfigKey::new("ServerURL".to_string());
        assert_eq!(key.as_str(), "ServerURL");
        assert_eq!(key.into_string(), "ServerURL");
    }

    #[test]
    fn test_config_key_display() {
        let key = ConfigKey::from("com.example.sync.interval");
        assert_eq!(format!("{}", key), "com.example.sync.interval");
    }

    #[test]
    fn test_config_key_is_case_sensitive() {
        assert_ne!(ConfigKey::from("AllowCamera"), ConfigKey::from("allowcamera"));
    }

    #[test]
    fn test_config_key_borrowed_lookup() {
        let mut map = HashMap::new();
        map.insert(ConfigKey::from("AllowCamera"), true);

        assert_eq!(map.get("AllowCamera"), Some(&true));
        assert_eq!(map.get("Missing"), None);
    }

    #[test]
    fn test_config_key_ordering() {
        let keys: BTreeSet<ConfigKey> = ["b", "A", "a"].into_iter().map(ConfigKey::from).collect();
        let ordered: Vec<&str> = keys.iter().map(ConfigKey::as_str).collect();
        assert_eq!(ordered, vec!["A", "a", "b"]);
    }

    #[test]
    fn test_config_key_serializes_as_string() {
        let json = serde_json::to_string(&ConfigKey::from("Tenant")).unwrap();
        assert_eq!(json, "\"Tenant\"");
    }

    #[test]
    fn test_string_from_config_key() {
        let s: String = ConfigKey::from("").into();
        assert_eq!(s, "");
    }
}
