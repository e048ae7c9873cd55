// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable store adapter.
//!
//! This module provides a store that serves process environment variables as
//! string [`RawValue`]s. Numeric and boolean accessors still work on them through
//! the textual coercion rules.

use crate::domain::{ConfigKey, RawValue};
use crate::ports::RawStore;
use std::collections::HashMap;
use std::env;
use std::sync::{PoisonError, RwLock};

/// Maximum length for environment variable keys (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Store adapter for environment variables.
///
/// Supports optional prefix filtering (e.g., only read variables starting with
/// "MDM_") and key transformation (lowercasing, converting underscores to dots).
/// Variables are read once on first access and cached until [`reload`](Self::reload).
///
/// # Examples
///
/// ```rust
/// use mdmcfg::adapters::EnvVarStore;
///
/// // Read all environment variables
/// let store = EnvVarStore::new();
///
/// // Read only variables with a specific prefix
/// let store = EnvVarStore::with_prefix("MDM_");
/// ```
#[derive(Debug)]
pub struct EnvVarStore {
    /// Optional prefix to filter environment variables
    prefix: Option<String>,
    /// Whether to convert keys to lowercase
    lowercase_keys: bool,
    /// Whether to replace underscores with dots
    replace_underscores: bool,
    /// Cached variables with interior mutability for thread-safe lazy loading
    cache: RwLock<Option<HashMap<String, String>>>,
}

impl EnvVarStore {
    /// Creates a store over every environment variable of the process.
    pub fn new() -> Self {
        Self {
            prefix: None,
            lowercase_keys: false,
            replace_underscores: true,
            cache: RwLock::new(None),
        }
    }

    /// Creates a store that only reads variables starting with `prefix`.
    ///
    /// The prefix is stripped from the key when storing values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mdmcfg::adapters::EnvVarStore;
    ///
    /// // MDM_SERVER_URL is served as "SERVER.URL"
    /// let store = EnvVarStore::with_prefix("MDM_");
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::new()
        }
    }

    /// Sets whether to convert keys to lowercase.
    pub fn lowercase_keys(mut self, enabled: bool) -> Self {
        self.lowercase_keys = enabled;
        self
    }

    /// Sets whether to replace underscores with dots in keys (enabled by default).
    pub fn replace_underscores(mut self, enabled: bool) -> Self {
        self.replace_underscores = enabled;
        self
    }

    /// Creates a store with pre-populated values instead of the process environment.
    ///
    /// Keys are used as given; no prefix or transformation applies. Calling
    /// [`reload`](Self::reload) on such a store switches it to the real environment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mdmcfg::adapters::EnvVarStore;
    /// use mdmcfg::ports::RawStore;
    /// use std::collections::HashMap;
    ///
    /// let mut values = HashMap::new();
    /// values.insert("server.port".to_string(), "8443".to_string());
    ///
    /// let store = EnvVarStore::with_values(values);
    /// assert!(store.get_str("server.port").is_some());
    /// ```
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            prefix: None,
            lowercase_keys: false,
            replace_underscores: false,
            cache: RwLock::new(Some(values)),
        }
    }

    /// Drops the cached variables so the next lookup reads the environment again.
    pub fn reload(&self) {
        let mut guard = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Maps a variable name to a key, or `None` if the prefix filter rejects it.
    fn transform_key(&self, name: &str) -> Option<String> {
        let name = match &self.prefix {
            Some(prefix) => name.strip_prefix(prefix.as_str())?,
            None => name,
        };

        let mut key = name.to_string();
        if self.lowercase_keys {
            key = key.to_lowercase();
        }
        if self.replace_underscores {
            key = key.replace('_', ".");
        }
        Some(key)
    }

    /// Loads environment variables into a new map.
    fn load(&self) -> HashMap<String, String> {
        let mut loaded = HashMap::new();

        // vars_os so a single non-UTF-8 variable does not abort the scan
        for (name, value) in env::vars_os() {
            let (Some(name), Some(value)) = (name.to_str(), value.to_str()) else {
                continue;
            };

            // Validate input sizes to prevent DoS
            if name.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    "Skipping oversized environment variable: key_len={}, value_len={} (max key={}, max value={})",
                    name.len(),
                    value.len(),
                    MAX_ENV_KEY_LEN,
                    MAX_ENV_VALUE_LEN
                );
                continue;
            }

            if let Some(key) = self.transform_key(name) {
                loaded.insert(key, value.to_string());
            }
        }

        tracing::debug!(
            "Loaded {} environment variables (prefix={:?}, lowercase={}, replace_underscores={})",
            loaded.len(),
            self.prefix,
            self.lowercase_keys,
            self.replace_underscores
        );

        loaded
    }

    /// Runs `f` against the cache, loading it first if necessary.
    fn with_cache<T>(&self, f: impl FnOnce(&HashMap<String, String>) -> T) -> T {
        {
            let guard = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cache) = guard.as_ref() {
                return f(cache);
            }
        }

        let mut guard = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have filled the cache between the two locks
        let cache = guard.get_or_insert_with(|| self.load());
        f(cache)
    }
}

impl Default for EnvVarStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RawStore for EnvVarStore {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &ConfigKey) -> Option<RawValue> {
        self.with_cache(|cache| cache.get(key.as_str()).map(|v| RawValue::from(v.as_str())))
    }

    fn keys(&self) -> Vec<ConfigKey> {
        self.with_cache(|cache| cache.keys().map(|k| ConfigKey::from(k.as_str())).collect())
    }
}
