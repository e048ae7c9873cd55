// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared, refreshable store adapter.
//!
//! A [`SharedStore`] is a cloneable handle to the current payload snapshot. Hosts
//! publish a whole new payload at once; readers holding any clone see either the old
//! or the new snapshot for a given lookup, never a mix.

use crate::domain::{ConfigKey, Payload, RawValue};
use crate::ports::RawStore;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug)]
struct Published {
    payload: Arc<Payload>,
    version: u64,
}

#[derive(Debug)]
struct Shared {
    name: String,
    current: RwLock<Published>,
}

/// A store whose payload can be replaced atomically while accessors read it.
///
/// # Examples
///
/// ```rust
/// use mdmcfg::adapters::{MemoryStore, SharedStore};
/// use mdmcfg::ports::RawStore;
///
/// let store = SharedStore::new("mdm");
/// let reader = store.clone();
/// assert!(reader.get_str("Tenant").is_none());
///
/// store.publish_from(&MemoryStore::new().with_value("Tenant", "example"));
/// assert!(reader.get_str("Tenant").is_some());
/// assert_eq!(reader.version(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<Shared>,
}

impl SharedStore {
    /// Creates a store with an empty payload at version 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_payload(name, Payload::new())
    }

    /// Creates a store with an initial payload at version 0.
    pub fn with_payload(name: impl Into<String>, payload: Payload) -> Self {
        Self {
            inner: Arc::new(Shared {
                name: name.into(),
                current: RwLock::new(Published {
                    payload: Arc::new(payload),
                    version: 0,
                }),
            }),
        }
    }

    /// Replaces the payload and returns the new version.
    pub fn publish(&self, payload: Payload) -> u64 {
        let payload = Arc::new(payload);
        let mut current = self
            .inner
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        current.payload = payload;
        current.version += 1;

        tracing::debug!(
            "Published payload version {} to store '{}' ({} entries)",
            current.version,
            self.inner.name,
            current.payload.len()
        );
        current.version
    }

    /// Copies every entry of `source` and publishes the copy.
    pub fn publish_from<S: RawStore + ?Sized>(&self, source: &S) -> u64 {
        let payload: Payload = source
            .keys()
            .into_iter()
            .filter_map(|key| source.get(&key).map(|value| (key.into_string(), value)))
            .collect();
        self.publish(payload)
    }

    /// Returns the current snapshot. It stays valid after later publishes.
    pub fn snapshot(&self) -> Arc<Payload> {
        let current = self
            .inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current.payload)
    }

    /// Returns the number of publishes so far.
    pub fn version(&self) -> u64 {
        self.inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .version
    }

    /// Loads `path`, publishes it, and republishes on every change to the file.
    ///
    /// The parser is chosen from the file extension. A change that fails to load
    /// keeps the previous snapshot and is logged at `warn`. Watching lasts as long
    /// as the returned watcher is alive.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial load fails or the watcher cannot start.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use mdmcfg::adapters::SharedStore;
    ///
    /// # fn main() -> mdmcfg::domain::Result<()> {
    /// let store = SharedStore::new("mdm");
    /// let _watcher = store.follow_file("/etc/mdm/managed.yaml")?;
    /// # Ok(())
    /// # }
    /// ```
    #[cfg(all(feature = "reload", any(feature = "yaml", feature = "json")))]
    pub fn follow_file(
        &self,
        path: impl AsRef<std::path::Path>,
    ) -> crate::domain::Result<crate::adapters::FileWatcher> {
        use crate::adapters::file::{canonical_path, parser_for_path, read_payload};
        use crate::adapters::FileWatcher;
        use crate::ports::ConfigWatcher;

        let file_path = canonical_path(path.as_ref())?;
        let parser: Arc<dyn crate::ports::PayloadParser> = Arc::from(parser_for_path(&file_path)?);
        self.publish(read_payload(&file_path, parser.as_ref())?);

        let mut watcher = FileWatcher::new(&file_path, None)?;
        let store = self.clone();
        watcher.watch(Arc::new(move |_key: ConfigKey| {
            match read_payload(&file_path, parser.as_ref()) {
                Ok(payload) => {
                    store.publish(payload);
                }
                Err(e) => tracing::warn!(
                    "Keeping payload version {} of store '{}': {}",
                    store.version(),
                    store.name(),
                    e
                ),
            }
        }))?;

        Ok(watcher)
    }
}

impl RawStore for SharedStore {
    fn name(&self) -> &str {
        &self.inner.name
    }

    fn get(&self, key: &ConfigKey) -> Option<RawValue> {
        self.snapshot().get(key.as_str()).cloned()
    }

    fn keys(&self) -> Vec<ConfigKey> {
        self.snapshot()
            .keys()
            .map(|k| ConfigKey::from(k.as_str()))
            .collect()
    }
}
