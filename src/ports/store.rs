// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw store trait definition.
//!
//! This module defines the `RawStore` trait, the port through which the accessor
//! reads the managed payload. The host (a device management agent, a property list,
//! an environment-provided document) owns how the payload is obtained; the accessor
//! only ever calls `get`.

use crate::domain::{ConfigKey, RawValue};
use std::sync::Arc;

/// A read-only key/value payload.
///
/// Implementations must treat unknown keys as a normal outcome and return `None`;
/// they must never panic for a lookup. Repeated lookups of a key return equal values
/// until the implementation explicitly publishes a new payload.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so one store can back accessors on many
/// threads. Stores that refresh concurrently with reads must hand each `get` a
/// consistent snapshot.
///
/// # Examples
///
/// ```rust
/// use mdmcfg::ports::RawStore;
/// use mdmcfg::domain::{ConfigKey, RawValue};
///
/// struct SingleValue;
///
/// impl RawStore for SingleValue {
///     fn name(&self) -> &str {
///         "single"
///     }
///
///     fn get(&self, key: &ConfigKey) -> Option<RawValue> {
///         (key.as_str() == "Tenant").then(|| RawValue::from("example"))
///     }
///
///     fn keys(&self) -> Vec<ConfigKey> {
///         vec![ConfigKey::from("Tenant")]
///     }
/// }
///
/// let store = SingleValue;
/// assert!(store.get_str("Tenant").is_some());
/// assert!(store.get_str("Other").is_none());
/// ```
pub trait RawStore: Send + Sync {
    /// Returns a short identifier used in logs, e.g. `"memory"` or `"file"`.
    fn name(&self) -> &str;

    /// Looks up the raw value for `key`, or `None` when the key is absent.
    fn get(&self, key: &ConfigKey) -> Option<RawValue>;

    /// Returns every key currently present.
    fn keys(&self) -> Vec<ConfigKey>;

    /// Looks up a value by string key.
    ///
    /// Equivalent to `get(&ConfigKey::from(key))`.
    fn get_str(&self, key: &str) -> Option<RawValue> {
        self.get(&ConfigKey::from(key))
    }
}

impl<S: RawStore + ?Sized> RawStore for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &ConfigKey) -> Option<RawValue> {
        (**self).get(key)
    }

    fn keys(&self) -> Vec<ConfigKey> {
        (**self).keys()
    }

    fn get_str(&self, key: &str) -> Option<RawValue> {
        (**self).get_str(key)
    }
}

impl<S: RawStore + ?Sized> RawStore for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &ConfigKey) -> Option<RawValue> {
        (**self).get(key)
    }

    fn keys(&self) -> Vec<ConfigKey> {
        (**self).keys()
    }

    fn get_str(&self, key: &str) -> Option<RawValue> {
        (**self).get_str(key)
    }
}

impl<S: RawStore + ?Sized> RawStore for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &ConfigKey) -> Option<RawValue> {
        (**self).get(key)
    }

    fn keys(&self) -> Vec<ConfigKey> {
        (**self).keys()
    }

    fn get_str(&self, key: &str) -> Option<RawValue> {
        (**self).get_str(key)
    }
}
