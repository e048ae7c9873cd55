// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payload watcher trait definition.
//!
//! This module defines the `ConfigWatcher` trait, which lets a host learn that the
//! document behind a store changed so it can re-read it and publish a new snapshot.

use crate::domain::{ConfigKey, Result};
use std::sync::Arc;

/// Type alias for change notification callbacks.
///
/// The callback receives a key naming what changed. File watchers pass the watched
/// path, since a document change may touch any entry.
pub type ChangeCallback = Arc<dyn Fn(ConfigKey) + Send + Sync>;

/// A trait for watching a payload source for changes.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow for use in multi-threaded contexts.
///
/// # Examples
///
/// ```rust
/// use mdmcfg::ports::{ChangeCallback, ConfigWatcher};
/// use mdmcfg::domain::Result;
///
/// struct ManualWatcher {
///     callback: Option<ChangeCallback>,
/// }
///
/// impl ConfigWatcher for ManualWatcher {
///     fn watch(&mut self, callback: ChangeCallback) -> Result<()> {
///         self.callback = Some(callback);
///         Ok(())
///     }
///
///     fn stop(&mut self) -> Result<()> {
///         self.callback = None;
///         Ok(())
///     }
/// }
/// ```
pub trait ConfigWatcher: Send + Sync {
    /// Starts watching for changes.
    ///
    /// The callback runs on the watcher's own thread and should return quickly.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The watcher was successfully started
    /// * `Err(ConfigError::WatcherError)` - The watcher could not be started or is
    ///   already running
    fn watch(&mut self, callback: ChangeCallback) -> Result<()>;

    /// Stops watching. No notifications are delivered after this returns.
    fn stop(&mut self) -> Result<()>;
}
