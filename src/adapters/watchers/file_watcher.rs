// SPDX-License-Identifier: MIT OR Apache-2.0

//! File system watcher for payload file changes.
//!
//! The watcher fires once after a burst of writes has settled, so a document is
//! not re-read while an editor or an agent is still writing it.

use crate::domain::{ConfigError, ConfigKey, Result};
use crate::ports::{ChangeCallback, ConfigWatcher};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default quiet period before a change is reported.
const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Poll interval of the event thread.
const TICK: Duration = Duration::from_millis(50);

/// File system watcher for payload files.
///
/// # Examples
///
/// ```rust,no_run
/// use mdmcfg::adapters::FileWatcher;
/// use mdmcfg::ports::ConfigWatcher;
/// use std::sync::Arc;
///
/// # fn main() -> mdmcfg::domain::Result<()> {
/// let mut watcher = FileWatcher::new("/etc/mdm/managed.yaml", None)?;
///
/// watcher.watch(Arc::new(|key| {
///     println!("Payload changed: {}", key);
/// }))?;
///
/// // Later, stop watching
/// watcher.stop()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileWatcher {
    /// Canonical path of the watched file
    file_path: PathBuf,
    /// Quiet period after the last event before the callback runs
    debounce_delay: Duration,
    /// Internal watcher
    watcher: Option<RecommendedWatcher>,
    /// Thread handle for the event thread
    watch_thread: Option<JoinHandle<()>>,
    /// Stop signal sender
    stop_tx: Option<Sender<()>>,
}

impl FileWatcher {
    /// Creates a watcher for an existing file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file to watch
    /// * `debounce_delay` - Optional quiet period (default 500ms)
    pub fn new(path: impl AsRef<Path>, debounce_delay: Option<Duration>) -> Result<Self> {
        let path = path.as_ref();
        // Event paths are reported canonicalized
        let file_path = path.canonicalize().map_err(|e| ConfigError::WatcherError {
            message: format!("File does not exist: {}", path.display()),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            file_path,
            debounce_delay: debounce_delay.unwrap_or(DEFAULT_DEBOUNCE),
            watcher: None,
            watch_thread: None,
            stop_tx: None,
        })
    }

    /// Returns the canonical path of the watched file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Returns the debounce delay.
    pub fn debounce_delay(&self) -> Duration {
        self.debounce_delay
    }

    /// Returns `true` while a watch is active.
    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    fn is_relevant(event: &Event, file_path: &Path) -> bool {
        matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) | EventKind::Any
        ) && event.paths.iter().any(|p| p == file_path)
    }

    fn run(
        file_path: PathBuf,
        debounce_delay: Duration,
        events: Receiver<notify::Result<Event>>,
        stop: Receiver<()>,
        callback: ChangeCallback,
    ) {
        let key = ConfigKey::from(file_path.to_string_lossy().as_ref());
        let mut pending: Option<Instant> = None;

        loop {
            if stop.try_recv().is_ok() {
                break;
            }

            match events.recv_timeout(TICK) {
                Ok(Ok(event)) if Self::is_relevant(&event, &file_path) => {
                    pending = Some(Instant::now());
                }
                Ok(Ok(_)) => {}
                Ok(Err(e)) => tracing::warn!("File watcher error for {}: {}", file_path.display(), e),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if let Some(last) = pending {
                if last.elapsed() >= debounce_delay {
                    pending = None;
                    tracing::debug!("Payload file changed: {}", file_path.display());
                    callback(key.clone());
                }
            }
        }
    }
}

impl ConfigWatcher for FileWatcher {
    fn watch(&mut self, callback: ChangeCallback) -> Result<()> {
        if self.watcher.is_some() {
            return Err(ConfigError::WatcherError {
                message: "Watcher is already running".to_string(),
                source: None,
            });
        }

        let (event_tx, event_rx) = channel();
        let (stop_tx, stop_rx) = channel::<()>();

        let mut watcher =
            RecommendedWatcher::new(event_tx, notify::Config::default()).map_err(|e| {
                ConfigError::WatcherError {
                    message: format!("Failed to create file watcher: {}", e),
                    source: Some(Box::new(e)),
                }
            })?;

        // Watch the parent directory so atomic replace-by-rename is seen
        let watch_path = self
            .file_path
            .parent()
            .ok_or_else(|| ConfigError::WatcherError {
                message: "Failed to get parent directory".to_string(),
                source: None,
            })?
            .to_path_buf();

        watcher
            .watch(&watch_path, RecursiveMode::NonRecursive)
            .map_err(|e| ConfigError::WatcherError {
                message: format!("Failed to start watching: {}", e),
                source: Some(Box::new(e)),
            })?;

        let file_path = self.file_path.clone();
        let debounce_delay = self.debounce_delay;
        let watch_thread = thread::Builder::new()
            .name("mdmcfg-file-watcher".to_string())
            .spawn(move || Self::run(file_path, debounce_delay, event_rx, stop_rx, callback))?;

        self.watcher = Some(watcher);
        self.stop_tx = Some(stop_tx);
        self.watch_thread = Some(watch_thread);

        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        // Dropping the watcher closes the event channel
        self.watcher = None;

        if let Some(handle) = self.watch_thread.take() {
            handle.join().map_err(|_| ConfigError::WatcherError {
                message: "Failed to join watcher thread".to_string(),
                source: None,
            })?;
        }

        Ok(())
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
