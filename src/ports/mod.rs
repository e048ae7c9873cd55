// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! The accessor depends only on [`RawStore`]. Parsers and watchers are the seams the
//! adapters use to load and refresh payload documents.

pub mod parser;
pub mod store;
pub mod watcher;

// Re-export commonly used types
pub use parser::PayloadParser;
pub use store::RawStore;
pub use watcher::{ChangeCallback, ConfigWatcher};
