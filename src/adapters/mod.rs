// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing store, parser and watcher implementations.
//!
//! Each store implements the [`RawStore`](crate::ports::RawStore) port. Formats
//! and sources other than memory are behind feature flags.

#[cfg(feature = "env")]
pub mod env_var;
#[cfg(any(feature = "yaml", feature = "json"))]
pub mod file;
#[cfg(feature = "json")]
pub mod json;
pub mod memory;
pub mod shared;
#[cfg(feature = "yaml")]
pub mod yaml;

pub mod watchers;

// Re-export adapters based on feature flags
#[cfg(feature = "env")]
pub use env_var::EnvVarStore;
#[cfg(any(feature = "yaml", feature = "json"))]
pub use file::FileStore;
#[cfg(feature = "json")]
pub use json::JsonParser;
pub use memory::MemoryStore;
pub use shared::SharedStore;
#[cfg(feature = "reload")]
pub use watchers::FileWatcher;
#[cfg(feature = "yaml")]
pub use yaml::YamlParser;
