// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payload file store adapter.
//!
//! This module provides a store that reads a payload document from disk. The parser
//! is chosen from the file extension among the enabled formats.

use crate::domain::{ConfigError, ConfigKey, Payload, RawValue, Result};
use crate::ports::{PayloadParser, RawStore};
use directories::ProjectDirs;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed size for payload files (10MB)
/// This prevents denial of service attacks via extremely large files
const MAX_PAYLOAD_FILE_SIZE: u64 = 10 * 1024 * 1024;

const STORE_NAME: &str = "file";

/// Store adapter for payload files.
///
/// Supports automatic discovery of payload files in OS-appropriate locations, as
/// well as custom file paths. The whole document is parsed up front; lookups never
/// touch the disk. Call [`reload`](Self::reload) to pick up changes.
///
/// # Examples
///
/// ```rust,no_run
/// use mdmcfg::adapters::FileStore;
///
/// // Load from a specific file
/// let store = FileStore::from_file("/etc/mdm/managed.yaml").unwrap();
///
/// // Load from default OS location
/// let store = FileStore::from_default_location("agent", "com.example").unwrap();
/// ```
pub struct FileStore {
    /// Canonical path to the payload file
    file_path: PathBuf,
    /// Parsed payload
    values: Payload,
    /// Parser matching the file format
    parser: Box<dyn PayloadParser>,
}

impl FileStore {
    /// Loads a payload file, choosing the parser from its extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SourceError` if the path is inaccessible, too large or
    /// has an unsupported extension, and `ConfigError::ParseError` if the document is
    /// malformed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let parser = parser_for_path(path.as_ref())?;
        Self::with_parser(path, parser)
    }

    /// Loads a payload file with an explicit parser, ignoring the extension.
    pub fn with_parser<P: AsRef<Path>>(path: P, parser: Box<dyn PayloadParser>) -> Result<Self> {
        let file_path = canonical_path(path.as_ref())?;
        let values = read_payload(&file_path, parser.as_ref())?;

        tracing::debug!(
            "Loaded {} payload entries from {}",
            values.len(),
            file_path.display()
        );

        Ok(Self {
            file_path,
            values,
            parser,
        })
    }

    /// Loads `config.yaml` from the OS-appropriate configuration directory.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "agent")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    #[cfg(feature = "yaml")]
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        Self::with_filename(app_name, qualifier, "config.yaml")
    }

    /// Loads a named payload file from the OS-appropriate configuration directory.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use mdmcfg::adapters::FileStore;
    ///
    /// let store = FileStore::with_filename("agent", "com.example", "managed.json").unwrap();
    /// ```
    pub fn with_filename(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                store_name: STORE_NAME.to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        Self::from_file(proj_dirs.config_dir().join(filename))
    }

    /// Returns the canonical path to the payload file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Returns the parsed payload.
    pub fn payload(&self) -> &Payload {
        &self.values
    }

    /// Consumes the store and returns its payload.
    pub fn into_payload(self) -> Payload {
        self.values
    }

    /// Re-reads and re-parses the file.
    ///
    /// On error the previously loaded payload is kept.
    pub fn reload(&mut self) -> Result<()> {
        self.values = read_payload(&self.file_path, self.parser.as_ref())?;
        tracing::debug!(
            "Reloaded {} payload entries from {}",
            self.values.len(),
            self.file_path.display()
        );
        Ok(())
    }
}

impl fmt::Debug for FileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStore")
            .field("file_path", &self.file_path)
            .field("values", &self.values)
            .field("extensions", &self.parser.supported_extensions())
            .finish()
    }
}

impl RawStore for FileStore {
    fn name(&self) -> &str {
        STORE_NAME
    }

    fn get(&self, key: &ConfigKey) -> Option<RawValue> {
        self.values.get(key.as_str()).cloned()
    }

    fn keys(&self) -> Vec<ConfigKey> {
        self.values
            .keys()
            .map(|k| ConfigKey::from(k.as_str()))
            .collect()
    }
}

/// Returns the file name for error messages without leaking the full path.
fn display_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
}

fn source_error(message: String, err: std::io::Error) -> ConfigError {
    ConfigError::SourceError {
        store_name: STORE_NAME.to_string(),
        message,
        source: Some(Box::new(err)),
    }
}

/// Picks a parser for `path` among the enabled formats.
pub(crate) fn parser_for_path(path: &Path) -> Result<Box<dyn PayloadParser>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    let mut candidates: Vec<Box<dyn PayloadParser>> = Vec::new();
    #[cfg(feature = "yaml")]
    candidates.push(Box::new(crate::adapters::YamlParser::new()));
    #[cfg(feature = "json")]
    candidates.push(Box::new(crate::adapters::JsonParser::new()));

    candidates
        .into_iter()
        .find(|parser| parser.supports(extension))
        .ok_or_else(|| ConfigError::SourceError {
            store_name: STORE_NAME.to_string(),
            message: format!(
                "Unsupported payload file extension '{}': {}",
                extension,
                display_name(path)
            ),
            source: None,
        })
}

/// Canonicalizes a path to prevent directory traversal attacks.
pub(crate) fn canonical_path(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|e| {
        source_error(
            format!("Invalid or inaccessible path: {}", display_name(path)),
            e,
        )
    })
}

/// Reads and parses a payload file after checking its size.
pub(crate) fn read_payload(path: &Path, parser: &dyn PayloadParser) -> Result<Payload> {
    let metadata = fs::metadata(path).map_err(|e| {
        source_error(
            format!("Failed to read file metadata: {}", display_name(path)),
            e,
        )
    })?;

    if metadata.len() > MAX_PAYLOAD_FILE_SIZE {
        return Err(ConfigError::SourceError {
            store_name: STORE_NAME.to_string(),
            message: format!(
                "Payload file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_PAYLOAD_FILE_SIZE
            ),
            source: None,
        });
    }

    let content = fs::read_to_string(path).map_err(|e| {
        source_error(
            format!("Failed to read payload file: {}", display_name(path)),
            e,
        )
    })?;

    parser.parse(&content)
}
