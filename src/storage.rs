//! Storage backend trait and implementations

use crate::error::{Error, Result};
use crate::properties::{self, PropertyMap};
use log::debug;
use std::io::{BufWriter, Write};
use std::path::Path;
use time::OffsetDateTime;
use time::macros::format_description;

/// Trait for storage backend implementations
///
/// The store only deals in flat string maps; a backend decides how they are
/// laid out on disk.
pub trait StorageBackend: Clone + Send + Sync {
    /// Decode file content into a map
    ///
    /// `path` is only used for error context.
    fn deserialize(&self, path: &Path, content: &str) -> Result<PropertyMap>;

    /// Encode a map as file content
    fn serialize(&self, entries: &PropertyMap, header: Option<&str>) -> String;

    /// Read and decode a file
    ///
    /// Content that is not valid UTF-8 is decoded as ISO-8859-1. A valid UTF-8
    /// decode always wins, even for Latin-1 bytes that happen to form UTF-8.
    fn read(&self, path: &Path) -> Result<PropertyMap> {
        let bytes = std::fs::read(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(err) => {
                debug!("{} is not UTF-8, decoding as ISO-8859-1", path.display());
                err.into_bytes().into_iter().map(char::from).collect()
            }
        };
        self.deserialize(path, &content)
    }

    /// Encode and write a file, creating missing parent directories
    ///
    /// Any existing content is replaced.
    fn write(&self, path: &Path, entries: &PropertyMap, header: Option<&str>) -> Result<()> {
        let content = self.serialize(entries, header);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let write_err = |e: std::io::Error| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        };
        let file = std::fs::File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes()).map_err(write_err)?;
        writer.flush().map_err(write_err)
    }
}

// =============================================================================
// Properties Storage Implementation
// =============================================================================

/// `.properties` storage backend (default)
#[derive(Clone, Debug)]
pub struct PropertiesStorage {
    /// Write a timestamp comment after the header
    timestamp: bool,
}

impl PropertiesStorage {
    /// Create a backend that stamps each written file with the current time
    pub fn new() -> Self {
        Self { timestamp: true }
    }

    /// Create a backend without the timestamp comment (reproducible output)
    pub fn without_timestamp() -> Self {
        Self { timestamp: false }
    }
}

impl Default for PropertiesStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn now_stamp() -> Option<String> {
    let format = format_description!(
        "[weekday repr:short] [month repr:short] [day] [hour]:[minute]:[second] UTC [year]"
    );
    OffsetDateTime::now_utc().format(&format).ok()
}

impl StorageBackend for PropertiesStorage {
    fn deserialize(&self, path: &Path, content: &str) -> Result<PropertyMap> {
        properties::parse(content).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            line: e.line,
            reason: e.reason,
        })
    }

    fn serialize(&self, entries: &PropertyMap, header: Option<&str>) -> String {
        let stamp = if self.timestamp { now_stamp() } else { None };
        properties::serialize(entries, header, stamp.as_deref())
    }
}

// =============================================================================
// Tests
// =============================================================================
