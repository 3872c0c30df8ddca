//! Error types for propstore

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for propstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for propstore
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Format Errors
    // -------------------------------------------------------------------------
    #[error("Malformed properties file '{path}' at line {line}: {reason}")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    // -------------------------------------------------------------------------
    // Value Errors
    // -------------------------------------------------------------------------
    #[error("Property '{key}' holds '{value}', which is not an integer: {source}")]
    InvalidInt {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl Error {
    /// Check if this error came from the filesystem
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            Error::FileRead { .. } | Error::FileWrite { .. } | Error::DirectoryCreate { .. }
        )
    }

    /// Check if this error came from malformed content (file or stored value)
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse { .. } | Error::InvalidInt { .. })
    }

    /// Path of the file involved, if any
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Error::FileRead { path, .. }
            | Error::FileWrite { path, .. }
            | Error::DirectoryCreate { path, .. }
            | Error::Parse { path, .. } => Some(path),
            _ => None,
        }
    }
}
