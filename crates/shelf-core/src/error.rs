//! Error types for Steam Shelf.
//!
//! The codec itself is total in its default mode; these errors cover file
//! access, strict decoding, tree validation and platform lookups.

use std::path::PathBuf;
use thiserror::Error;

use crate::vdf::DiagnosticKind;

/// Main error type for the shelf library.
#[derive(Debug, Error)]
pub enum ShelfError {
    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    // Codec errors
    #[error("Malformed VDF at offset {offset} ({path}): {kind}")]
    Malformed {
        offset: usize,
        /// Dotted key path of the entry being decoded.
        path: String,
        kind: DiagnosticKind,
    },

    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Steam is running; close it before writing shortcuts")]
    SteamRunning,

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for shelf operations.
pub type Result<T> = std::result::Result<T, ShelfError>;

impl From<std::io::Error> for ShelfError {
    fn from(err: std::io::Error) -> Self {
        ShelfError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl ShelfError {
    /// Create an IO error with path context.
    ///
    /// `NotFound` and `PermissionDenied` kinds map to their dedicated
    /// variants so callers can match on them without digging into the source.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => ShelfError::FileNotFound(path),
            std::io::ErrorKind::PermissionDenied => ShelfError::PermissionDenied(path),
            _ => ShelfError::Io {
                message: err.to_string(),
                path: Some(path),
                source: Some(err),
            },
        }
    }

    /// Whether this error means the target file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ShelfError::FileNotFound(_))
    }
}
