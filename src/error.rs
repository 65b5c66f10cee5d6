//! Error type shared by parsing, rendering and discovery.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Everything that can go wrong while parsing, mutating or discovering a sequence.
#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Invalid padding width {0} (must be at least 1)")]
    InvalidPadding(u32),

    #[error("No frame token in {0}")]
    NoFrameToken(String),

    #[error("Invalid basename format {0}")]
    InvalidFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported padding style: {0}")]
    UnsupportedPaddingStyle(String),

    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Glob error for pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

impl SequenceError {
    /// Classify an I/O failure from a directory query.
    ///
    /// Missing directories and access denials get their own variants so
    /// callers can match on them without digging into `io::ErrorKind`.
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => SequenceError::DirectoryNotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => SequenceError::PermissionDenied(path.to_path_buf()),
            _ => SequenceError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

pub type Result<T, E = SequenceError> = std::result::Result<T, E>;
