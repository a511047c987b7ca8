//! Error types for the backward scan engine.
//!
//! Library code returns [`TailError`]; binaries and commands wrap it with
//! `anyhow` context. Reaching the beginning of the file is never an error.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why the byte at a window edge was not the delimiter the engine expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryFault {
    /// The resume cursor does not sit right after a newline.
    CursorNotAtDelimiter,
    /// A reconstructed line is longer than the configured window size.
    LineExceedsWindow,
}

impl fmt::Display for BoundaryFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryFault::CursorNotAtDelimiter => f.write_str("cursor is not at a line boundary"),
            BoundaryFault::LineExceedsWindow => f.write_str("line is longer than the window size"),
        }
    }
}

#[derive(Error, Debug)]
pub enum TailError {
    /// Open, stat or read failure on the log file
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Log file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// `offset` is the distance from EOF where the mismatch was detected.
    #[error("Boundary mismatch at offset {offset} (window size {window_size}): {fault}")]
    BoundaryMismatch {
        offset: u64,
        window_size: usize,
        fault: BoundaryFault,
    },

    #[error("Cursor {cursor} is beyond the end of a {file_size} byte file")]
    CursorOutOfRange { cursor: u64, file_size: u64 },

    #[error("Requested line count must be positive")]
    InvalidLineCount,

    #[error("Scan cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, TailError>;

impl TailError {
    /// Wrap an io::Error, promoting `NotFound` to [`TailError::FileNotFound`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// True when the error was caused by the caller's input rather than by the
    /// file system or the engine's configuration.
    pub fn is_bad_input(&self) -> bool {
        matches!(
            self,
            TailError::InvalidLineCount
                | TailError::CursorOutOfRange { .. }
                | TailError::BoundaryMismatch {
                    fault: BoundaryFault::CursorNotAtDelimiter,
                    ..
                }
        )
    }
}
