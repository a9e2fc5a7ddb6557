//! Store Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::io::Error as IoError;

/// A store error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The package index could not produce the requested distribution file.
    #[display("source error: {_0}")]
    Source(#[error(not(source))] String),
    /// Package name, version, or filename failed validation.
    #[display("invalid distribution coordinates: {_0}")]
    InvalidName(#[error(not(source))] String),
    /// The cache root is unusable (not absolute, or not a directory).
    #[display("invalid cache root: {_0}")]
    InvalidRoot(#[error(not(source))] String),
    /// Underlying I/O error on the cache directory.
    #[display("I/O error: {_0}")]
    Io(IoError),
}

impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Source(_))
    }
}
