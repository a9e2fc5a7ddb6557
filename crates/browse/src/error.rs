//! Browse Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use oven_archive::error::{Error as ArchiveError, ErrorKind as ArchiveErrorKind};
use oven_store::error::Error as StoreError;

/// A browse error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for browse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Policy refusals (too large, binary, not found, unsupported compression)
/// are **not** errors here — they come back as
/// [`FileView::Refused`](crate::FileView::Refused). These kinds cover the
/// genuinely failed calls.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The archive could not be read or decoded.
    #[display("archive error: {_0}")]
    Archive(ArchiveErrorKind),
    /// The cache store failed to produce a local distribution file.
    #[display("cache store error")]
    Store,
    /// A background blocking task failed to complete.
    #[display("background task failed")]
    Background,
}

impl ErrorKind {
    /// Convert an archive error into a browse error, preserving the archive
    /// crate's `Exn` frame (error tree) as a child in its own error tree.
    #[track_caller]
    pub fn archive(err: ArchiveError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Archive(inner))
    }

    /// Convert a store error into a browse error, keeping its frame.
    #[track_caller]
    pub fn store(err: StoreError) -> Error {
        err.raise(ErrorKind::Store)
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Archive(kind) => kind.is_retryable(),
            Self::Store | Self::Background => false,
        }
    }
}
