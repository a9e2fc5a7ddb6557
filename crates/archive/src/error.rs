//! Archive Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An archive error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The archive kind is recognized, but its compression cannot be decoded.
    #[display("unsupported compression: {_0}")]
    UnsupportedCompression(#[error(not(source))] String),
    /// The filename suffix matches no known archive kind.
    #[display("unknown archive type: {_0}")]
    UnknownArchive(#[error(not(source))] String),
    /// The requested member path is not present in the archive.
    #[display("member not found: {_0}")]
    MemberNotFound(#[error(not(source))] String),
    /// Archive headers or compressed data are corrupt. Don't retry with the same input.
    #[display("invalid or corrupted archive data")]
    InvalidData,
    /// An I/O operation on the stored archive failed.
    #[display("I/O error")]
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exn::ResultExt;

    #[test]
    fn error_kind_display() {
        assert_eq!(
            ErrorKind::UnsupportedCompression("xz".to_string()).to_string(),
            "unsupported compression: xz"
        );
        assert_eq!(
            ErrorKind::MemberNotFound("setup.py".to_string()).to_string(),
            "member not found: setup.py"
        );
        assert_eq!(ErrorKind::InvalidData.to_string(), "invalid or corrupted archive data");
        assert_eq!(ErrorKind::Io.to_string(), "I/O error");
    }

    #[test]
    fn error_kind_retryable() {
        assert!(!ErrorKind::InvalidData.is_retryable());
        assert!(!ErrorKind::UnsupportedCompression("xz".to_string()).is_retryable());
        assert!(!ErrorKind::MemberNotFound("x".to_string()).is_retryable());
        assert!(ErrorKind::Io.is_retryable());
    }

    #[test]
    fn error_from_result() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let err: Result<()> = result.or_raise(|| ErrorKind::Io);
        assert!(err.is_err());

        let exn = err.unwrap_err();
        // Exn<E> implements Deref<Target = E>
        assert_eq!(*exn, ErrorKind::Io);
    }
}
