//! The capability boundary to the package index.

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Shared handle to a configured distribution source.
pub type SourceHandle = Arc<dyn DistSource + Send + Sync>;

/// Produces the raw bytes of one distribution file from the package index.
///
/// The transport (HTTP client, release-metadata lookup, retry policy) lives
/// entirely with the implementor; the cache only asks for complete bytes and
/// persists them. Package names arrive already normalized
/// ([`normalize_package_name`](crate::normalize_package_name)), matching how
/// the index routes requests.
#[async_trait]
pub trait DistSource: Send + Sync {
    /// Name of the configured source (used for logging only).
    fn name(&self) -> &str;

    /// Fetch the complete contents of `filename` for `name`/`version`.
    ///
    /// Returns [`Source`](crate::error::ErrorKind::Source) when the index
    /// has no such file or the transfer fails.
    async fn fetch(&self, name: &str, version: &str, filename: &str) -> Result<Vec<u8>>;
}
