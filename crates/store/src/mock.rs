//! In-memory distribution source for testing.

use crate::error::{ErrorKind, Result};
use crate::source::DistSource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory [`DistSource`] for testing.
///
/// Holds distribution bytes in a `HashMap` keyed by normalized
/// (name, version, filename) and counts how many fetches were served, so
/// tests can assert download-once cache behavior without network or disk.
///
/// # Examples
///
/// ```
/// use oven_store::MockSource;
///
/// let source = MockSource::with_files([
///     (("pkg", "1.0", "pkg-1.0.tar.gz"), b"tarball bytes".to_vec()),
/// ]);
/// assert_eq!(source.fetch_count(), 0);
/// ```
pub struct MockSource {
    name: String,
    files: HashMap<(String, String, String), Vec<u8>>,
    fetches: AtomicUsize,
}

impl MockSource {
    /// Create a mock source pre-populated with distribution files.
    ///
    /// Keys are (package name, version, filename); the name should be given
    /// in normalized form, since that is what the cache asks for.
    pub fn with_files(
        files: impl IntoIterator<Item = ((impl Into<String>, impl Into<String>, impl Into<String>), Vec<u8>)>,
    ) -> Self {
        let files = files
            .into_iter()
            .map(|((name, version, filename), data)| {
                ((name.into(), version.into(), filename.into()), data)
            })
            .collect();
        Self {
            name: "mock".to_string(),
            files,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Change the name of the mock source.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of fetches served (or refused) so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl Default for MockSource {
    fn default() -> Self {
        let files: [((&str, &str, &str), Vec<u8>); 0] = [];
        Self::with_files(files)
    }
}

#[async_trait]
impl DistSource for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, name: &str, version: &str, filename: &str) -> Result<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let key = (name.to_string(), version.to_string(), filename.to_string());
        match self.files.get(&key) {
            Some(data) => Ok(data.clone()),
            None => exn::bail!(ErrorKind::Source(format!(
                "no file {filename} for {name} {version} in mock index"
            ))),
        }
    }
}
