use std::path::{Path, PathBuf};

/// Reference to a locally stored distribution file.
///
/// The on-disk name is content-addressed by the cache store, so the original
/// distribution filename travels alongside the path; kind classification
/// always runs against the original name, never the storage name. Immutable
/// once created; listing and extraction only borrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveHandle {
    path: PathBuf,
    original_filename: String,
}

impl ArchiveHandle {
    /// Create a handle from a stored file path and the distribution filename
    /// it was downloaded as.
    ///
    /// # Examples
    ///
    /// ```
    /// use oven_archive::ArchiveHandle;
    ///
    /// let handle = ArchiveHandle::new("/cache/3f9a.dist", "requests-2.31.0.tar.gz");
    /// assert_eq!(handle.original_filename(), "requests-2.31.0.tar.gz");
    /// ```
    pub fn new(path: impl Into<PathBuf>, original_filename: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            original_filename: original_filename.into(),
        }
    }

    /// Path of the stored archive on local storage.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The distribution filename as published by the index, carrying the
    /// real archive suffix.
    pub fn original_filename(&self) -> &str {
        &self.original_filename
    }
}
