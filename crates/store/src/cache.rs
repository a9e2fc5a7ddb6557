//! Fetch-once local cache of distribution files.

use crate::error::{ErrorKind, Result};
use crate::name::{normalize_package_name, stored_filename};
use crate::source::SourceHandle;
use oven_archive::ArchiveHandle;
use std::fs::create_dir_all as sync_create_dir;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::instrument;

/// Local cache mapping (package, version, distribution filename) to a stored
/// file, fetching through a [`DistSource`](crate::DistSource) on first
/// access.
///
/// Stored files are content-addressed by coordinate hash
/// and immutable once in place; the returned [`ArchiveHandle`] carries the
/// original distribution filename for kind classification. Eviction is not
/// the cache's concern — the directory is the operator's to prune.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use oven_store::{DistCache, DistSource, error::{ErrorKind, Result}};
///
/// struct Index;
///
/// #[async_trait]
/// impl DistSource for Index {
///     fn name(&self) -> &str {
///         "pypi"
///     }
///     async fn fetch(&self, name: &str, version: &str, filename: &str) -> Result<Vec<u8>> {
///         // The HTTP transport to the index lives with the caller.
///         exn::bail!(ErrorKind::Source(format!("offline: {name} {version} {filename}")))
///     }
/// }
///
/// # async fn example() -> Result<()> {
/// let cache = DistCache::new("/var/cache/oven", Arc::new(Index))?;
/// let handle = cache.resolve("requests", "2.31.0", "requests-2.31.0.tar.gz").await?;
/// assert_eq!(handle.original_filename(), "requests-2.31.0.tar.gz");
/// # Ok(())
/// # }
/// ```
pub struct DistCache {
    root: PathBuf,
    source: SourceHandle,
}

impl std::fmt::Debug for DistCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistCache")
            .field("root", &self.root)
            .field("source", &self.source.name())
            .finish()
    }
}

impl DistCache {
    /// Create a cache rooted at an absolute directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRoot`](ErrorKind::InvalidRoot) if the path is not
    /// absolute or exists and is not a directory.
    pub fn new(root: impl AsRef<Path>, source: SourceHandle) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidRoot(format!("{} is not absolute", root.display())));
        }
        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::InvalidRoot(format!("{} is not a directory", root.display())));
            }
        } else {
            // Use non-async here; it'll only happen once on cache
            // initialization and it's not worth making the constructor async.
            sync_create_dir(&root).map_err(ErrorKind::Io)?;
        }
        Ok(Self { root, source })
    }

    /// Root directory distribution files are stored under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return a handle to the locally stored distribution, fetching and
    /// persisting it first if this is the first access.
    ///
    /// The package name is normalized before both the cache lookup and the
    /// source fetch, so every spelling of a name shares one cache slot.
    /// Concurrent first requests for the same file may both fetch; the
    /// temp-file-plus-rename persist keeps every observer reading a complete
    /// file regardless of who wins.
    #[instrument(skip(self), fields(source = self.source.name(), cache_hit))]
    pub async fn resolve(&self, name: &str, version: &str, filename: &str) -> Result<ArchiveHandle> {
        if name.trim().is_empty() || version.is_empty() || filename.is_empty() {
            exn::bail!(ErrorKind::InvalidName(format!(
                "empty coordinate in ({name:?}, {version:?}, {filename:?})"
            )));
        }
        let normalized = normalize_package_name(name);
        let path = self.root.join(stored_filename(&normalized, version, filename));

        let cached = fs::try_exists(&path).await.map_err(ErrorKind::Io)?;
        tracing::Span::current().record("cache_hit", cached);
        if cached {
            return Ok(ArchiveHandle::new(path, filename));
        }

        let bytes = self.source.fetch(&normalized, version, filename).await?;
        self.persist(path.clone(), bytes).await?;
        Ok(ArchiveHandle::new(path, filename))
    }

    /// Write under a temporary name in the cache root, then rename into
    /// place. The rename is what makes concurrent first-fetches safe: a
    /// loser's rename just replaces identical bytes, and no reader ever
    /// observes a partial file.
    async fn persist(&self, target: PathBuf, bytes: Vec<u8>) -> Result<()> {
        let root = self.root.clone();
        let written = tokio::task::spawn_blocking(move || -> Result<()> {
            let mut staged = tempfile::NamedTempFile::new_in(&root).map_err(ErrorKind::Io)?;
            staged.write_all(&bytes).map_err(ErrorKind::Io)?;
            staged.persist(&target).map_err(|err| ErrorKind::Io(err.error))?;
            Ok(())
        })
        .await;
        match written {
            Ok(result) => result,
            Err(join) => exn::bail!(ErrorKind::Io(std::io::Error::other(join))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSource;
    use std::sync::Arc;

    fn tarball_mock() -> Arc<MockSource> {
        Arc::new(MockSource::with_files([(
            ("pkg", "1.0", "pkg-1.0.tar.gz"),
            b"pretend tarball bytes".to_vec(),
        )]))
    }

    #[test]
    fn new_requires_absolute_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(DistCache::new(temp_dir.path(), Arc::new(MockSource::default())).is_ok());
        let err = DistCache::new("relative/cache", Arc::new(MockSource::default())).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidRoot(_)));
    }

    #[test]
    fn new_creates_missing_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("nested");
        DistCache::new(&root, Arc::new(MockSource::default())).unwrap();
        assert!(root.is_dir());
    }

    #[tokio::test]
    async fn first_resolve_fetches_and_persists() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = tarball_mock();
        let cache = DistCache::new(temp_dir.path(), source.clone()).unwrap();

        let handle = cache.resolve("pkg", "1.0", "pkg-1.0.tar.gz").await.unwrap();
        assert_eq!(source.fetch_count(), 1);
        assert_eq!(handle.original_filename(), "pkg-1.0.tar.gz");
        assert_eq!(std::fs::read(handle.path()).unwrap(), b"pretend tarball bytes");
        assert!(handle.path().starts_with(temp_dir.path()));
    }

    #[tokio::test]
    async fn second_resolve_is_a_cache_hit() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = tarball_mock();
        let cache = DistCache::new(temp_dir.path(), source.clone()).unwrap();

        let first = cache.resolve("pkg", "1.0", "pkg-1.0.tar.gz").await.unwrap();
        let second = cache.resolve("pkg", "1.0", "pkg-1.0.tar.gz").await.unwrap();
        assert_eq!(source.fetch_count(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn name_spellings_share_one_cache_slot() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = tarball_mock();
        let cache = DistCache::new(temp_dir.path(), source.clone()).unwrap();

        cache.resolve("Pkg", "1.0", "pkg-1.0.tar.gz").await.unwrap();
        cache.resolve("pkg", "1.0", "pkg-1.0.tar.gz").await.unwrap();
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn unknown_distribution_surfaces_source_error_without_residue() {
        let temp_dir = tempfile::tempdir().unwrap();
        let cache = DistCache::new(temp_dir.path(), Arc::new(MockSource::default())).unwrap();

        let err = cache.resolve("ghost", "0.1", "ghost-0.1.whl").await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Source(_)));
        // A failed fetch must leave nothing behind in the cache root.
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn empty_coordinates_are_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let cache = DistCache::new(temp_dir.path(), Arc::new(MockSource::default())).unwrap();

        for (name, version, filename) in [("", "1.0", "x.whl"), ("pkg", "", "x.whl"), ("pkg", "1.0", "")] {
            let err = cache.resolve(name, version, filename).await.unwrap_err();
            assert!(matches!(&*err, ErrorKind::InvalidName(_)));
        }
    }
}
