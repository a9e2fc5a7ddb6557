//! Facade composing the cache store, archive inspection, and content
//! classification into the two operations the presentation layer calls:
//! list a distribution's file tree, and read one member file for display.
//!
//! Archive decoding is synchronous streaming work; every call runs it under
//! [`spawn_blocking`](tokio::task::spawn_blocking) against a cloned
//! [`ArchiveHandle`], so the async boundary stays non-blocking and each call
//! owns its stream end to end. Display policy is applied in order: the size
//! guard wins over binary detection, which wins over language-tagged
//! rendering.

pub mod error;
mod view;

use crate::error::{ErrorKind, Result};
use oven_archive::error::ErrorKind as ArchiveErrorKind;
use oven_archive::{
    ArchiveHandle, FileTreeNode, ScanOptions, build_file_tree, extract_member_with,
    list_members_with,
};
use oven_config::{Config, DEFAULT_MAX_RENDER_BYTES};
use oven_inspect::{guess_language, is_binary};
use oven_store::{DistCache, SourceHandle};
use tokio::task::spawn_blocking;
use tracing::instrument;
pub use view::{FileView, Refusal};

/// Archive browsing operations over a [`DistCache`].
///
/// One `Viewer` serves many concurrent requests: every operation resolves an
/// immutable handle and opens its own read stream, so no locking is needed.
pub struct Viewer {
    cache: DistCache,
    max_render_bytes: usize,
    options: ScanOptions,
}

impl Viewer {
    /// Create a viewer with default policy (1 MiB render limit, member
    /// paths passed through untouched).
    pub fn new(cache: DistCache) -> Self {
        Self {
            cache,
            max_render_bytes: DEFAULT_MAX_RENDER_BYTES,
            options: ScanOptions::default(),
        }
    }

    /// Build a viewer from loaded configuration and a distribution source.
    pub fn from_config(config: &Config, source: SourceHandle) -> Result<Self> {
        let cache = DistCache::new(&config.cache_dir, source).map_err(ErrorKind::store)?;
        Ok(Self::new(cache)
            .with_max_render_bytes(config.max_render_bytes)
            .with_scan_options(ScanOptions {
                normalize_backslashes: config.normalize_backslashes,
            }))
    }

    /// Change the decoded-size ceiling above which files are refused.
    pub fn with_max_render_bytes(mut self, max_render_bytes: usize) -> Self {
        self.max_render_bytes = max_render_bytes;
        self
    }

    /// Change how member paths are read and matched.
    pub fn with_scan_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// List a distribution's members as a display tree.
    ///
    /// Resolves the distribution through the cache (fetching on first
    /// access), lists its members, and folds them into a hierarchy. A
    /// distribution with an unclassifiable suffix yields an empty tree.
    #[instrument(skip(self))]
    pub async fn file_tree(
        &self,
        name: &str,
        version: &str,
        filename: &str,
    ) -> Result<Vec<FileTreeNode>> {
        let handle = self.resolve(name, version, filename).await?;
        self.file_tree_for(&handle).await
    }

    /// [`file_tree`](Self::file_tree) for an already-resolved handle.
    pub async fn file_tree_for(&self, handle: &ArchiveHandle) -> Result<Vec<FileTreeNode>> {
        let handle = handle.clone();
        let options = self.options;
        let members = spawn_blocking(move || list_members_with(&handle, options))
            .await
            .map_err(|_| exn::Exn::from(ErrorKind::Background))?
            .map_err(ErrorKind::archive)?;
        Ok(build_file_tree(members))
    }

    /// Read one member file for display.
    ///
    /// Not-found and unsupported-compression conditions come back as
    /// [`FileView::Refused`] values for the presentation layer to render;
    /// corrupt archives, unknown archive types, and I/O failures are errors.
    #[instrument(skip(self))]
    pub async fn file_view(
        &self,
        name: &str,
        version: &str,
        filename: &str,
        member: &str,
    ) -> Result<FileView> {
        let handle = self.resolve(name, version, filename).await?;
        self.file_view_for(&handle, member).await
    }

    /// [`file_view`](Self::file_view) for an already-resolved handle.
    pub async fn file_view_for(&self, handle: &ArchiveHandle, member: &str) -> Result<FileView> {
        let task_handle = handle.clone();
        let task_member = member.to_string();
        let options = self.options;
        let extracted = spawn_blocking(move || extract_member_with(&task_handle, &task_member, options))
            .await
            .map_err(|_| exn::Exn::from(ErrorKind::Background))?;

        let content = match extracted {
            Ok(content) => content,
            Err(err) => {
                let refusal = match &*err {
                    ArchiveErrorKind::MemberNotFound(_) => Some(Refusal::NotFound),
                    ArchiveErrorKind::UnsupportedCompression(_) => {
                        Some(Refusal::UnsupportedCompression)
                    },
                    _ => None,
                };
                return match refusal {
                    Some(refusal) => Ok(FileView::Refused(refusal)),
                    None => Err(ErrorKind::archive(err)),
                };
            },
        };

        // Size guard first, then binary detection, then render.
        if content.len() > self.max_render_bytes {
            return Ok(FileView::Refused(Refusal::TooLarge));
        }
        if is_binary(&content) {
            return Ok(FileView::Refused(Refusal::Binary));
        }
        let language = guess_language(member);
        Ok(FileView::Rendered { content, language })
    }

    async fn resolve(&self, name: &str, version: &str, filename: &str) -> Result<ArchiveHandle> {
        self.cache.resolve(name, version, filename).await.map_err(ErrorKind::store)
    }
}
