//! Local distribution-file cache for the package browser.
//!
//! The archive subsystem never talks to the index directly: it asks this
//! crate for "a local file path for package X, version Y, filename Z".
//! [`DistCache`] answers from disk when it can and otherwise pulls the bytes
//! through a [`DistSource`] — the one trait the HTTP layer implements — and
//! persists them atomically before handing back an
//! [`ArchiveHandle`](oven_archive::ArchiveHandle).

mod cache;
pub mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod name;
mod source;

pub use crate::cache::DistCache;
#[cfg(any(test, feature = "mock"))]
pub use crate::mock::MockSource;
pub use crate::name::normalize_package_name;
pub use crate::source::{DistSource, SourceHandle};
