//! Member listing for stored distribution archives.

use crate::error::{ErrorKind, Result};
use crate::{ArchiveHandle, ArchiveKind, ScanOptions};
use exn::ResultExt;
use std::fs::File;
use std::io::BufReader;
use tar::Entry;
use tracing::instrument;

/// List every member path inside the archive, in archive order.
///
/// Zip kinds enumerate all stored entry names, directory markers included.
/// Tar kinds walk header entries through the decompression stage for the
/// kind, discarding entry bodies as they go. An unknown archive kind yields
/// an empty list; the xz family fails with
/// [`UnsupportedCompression`](ErrorKind::UnsupportedCompression) before any
/// stream is opened.
///
/// Each call opens (and closes, on every exit path) its own read stream, so
/// concurrent listings of the same handle need no coordination.
pub fn list_members(handle: &ArchiveHandle) -> Result<Vec<String>> {
    list_members_with(handle, ScanOptions::default())
}

/// [`list_members`] with explicit scan options.
#[instrument(skip(handle, options), fields(original = handle.original_filename(), kind, members))]
pub fn list_members_with(handle: &ArchiveHandle, options: ScanOptions) -> Result<Vec<String>> {
    let Some(kind) = ArchiveKind::from_filename(handle.original_filename()) else {
        return Ok(Vec::new());
    };
    tracing::Span::current().record("kind", kind.as_str());
    if !kind.is_supported() {
        exn::bail!(ErrorKind::UnsupportedCompression(kind.as_str().to_string()));
    }

    let members = if kind.is_tar() {
        list_tar(handle, kind, options)?
    } else {
        list_zip(handle, options)?
    };
    tracing::Span::current().record("members", members.len());
    Ok(members)
}

fn list_zip(handle: &ArchiveHandle, options: ScanOptions) -> Result<Vec<String>> {
    // The whole archive is read once; zip needs random access to the central
    // directory and index size limits keep wheels bounded.
    let data = std::fs::read(handle.path()).or_raise(|| ErrorKind::Io)?;
    let mut archive =
        zip::ZipArchive::new(std::io::Cursor::new(data)).or_raise(|| ErrorKind::InvalidData)?;
    let mut members = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index).or_raise(|| ErrorKind::InvalidData)?;
        members.push(options.normalize(entry.name()));
    }
    Ok(members)
}

fn list_tar(handle: &ArchiveHandle, kind: ArchiveKind, options: ScanOptions) -> Result<Vec<String>> {
    let file = File::open(handle.path()).or_raise(|| ErrorKind::Io)?;
    let reader = kind.wrap_reader(BufReader::new(file))?;
    let mut archive = tar::Archive::new(reader);
    let mut members = Vec::new();
    for entry in archive.entries().or_raise(|| ErrorKind::InvalidData)? {
        let entry = entry.or_raise(|| ErrorKind::InvalidData)?;
        members.push(options.normalize(&member_name(&entry)));
    }
    Ok(members)
}

/// Header name of a tar entry, `/`-separated, lossily decoded.
pub(crate) fn member_name<R: std::io::Read>(entry: &Entry<'_, R>) -> String {
    String::from_utf8_lossy(&entry.path_bytes()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{bzipped, gzipped, store, tar_bytes, zip_bytes};

    #[test]
    fn zip_lists_all_entries_including_directories() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = zip_bytes(
            &[("pkg/__init__.py", b"" as &[u8]), ("pkg/core.py", b"x = 1\n"), ("setup.py", b"")],
            &["pkg"],
        );
        let handle = store(dir.path(), "pkg-1.0-py3-none-any.whl", &bytes);
        let members = list_members(&handle).unwrap();
        assert_eq!(members, vec!["pkg/", "pkg/__init__.py", "pkg/core.py", "setup.py"]);
    }

    #[test]
    fn single_entry_zip() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = zip_bytes(&[("hello.txt", b"hi")], &[]);
        let handle = store(dir.path(), "pkg-1.0.zip", &bytes);
        assert_eq!(list_members(&handle).unwrap(), vec!["hello.txt"]);
    }

    #[test]
    fn plain_tar_lists_header_entries() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = tar_bytes(&[("pkg-1.0/PKG-INFO", b"Name: pkg\n"), ("pkg-1.0/setup.py", b"")]);
        let handle = store(dir.path(), "pkg-1.0.tar", &bytes);
        assert_eq!(list_members(&handle).unwrap(), vec!["pkg-1.0/PKG-INFO", "pkg-1.0/setup.py"]);
    }

    #[test]
    fn gzip_tar_pipes_through_inflate_stage() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = gzipped(&tar_bytes(&[("pkg-1.0/setup.py", b"from setuptools import setup\n")]));
        let handle = store(dir.path(), "pkg-1.0.tar.gz", &bytes);
        assert_eq!(list_members(&handle).unwrap(), vec!["pkg-1.0/setup.py"]);
    }

    #[test]
    fn bzip2_tar_pipes_through_inflate_stage() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = bzipped(&tar_bytes(&[("pkg-1.0/setup.py", b"")]));
        let handle = store(dir.path(), "pkg-1.0.tar.bz2", &bytes);
        assert_eq!(list_members(&handle).unwrap(), vec!["pkg-1.0/setup.py"]);
    }

    #[test]
    fn unknown_kind_lists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let handle = store(dir.path(), "pkg-1.0.egg", b"not an archive");
        assert_eq!(list_members(&handle).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn xz_fails_without_decoding() {
        let dir = tempfile::tempdir().unwrap();
        // Deliberately garbage content: classification must reject the kind
        // before any decode is attempted.
        let handle = store(dir.path(), "pkg-1.0.tar.xz", b"\xFD7zXZ\x00garbage");
        let err = list_members(&handle).unwrap_err();
        assert_eq!(*err, ErrorKind::UnsupportedCompression("tar.xz".to_string()));
    }

    #[test]
    fn corrupt_gzip_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let handle = store(dir.path(), "pkg-1.0.tar.gz", b"definitely not gzip");
        let err = list_members(&handle).unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidData);
    }

    #[test]
    fn missing_file_is_io() {
        let handle = ArchiveHandle::new("/nonexistent/path.dist", "pkg-1.0.tar");
        let err = list_members(&handle).unwrap_err();
        assert_eq!(*err, ErrorKind::Io);
    }

    #[test]
    fn backslash_normalization_is_opt_in() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = zip_bytes(&[("win\\style.txt", b"x")], &[]);
        let handle = store(dir.path(), "pkg-1.0.zip", &bytes);
        assert_eq!(list_members(&handle).unwrap(), vec!["win\\style.txt"]);
        let normalized = list_members_with(&handle, ScanOptions { normalize_backslashes: true }).unwrap();
        assert_eq!(normalized, vec!["win/style.txt"]);
    }
}
