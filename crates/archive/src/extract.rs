//! Single-member extraction from stored distribution archives.

use crate::error::{ErrorKind, Result};
use crate::list::member_name;
use crate::{ArchiveHandle, ArchiveKind, ScanOptions};
use exn::ResultExt;
use std::fs::File;
use std::io::{BufReader, Read};
use tracing::instrument;

/// Extract the decoded bytes of exactly one member path.
///
/// The match is exact and case-sensitive against the full member path; no
/// prefix or fuzzy matching. Fails with
/// [`MemberNotFound`](ErrorKind::MemberNotFound) when no member matches and
/// [`UnknownArchive`](ErrorKind::UnknownArchive) when the filename suffix is
/// unclassifiable.
///
/// Zip kinds load the archive into memory once and read the one named entry;
/// index size limits keep that bounded in practice, though very large wheels
/// pay for it. Tar kinds stream entries through the decompression stage and
/// stop scanning at the first match, so each extraction is one pass over at
/// most the whole archive; nothing is cached across calls. The underlying
/// file and decoder are released on every exit path — match, exhaustion, or
/// decode error — by dropping the reader chain.
pub fn extract_member(handle: &ArchiveHandle, member: &str) -> Result<Vec<u8>> {
    extract_member_with(handle, member, ScanOptions::default())
}

/// [`extract_member`] with explicit scan options.
#[instrument(skip(handle, options), fields(original = handle.original_filename(), size))]
pub fn extract_member_with(
    handle: &ArchiveHandle,
    member: &str,
    options: ScanOptions,
) -> Result<Vec<u8>> {
    let Some(kind) = ArchiveKind::from_filename(handle.original_filename()) else {
        exn::bail!(ErrorKind::UnknownArchive(handle.original_filename().to_string()));
    };
    if !kind.is_supported() {
        exn::bail!(ErrorKind::UnsupportedCompression(kind.as_str().to_string()));
    }

    let content = if kind.is_tar() {
        extract_tar(handle, kind, member, options)?
    } else {
        extract_zip(handle, member, options)?
    };
    tracing::Span::current().record("size", content.len());
    Ok(content)
}

fn extract_zip(handle: &ArchiveHandle, member: &str, options: ScanOptions) -> Result<Vec<u8>> {
    let data = std::fs::read(handle.path()).or_raise(|| ErrorKind::Io)?;
    let mut archive =
        zip::ZipArchive::new(std::io::Cursor::new(data)).or_raise(|| ErrorKind::InvalidData)?;

    // Metadata-only scan for the matching entry, then a single decode.
    let mut found = None;
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index).or_raise(|| ErrorKind::InvalidData)?;
        if options.normalize(entry.name()) == member {
            found = Some(index);
            break;
        }
    }
    let Some(index) = found else {
        exn::bail!(ErrorKind::MemberNotFound(member.to_string()));
    };

    let mut entry = archive.by_index(index).or_raise(|| ErrorKind::InvalidData)?;
    let mut content = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut content).or_raise(|| ErrorKind::InvalidData)?;
    Ok(content)
}

fn extract_tar(
    handle: &ArchiveHandle,
    kind: ArchiveKind,
    member: &str,
    options: ScanOptions,
) -> Result<Vec<u8>> {
    let file = File::open(handle.path()).or_raise(|| ErrorKind::Io)?;
    let reader = kind.wrap_reader(BufReader::new(file))?;
    let mut archive = tar::Archive::new(reader);
    for entry in archive.entries().or_raise(|| ErrorKind::InvalidData)? {
        let mut entry = entry.or_raise(|| ErrorKind::InvalidData)?;
        if options.normalize(&member_name(&entry)) == member {
            let mut content = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut content).or_raise(|| ErrorKind::InvalidData)?;
            // Returning here abandons the rest of the stream; dropping the
            // entry iterator closes the decoder and file.
            return Ok(content);
        }
    }
    exn::bail!(ErrorKind::MemberNotFound(member.to_string()))
}
