use crate::error::{ErrorKind, Result};
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io::Read;

const ZIP_SUFFIXES: &[&str] = &[".zip", ".whl"];
const GZ_SUFFIXES: &[&str] = &[".tar.gz", ".tgz"];
const BZ_SUFFIXES: &[&str] = &[".tar.bz2", ".tbz"];
const XZ_SUFFIXES: &[&str] = &[".tar.xz", ".txz", ".tlz", ".tar.lz", ".tar.lzma"];

const ZIP_MAGIC: [u8; 2] = [0x50, 0x4B];
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
const BZIP2_MAGIC: [u8; 3] = [0x42, 0x5A, 0x68];
const XZ_MAGIC: [u8; 6] = [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];
// Plain tar has no leading magic; POSIX/GNU headers carry `ustar` at a
// fixed offset instead.
const TAR_MAGIC: &[u8; 5] = b"ustar";
const TAR_MAGIC_OFFSET: usize = 257;

/// A recognized distribution archive kind.
///
/// Classification is by suffix of the *original* distribution filename
/// ([`from_filename`](Self::from_filename)); an unmatched suffix is an
/// unknown archive, represented as `None` rather than a variant. The xz
/// family is recognized so callers get a precise "unsupported compression"
/// condition instead of a generic one, but it is never decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    /// Zip container (.zip, .whl)
    Zip,
    /// Uncompressed tarball (.tar)
    Tar,
    /// Gzip-compressed tarball (.tar.gz, .tgz)
    TarGz,
    /// Bzip2-compressed tarball (.tar.bz2, .tbz)
    TarBz2,
    /// Xz/lzma-compressed tarball (.tar.xz family) — recognized, never decoded
    TarXz,
}

impl ArchiveKind {
    /// Classify an original distribution filename by suffix.
    ///
    /// Matching is case-sensitive, mirroring how the package index publishes
    /// filenames. No content sniffing happens here; see
    /// [`from_magic_bytes`](Self::from_magic_bytes) for a defensive
    /// cross-check.
    ///
    /// # Examples
    ///
    /// ```
    /// use oven_archive::ArchiveKind;
    ///
    /// assert_eq!(ArchiveKind::from_filename("requests-2.31.0-py3-none-any.whl"), Some(ArchiveKind::Zip));
    /// assert_eq!(ArchiveKind::from_filename("requests-2.31.0.tar.gz"), Some(ArchiveKind::TarGz));
    /// assert_eq!(ArchiveKind::from_filename("README.md"), None);
    /// ```
    #[must_use]
    pub fn from_filename(name: &str) -> Option<Self> {
        if ZIP_SUFFIXES.iter().any(|ext| name.ends_with(ext)) {
            Some(ArchiveKind::Zip)
        } else if GZ_SUFFIXES.iter().any(|ext| name.ends_with(ext)) {
            Some(ArchiveKind::TarGz)
        } else if BZ_SUFFIXES.iter().any(|ext| name.ends_with(ext)) {
            Some(ArchiveKind::TarBz2)
        } else if XZ_SUFFIXES.iter().any(|ext| name.ends_with(ext)) {
            Some(ArchiveKind::TarXz)
        } else if name.ends_with(".tar") {
            Some(ArchiveKind::Tar)
        } else {
            None
        }
    }

    /// Detect an archive kind from leading content bytes.
    ///
    /// A bare gzip/bzip2/xz stream is assumed to be a compressed tarball,
    /// since that is the only thing the index distributes in those framings.
    /// Returns `None` if no magic matches or the input is too short.
    #[must_use]
    pub fn from_magic_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&ZIP_MAGIC) {
            return Some(ArchiveKind::Zip);
        }
        if bytes.starts_with(&GZIP_MAGIC) {
            return Some(ArchiveKind::TarGz);
        }
        if bytes.starts_with(&BZIP2_MAGIC) {
            return Some(ArchiveKind::TarBz2);
        }
        if bytes.starts_with(&XZ_MAGIC) {
            return Some(ArchiveKind::TarXz);
        }
        if bytes.len() >= TAR_MAGIC_OFFSET + TAR_MAGIC.len()
            && &bytes[TAR_MAGIC_OFFSET..TAR_MAGIC_OFFSET + TAR_MAGIC.len()] == TAR_MAGIC
        {
            return Some(ArchiveKind::Tar);
        }
        None
    }

    /// Verify that `bytes` start with the content expected for this kind.
    ///
    /// Useful for cross-checking a suffix-classified kind against actual file
    /// contents. Listing and extraction dispatch on suffix alone; this check
    /// is for callers that want the extra guard.
    #[must_use]
    pub fn check_magic_bytes(&self, bytes: &[u8]) -> bool {
        Self::from_magic_bytes(bytes) == Some(*self)
    }

    /// Whether this kind can actually be listed and extracted.
    ///
    /// The xz family is the one recognized-but-unsupported case.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        !matches!(self, ArchiveKind::TarXz)
    }

    /// Whether this kind goes through the tar demux path.
    #[must_use]
    pub fn is_tar(&self) -> bool {
        matches!(
            self,
            ArchiveKind::Tar | ArchiveKind::TarGz | ArchiveKind::TarBz2 | ArchiveKind::TarXz
        )
    }

    /// Short name for display and logging.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveKind::Zip => "zip",
            ArchiveKind::Tar => "tar",
            ArchiveKind::TarGz => "tar.gz",
            ArchiveKind::TarBz2 => "tar.bz2",
            ArchiveKind::TarXz => "tar.xz",
        }
    }

    /// Wrap a raw archive reader with the decompression stage this kind
    /// needs before tar demuxing.
    ///
    /// Plain tar and zip pass through unchanged (zip manages its own entry
    /// compression). The xz family fails here, before any byte is read.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::{Cursor, Read};
    /// use flate2::{Compression, write::GzEncoder};
    /// use oven_archive::ArchiveKind;
    ///
    /// let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    /// std::io::Write::write_all(&mut encoder, b"tar bytes would go here").unwrap();
    /// let compressed = encoder.finish().unwrap();
    ///
    /// let mut reader = ArchiveKind::TarGz.wrap_reader(Cursor::new(compressed)).unwrap();
    /// let mut inflated = Vec::new();
    /// reader.read_to_end(&mut inflated).unwrap();
    /// assert_eq!(inflated, b"tar bytes would go here");
    /// ```
    pub fn wrap_reader<'a, R: Read + 'a>(&self, reader: R) -> Result<Box<dyn Read + 'a>> {
        Ok(match self {
            ArchiveKind::Zip | ArchiveKind::Tar => Box::new(reader),
            ArchiveKind::TarGz => Box::new(GzDecoder::new(reader)),
            ArchiveKind::TarBz2 => Box::new(BzDecoder::new(reader)),
            ArchiveKind::TarXz => {
                exn::bail!(ErrorKind::UnsupportedCompression(self.as_str().to_string()))
            },
        })
    }
}

impl Display for ArchiveKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for ArchiveKind {
    fn as_ref(&self) -> &'static str {
        self.as_str()
    }
}
