//! Package-name normalization and content-addressed storage names.

use regex::Regex;
use std::sync::LazyLock;

static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("separator pattern is valid"));

/// Normalize a package name the way the index does: trimmed, runs of `-`,
/// `_`, and `.` collapsed to a single `-`, lowercased.
///
/// # Examples
///
/// ```
/// use oven_store::normalize_package_name;
///
/// assert_eq!(normalize_package_name("Django"), "django");
/// assert_eq!(normalize_package_name("typing_extensions"), "typing-extensions");
/// assert_eq!(normalize_package_name("ruamel.yaml"), "ruamel-yaml");
/// assert_eq!(normalize_package_name("  zope.-_interface "), "zope-interface");
/// ```
#[must_use]
pub fn normalize_package_name(name: &str) -> String {
    SEPARATOR_RUNS.replace_all(name.trim(), "-").to_lowercase()
}

/// Content-addressed filename a distribution is stored under.
///
/// The stored name deliberately carries no usable extension; the original
/// distribution filename travels on the [`ArchiveHandle`](oven_archive::ArchiveHandle)
/// instead, so nothing ever needs to be decoded back out of the storage name.
pub(crate) fn stored_filename(name: &str, version: &str, filename: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(normalize_package_name(name).as_bytes());
    hasher.update(b"/");
    hasher.update(version.as_bytes());
    hasher.update(b"/");
    hasher.update(filename.as_bytes());
    format!("{}.dist", hasher.finalize().to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("requests", "requests")]
    #[case("Django", "django")]
    #[case("typing_extensions", "typing-extensions")]
    #[case("ruamel.yaml", "ruamel-yaml")]
    #[case("a-_-b", "a-b")]
    #[case("  spaced  ", "spaced")]
    fn normalizes_names(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_package_name(raw), expected);
    }

    #[test]
    fn stored_name_is_stable_across_spellings() {
        let canonical = stored_filename("typing-extensions", "4.9.0", "typing_extensions-4.9.0.tar.gz");
        let spelled = stored_filename("Typing_Extensions", "4.9.0", "typing_extensions-4.9.0.tar.gz");
        assert_eq!(canonical, spelled);
    }

    #[test]
    fn stored_name_separates_coordinates() {
        // The joining separator must keep (ab, c) distinct from (a, bc).
        let one = stored_filename("pkg", "1.0", "x.whl");
        let two = stored_filename("pkg", "1.0x", ".whl");
        assert_ne!(one, two);
        assert!(one.ends_with(".dist"));
    }

    #[test]
    fn versions_and_filenames_get_distinct_slots() {
        let base = stored_filename("pkg", "1.0", "pkg-1.0.tar.gz");
        assert_ne!(base, stored_filename("pkg", "1.1", "pkg-1.1.tar.gz"));
        assert_ne!(base, stored_filename("pkg", "1.0", "pkg-1.0-py3-none-any.whl"));
    }
}
