//! Language guessing from filename extensions.

/// Guess a syntax-highlighting language tag from a filename.
///
/// Pure lookup over a closed extension table; the extension is lowercased
/// first, so `setup.PY` and `setup.py` agree. Content is never consulted.
/// Returns `None` for anything unmatched — including extensionless names
/// like `README` — which callers render as plain text.
///
/// # Examples
///
/// ```
/// use oven_inspect::guess_language;
///
/// assert_eq!(guess_language("setup.py"), Some("python"));
/// assert_eq!(guess_language("pkg/src/lib.rs"), Some("rust"));
/// assert_eq!(guess_language("README"), None);
/// ```
#[must_use]
pub fn guess_language(filename: &str) -> Option<&'static str> {
    // Mirrors JS `split('.').pop()`: an extensionless name yields the whole
    // name, which simply misses the table.
    let extension = filename.rsplit('.').next()?.to_ascii_lowercase();
    let language = match extension.as_str() {
        "js" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "py" | "pyi" | "pyx" => "python",
        "rb" => "ruby",
        "php" => "php",
        "java" => "java",
        "swift" => "swift",
        "c" | "h" => "c",
        "cpp" | "hpp" => "cpp",
        "cs" => "csharp",
        "go" => "go",
        "rs" => "rust",
        "sh" => "bash",
        "html" | "htm" => "html",
        "css" => "css",
        "scss" => "scss",
        "less" => "less",
        "sass" => "sass",
        "md" => "markdown",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "xml" => "xml",
        _ => return None,
    };
    Some(language)
}
