//! Result types for the single-file read operation.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Why a member file was refused for display.
///
/// Refusals are successful outcomes, not failures: the presentation layer
/// renders the reason as explanatory text where the content would have gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Refusal {
    /// Decoded content exceeds the configured render limit.
    TooLarge,
    /// Content sampled as non-text.
    Binary,
    /// No archive member matches the requested path.
    NotFound,
    /// The archive kind is recognized but cannot be decoded.
    UnsupportedCompression,
}

impl Refusal {
    /// Stable, user-facing reason string.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Refusal::TooLarge => "too large to display",
            Refusal::Binary => "looks like a binary file",
            Refusal::NotFound => "not found",
            Refusal::UnsupportedCompression => "unsupported compression",
        }
    }
}

impl Display for Refusal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.reason())
    }
}

/// Outcome of reading one member file for display.
///
/// Exactly one of content or a refusal reason — never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileView {
    /// Decoded content ready to render, with a highlighting hint derived
    /// from the member filename alone.
    Rendered {
        content: Vec<u8>,
        language: Option<&'static str>,
    },
    /// Refused with a user-displayable reason.
    Refused(Refusal),
}

impl FileView {
    /// The refusal reason, if this view refused.
    #[must_use]
    pub fn error_reason(&self) -> Option<&'static str> {
        match self {
            FileView::Rendered { .. } => None,
            FileView::Refused(refusal) => Some(refusal.reason()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Refusal::TooLarge, "too large to display")]
    #[case(Refusal::Binary, "looks like a binary file")]
    #[case(Refusal::NotFound, "not found")]
    #[case(Refusal::UnsupportedCompression, "unsupported compression")]
    fn reasons_are_stable(#[case] refusal: Refusal, #[case] expected: &str) {
        assert_eq!(refusal.reason(), expected);
        assert_eq!(refusal.to_string(), expected);
    }

    #[test]
    fn rendered_views_carry_no_reason() {
        let view = FileView::Rendered { content: b"x = 1\n".to_vec(), language: Some("python") };
        assert_eq!(view.error_reason(), None);
        assert_eq!(FileView::Refused(Refusal::Binary).error_reason(), Some("looks like a binary file"));
    }
}
