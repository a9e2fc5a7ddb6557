//! Binary-versus-text judgement over a sampled prefix.

/// Bytes sampled from the head of the content when judging.
const SAMPLE_SIZE: usize = 8 * 1024;
/// Share of non-text bytes above which a sample is judged binary.
const NON_TEXT_THRESHOLD: f64 = 0.10;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Judge whether `content` looks like a binary file.
///
/// Only the first 8 KiB are sampled. A Unicode BOM marks the sample as text
/// outright; otherwise any NUL byte marks it binary, and failing that, a
/// non-text byte share above 10% does. Empty content is text.
///
/// # Examples
///
/// ```
/// use oven_inspect::is_binary;
///
/// assert!(!is_binary(b"def main():\n    pass\n"));
/// assert!(is_binary(b"\x7fELF\x02\x01\x01\x00\x00\x00"));
/// ```
#[must_use]
pub fn is_binary(content: &[u8]) -> bool {
    if content.is_empty() {
        return false;
    }
    let sample = &content[..content.len().min(SAMPLE_SIZE)];
    if sample.starts_with(&UTF8_BOM)
        || sample.starts_with(&UTF16_LE_BOM)
        || sample.starts_with(&UTF16_BE_BOM)
    {
        return false;
    }
    if memchr::memchr(0, sample).is_some() {
        return true;
    }
    let non_text = sample.iter().filter(|&&byte| is_non_text(byte)).count();
    non_text as f64 / sample.len() as f64 > NON_TEXT_THRESHOLD
}

/// Control characters outside the usual text repertoire. Bytes >= 0x80 are
/// not counted; they are legitimate UTF-8 continuation bytes.
fn is_non_text(byte: u8) -> bool {
    match byte {
        b'\t' | b'\n' | b'\r' | 0x0B | 0x0C | 0x1B => false,
        0x00..=0x1F | 0x7F => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b"" as &[u8], false)]
    #[case(b"plain ascii text\n", false)]
    #[case("snake_case = \"\u{1F40D}\"\n".as_bytes(), false)]
    #[case(b"tabs\tand\r\nnewlines\n", false)]
    #[case(b"nul\x00byte", true)]
    #[case(b"\x7fELF\x02\x01\x01\x00", true)]
    fn judges_common_shapes(#[case] content: &[u8], #[case] expected: bool) {
        assert_eq!(is_binary(content), expected);
    }

    #[test]
    fn bom_prefixed_samples_are_text() {
        assert!(!is_binary(b"\xEF\xBB\xBFhello"));
        // UTF-16 text is full of NULs after the BOM, and still text.
        assert!(!is_binary(b"\xFF\xFEh\x00i\x00"));
        assert!(!is_binary(b"\xFE\xFF\x00h\x00i"));
    }

    #[test]
    fn high_control_char_ratio_is_binary() {
        let mut content = vec![b'a'; 80];
        content.extend(std::iter::repeat_n(0x01u8, 20));
        assert!(is_binary(&content));
    }

    #[test]
    fn sparse_control_chars_stay_text() {
        let mut content = vec![b'a'; 99];
        content.push(0x01);
        assert!(!is_binary(&content));
    }

    #[test]
    fn only_the_prefix_is_sampled() {
        let mut content = vec![b'a'; SAMPLE_SIZE];
        content.push(0x00);
        // The NUL sits past the sample window.
        assert!(!is_binary(&content));
    }
}
