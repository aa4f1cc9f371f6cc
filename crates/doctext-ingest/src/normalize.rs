//! Cleanup of raw extracted text.

/// Normalize extracted text.
///
/// Carriage returns become newlines, every line is trimmed, and lines left
/// empty are dropped. Total and idempotent.
pub fn normalize(text: &str) -> String {
    text.replace('\r', "\n")
        .split('\n')
        .map(|line| line.trim_matches(is_blank))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Unicode whitespace plus the ASCII information separators (U+001C..U+001F).
fn is_blank(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("\r\n \n\t\n"), "");
    }

    #[test]
    fn test_line_endings() {
        assert_eq!(normalize("one\r\ntwo\rthree\n"), "one\ntwo\nthree");
    }

    #[test]
    fn test_trims_and_drops_blank_lines() {
        assert_eq!(normalize("Hello\n\nWorld  "), "Hello\nWorld");
        assert_eq!(normalize("  indented\n\t tabbed \t\n\n\nlast"), "indented\ntabbed\nlast");
    }

    #[test]
    fn test_information_separators_trimmed() {
        assert_eq!(normalize("a\n\u{1c}\nb\n\u{1f} c"), "a\nb\nc");
        assert_eq!(normalize("x\u{1d}\u{1e}"), "x");
    }

    #[test]
    fn test_inner_whitespace_kept() {
        assert_eq!(normalize("a  b\tc"), "a  b\tc");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(text in "[ a-z\t\r\n\u{a0}\u{3000}\u{1c}-\u{1f}]{0,64}") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalized_lines_are_trimmed(text in "\\PC{0,64}") {
            let out = normalize(&text);
            prop_assert!(!out.contains('\r'));
            for line in out.split('\n').filter(|_| !out.is_empty()) {
                prop_assert!(!line.is_empty());
                prop_assert_eq!(line, line.trim());
            }
        }
    }
}
