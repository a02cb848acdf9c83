//! Diff parsing.

mod added;
mod unified;

pub use added::parse_added;
pub use unified::parse_diff;

/// Split text on `\n` only, so a `\r` before the newline stays in the line.
///
/// A single final newline does not produce a trailing empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_keeps_carriage_returns() {
        assert_eq!(split_lines("a\r\nb\r\n"), vec!["a\r", "b\r"]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_drops_only_one_trailing_empty_line() {
        assert_eq!(split_lines("a\n\n"), vec!["a", ""]);
        assert_eq!(split_lines("\n"), vec![""]);
        assert!(split_lines("").is_empty());
    }
}
