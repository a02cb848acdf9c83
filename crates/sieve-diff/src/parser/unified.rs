//! Parse unified diff format (as returned by `git diff`).

use super::split_lines;
use crate::model::{ChangedFile, DiffLine, FileDiff, Hunk};
use regex::Regex;
use std::sync::OnceLock;

/// Numbers from a `@@ -O[,L] +O'[,L'] @@` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HunkHeader {
    old_start: u32,
    old_count: u32,
    new_start: u32,
    new_count: u32,
}

/// Parse a raw `git diff` string for a single file into a structured [`FileDiff`].
///
/// Everything before the first hunk header (the `diff --git`, `index`, `---`
/// and `+++` preamble) is skipped. A hunk runs until the next hunk header, the
/// next `diff ` preamble, or the end of input.
///
/// Malformed input never aborts the parse: a header line that does not match
/// the hunk header pattern is skipped like any other unrecognised text.
///
/// Lines are split on `\n` only; a `\r` from a CRLF file is part of the
/// line's content. Hunk counts are taken from the parsed lines, while
/// [`Hunk::header`] keeps the header text exactly as it appeared.
///
/// # Example
/// ```
/// use sieve_diff::{parse_diff, ChangedFile, FileStatus};
///
/// let file = ChangedFile::new("/ws/f.rs", "f.rs", FileStatus::Modified);
/// let diff = parse_diff(&file, "@@ -1 +1 @@\n-old\n+new");
/// assert_eq!((diff.additions, diff.deletions), (1, 1));
/// ```
pub fn parse_diff(file: &ChangedFile, raw: &str) -> FileDiff {
    let mut diff = FileDiff::new(file.clone());
    let mut lines = split_lines(raw).into_iter().peekable();

    while let Some(line) = lines.next() {
        let Some(header) = parse_hunk_header(line) else {
            if line.starts_with("@@") {
                log::debug!("Skipping malformed hunk header in {}: {}", file.uri, line);
            }
            continue;
        };

        let mut old_line = header.old_start;
        let mut new_line = header.new_start;
        let mut body = Vec::new();

        while let Some(hunk_line) =
            lines.next_if(|l| !l.starts_with("@@") && !l.starts_with("diff "))
        {
            // "\ No newline at end of file"
            if hunk_line.starts_with('\\') {
                continue;
            }

            if let Some(content) = hunk_line.strip_prefix('+') {
                body.push(DiffLine::added(content, new_line));
                new_line = new_line.saturating_add(1);
            } else if let Some(content) = hunk_line.strip_prefix('-') {
                body.push(DiffLine::removed(content, old_line));
                old_line = old_line.saturating_add(1);
            } else {
                let content = hunk_line.strip_prefix(' ').unwrap_or(hunk_line);
                body.push(DiffLine::context(content, old_line, new_line));
                old_line = old_line.saturating_add(1);
                new_line = new_line.saturating_add(1);
            }
        }

        diff.hunks.push(build_hunk(file, line, header, body));
    }

    diff.recalculate_stats();
    diff
}

fn build_hunk(file: &ChangedFile, header_line: &str, header: HunkHeader, lines: Vec<DiffLine>) -> Hunk {
    let old_count = lines.iter().filter(|l| !l.is_added()).count() as u32;
    let new_count = lines.iter().filter(|l| !l.is_removed()).count() as u32;

    if (old_count, new_count) != (header.old_count, header.new_count) {
        log::debug!(
            "Hunk {} declares -{},+{} but carries -{},+{} lines",
            header_line,
            header.old_count,
            header.new_count,
            old_count,
            new_count
        );
    }

    let id = format!("{}:{}:{}", file.uri, header.old_start, header.new_start);
    let mut hunk = Hunk::new(id, header.old_start, old_count, header.new_start, new_count);
    hunk.header = header_line.to_string();
    hunk.lines = lines;
    hunk
}

/// Parse a hunk header; an omitted length defaults to 1.
fn parse_hunk_header(line: &str) -> Option<HunkHeader> {
    static HUNK_HEADER_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = HUNK_HEADER_REGEX
        .get_or_init(|| Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").unwrap());

    let captures = re.captures(line)?;
    let count = |idx: usize| match captures.get(idx) {
        Some(m) => m.as_str().parse::<u32>().ok(),
        None => Some(1),
    };

    Some(HunkHeader {
        old_start: captures.get(1)?.as_str().parse().ok()?,
        old_count: count(2)?,
        new_start: captures.get(3)?.as_str().parse().ok()?,
        new_count: count(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FileStatus, LineKind};
    use pretty_assertions::assert_eq;

    fn file() -> ChangedFile {
        ChangedFile::new("/workspace/src/index.ts", "src/index.ts", FileStatus::Modified)
    }

    const SAMPLE_DIFF: &str = r#"diff --git a/src/index.ts b/src/index.ts
index abc1234..def5678 100644
--- a/src/index.ts
+++ b/src/index.ts
@@ -10,4 +10,5 @@ function greet() {
   const name = "world";
-  console.log("hello");
+  console.log(`hello ${name}`);
+  console.log("done");
   return name;
"#;

    #[test]
    fn test_parse_single_hunk() {
        let diff = parse_diff(&file(), SAMPLE_DIFF);

        assert_eq!(diff.additions, 2);
        assert_eq!(diff.deletions, 1);
        assert_eq!(diff.hunks.len(), 1);

        let hunk = &diff.hunks[0];
        assert_eq!(hunk.id, "/workspace/src/index.ts:10:10");
        assert_eq!(hunk.header, "@@ -10,4 +10,5 @@ function greet() {");
        // counts come from the five body lines, not from the header
        assert_eq!((hunk.old_start, hunk.old_count), (10, 3));
        assert_eq!((hunk.new_start, hunk.new_count), (10, 4));
        assert_eq!(hunk.lines.len(), 5);

        assert_eq!(hunk.lines[0], DiffLine::context("  const name = \"world\";", 10, 10));
        assert_eq!(hunk.lines[1], DiffLine::removed("  console.log(\"hello\");", 11));
        assert_eq!(hunk.lines[2], DiffLine::added("  console.log(`hello ${name}`);", 11));
        assert_eq!(hunk.lines[4], DiffLine::context("  return name;", 12, 13));
    }

    #[test]
    fn test_parse_multiple_hunks() {
        let raw = "diff --git a/f.ts b/f.ts\n--- a/f.ts\n+++ b/f.ts\n\
                   @@ -1,3 +1,3 @@\n line1\n-old2\n+new2\n line3\n\
                   @@ -20,3 +20,4 @@\n line20\n line21\n+inserted\n line22\n";
        let diff = parse_diff(&file(), raw);

        assert_eq!(diff.hunks.len(), 2);
        assert_eq!(diff.hunks[0].old_start, 1);
        assert_eq!(diff.hunks[1].old_start, 20);
        assert_eq!(diff.hunks[1].new_count, 4);
        assert_eq!(diff.additions, 2);
        assert_eq!(diff.deletions, 1);
    }

    #[test]
    fn test_skips_no_newline_marker() {
        let raw = "@@ -1,2 +1,2 @@\n-old line\n\\ No newline at end of file\n+new line\n\\ No newline at end of file";
        let diff = parse_diff(&file(), raw);

        let hunk = &diff.hunks[0];
        assert_eq!(hunk.lines.len(), 2);
        assert_eq!(hunk.lines[0], DiffLine::removed("old line", 1));
        assert_eq!(hunk.lines[1], DiffLine::added("new line", 1));
        assert_eq!((diff.additions, diff.deletions), (1, 1));
    }

    #[test]
    fn test_empty_diff() {
        let diff = parse_diff(&file(), "");
        assert!(diff.hunks.is_empty());
        assert_eq!((diff.additions, diff.deletions), (0, 0));
        assert_eq!(diff.file, file());
    }

    #[test]
    fn test_omitted_lengths_default_to_one() {
        let diff = parse_diff(&file(), "@@ -7 +7 @@\n-a\n+b");
        let hunk = &diff.hunks[0];
        assert_eq!((hunk.old_start, hunk.old_count), (7, 1));
        assert_eq!((hunk.new_start, hunk.new_count), (7, 1));
        assert_eq!(hunk.id, "/workspace/src/index.ts:7:7");
    }

    #[test]
    fn test_tracks_line_numbers_across_mixed_changes() {
        let raw = "@@ -5,6 +5,7 @@\n ctx1\n-removed1\n-removed2\n+added1\n+added2\n+added3\n ctx2";
        let hunk = &parse_diff(&file(), raw).hunks[0];

        let kinds: Vec<LineKind> = hunk.lines.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Context { old_line: 5, new_line: 5 },
                LineKind::Removed { old_line: 6 },
                LineKind::Removed { old_line: 7 },
                LineKind::Added { new_line: 6 },
                LineKind::Added { new_line: 7 },
                LineKind::Added { new_line: 8 },
                LineKind::Context { old_line: 8, new_line: 9 },
            ]
        );
    }

    #[test]
    fn test_deleted_file_has_no_new_side() {
        let raw = "--- a/old.ts\n+++ /dev/null\n@@ -1,2 +0,0 @@\n-line1\n-line2";
        let hunk = &parse_diff(&file(), raw).hunks[0];
        assert_eq!(hunk.new_count, 0);
        assert_eq!(hunk.old_count, 2);
        assert!(hunk.lines.iter().all(DiffLine::is_removed));
    }

    #[test]
    fn test_malformed_header_is_skipped() {
        let raw = "@@ -x,1 +1,1 @@\n-ignored\n+ignored\n@@ -3,1 +3,1 @@\n-a\n+b";
        let diff = parse_diff(&file(), raw);
        assert_eq!(diff.hunks.len(), 1);
        assert_eq!(diff.hunks[0].old_start, 3);
        assert_eq!((diff.additions, diff.deletions), (1, 1));
    }

    #[test]
    fn test_next_file_preamble_ends_hunk() {
        let raw = "@@ -1,1 +1,1 @@\n-a\n+b\ndiff --git a/g b/g\nindex 1..2\n--- a/g\n+++ b/g\n";
        let diff = parse_diff(&file(), raw);
        assert_eq!(diff.hunks.len(), 1);
        assert_eq!(diff.hunks[0].lines.len(), 2);
    }

    #[test]
    fn test_unprefixed_line_is_context() {
        let diff = parse_diff(&file(), "@@ -1,2 +1,2 @@\n\n a");
        let hunk = &diff.hunks[0];
        assert_eq!(hunk.lines[0], DiffLine::context("", 1, 1));
        assert_eq!(hunk.lines[1], DiffLine::context("a", 2, 2));
    }

    #[test]
    fn test_counts_match_line_kinds() {
        let diff = parse_diff(&file(), SAMPLE_DIFF);
        for hunk in &diff.hunks {
            let new = hunk.lines.iter().filter(|l| !l.is_removed()).count() as u32;
            let old = hunk.lines.iter().filter(|l| !l.is_added()).count() as u32;
            assert_eq!((hunk.old_count, hunk.new_count), (old, new));
        }
    }

    #[test]
    fn test_round_trip_through_diff_text() {
        let first = parse_diff(&file(), SAMPLE_DIFF);
        let hunk = &first.hunks[0];

        let rebuilt = format!("{}\n{}\n", hunk.header, hunk.to_diff_text());
        let second = parse_diff(&file(), &rebuilt);

        assert_eq!(second.hunks[0].lines, hunk.lines);
    }

    #[test]
    fn test_crlf_content_is_kept() {
        let diff = parse_diff(&file(), "@@ -1 +1 @@\r\n-a\r\n+a\n");
        let hunk = &diff.hunks[0];

        assert_eq!(hunk.header, "@@ -1 +1 @@\r");
        assert_eq!(hunk.lines[0], DiffLine::removed("a\r", 1));
        assert_eq!(hunk.lines[1], DiffLine::added("a", 1));
    }

    #[test]
    fn test_trailing_newline_adds_no_line() {
        let hunk = &parse_diff(&file(), "@@ -1,1 +1,1 @@\n-a\n+b\n").hunks[0];
        assert_eq!(hunk.lines.len(), 2);
    }

    #[test]
    fn test_single_line_doc_example() {
        let diff = parse_diff(&file(), "@@ -1 +1 @@\n-old\n+new");
        assert_eq!((diff.additions, diff.deletions), (1, 1));
    }

    #[test]
    fn test_parse_hunk_header() {
        assert_eq!(
            parse_hunk_header("@@ -10,4 +10,5 @@ fn main()"),
            Some(HunkHeader { old_start: 10, old_count: 4, new_start: 10, new_count: 5 })
        );
        assert_eq!(parse_hunk_header("@@ -1,2 +3 @@").map(|h| h.new_count), Some(1));
        assert_eq!(parse_hunk_header("@@ malformed @@"), None);
        assert_eq!(parse_hunk_header("@@ -99999999999,1 +1,1 @@"), None);
    }
}
