//! Synthetic diffs for files without a comparison baseline.

use super::split_lines;
use crate::model::{ChangedFile, DiffLine, FileDiff, Hunk};

/// Build a [`FileDiff`] for a newly created (untracked) file.
///
/// `git diff HEAD` prints nothing for such files, so the whole content becomes
/// one all-added hunk with old range `0,0` and new range `1,<line count>`.
/// A final newline does not produce an extra empty line, and CRLF line
/// endings keep their `\r`.
pub fn parse_added(file: &ChangedFile, content: &str) -> FileDiff {
    let lines: Vec<DiffLine> = split_lines(content)
        .into_iter()
        .zip(1u32..)
        .map(|(text, new_line)| DiffLine::added(text, new_line))
        .collect();

    let hunk = Hunk::from_lines(format!("{}:0:1", file.uri), lines, 0, 1);

    let mut diff = FileDiff::new(file.clone());
    diff.hunks.push(hunk);
    diff.recalculate_stats();
    diff
}
