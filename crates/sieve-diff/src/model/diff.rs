//! Diff data structures representing one file's changes.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// A file that differs from the comparison baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedFile {
    /// Absolute location of the file.
    pub uri: String,
    /// Path relative to the workspace root.
    pub relative_path: String,
    /// File status.
    pub status: FileStatus,
    /// Previous path (only for renames).
    pub old_path: Option<String>,
}

impl ChangedFile {
    /// Create a changed file that was not renamed.
    ///
    /// Renames go through [`ChangedFile::renamed`] so `old_path` is always set for them.
    pub fn new(uri: impl Into<String>, relative_path: impl Into<String>, status: FileStatus) -> Self {
        debug_assert_ne!(status, FileStatus::Renamed, "use ChangedFile::renamed");
        Self {
            uri: uri.into(),
            relative_path: relative_path.into(),
            status,
            old_path: None,
        }
    }

    /// Create a renamed file.
    pub fn renamed(
        uri: impl Into<String>,
        relative_path: impl Into<String>,
        old_path: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            relative_path: relative_path.into(),
            status: FileStatus::Renamed,
            old_path: Some(old_path.into()),
        }
    }

    /// Get the display name for the file (handles renames).
    pub fn display_name(&self) -> String {
        match self.old_path {
            Some(ref old) if old != &self.relative_path => {
                format!("{} → {}", old, self.relative_path)
            }
            _ => self.relative_path.clone(),
        }
    }
}

/// File status relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl FileStatus {
    /// Get a single-character representation.
    pub fn as_char(&self) -> char {
        match self {
            FileStatus::Added => 'A',
            FileStatus::Modified => 'M',
            FileStatus::Deleted => 'D',
            FileStatus::Renamed => 'R',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Modified => "modified",
            FileStatus::Deleted => "deleted",
            FileStatus::Renamed => "renamed",
        }
    }
}

/// Review decision carried by a hunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewState {
    #[default]
    Unreviewed,
    Reviewed,
    Flagged,
}

/// Full diff for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    /// The file this diff belongs to.
    pub file: ChangedFile,
    /// Change hunks, ordered by ascending `new_start`.
    pub hunks: Vec<Hunk>,
    /// Number of added lines.
    pub additions: usize,
    /// Number of deleted lines.
    pub deletions: usize,
}

impl FileDiff {
    /// Create a file diff without hunks.
    pub fn new(file: ChangedFile) -> Self {
        Self {
            file,
            hunks: Vec::new(),
            additions: 0,
            deletions: 0,
        }
    }

    /// Recalculate line statistics from hunks.
    pub fn recalculate_stats(&mut self) {
        self.additions = self.hunks.iter().map(Hunk::additions).sum();
        self.deletions = self.hunks.iter().map(Hunk::deletions).sum();
    }
}

/// A contiguous region of changes (hunk).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    /// Stable identifier, derived from the file location and hunk position.
    pub id: String,
    /// Header line (e.g., "@@ -10,5 +10,7 @@ fn example()").
    pub header: String,
    /// Old file starting line.
    pub old_start: u32,
    /// Number of lines in old version.
    pub old_count: u32,
    /// New file starting line.
    pub new_start: u32,
    /// Number of lines in new version.
    pub new_count: u32,
    /// Lines in this hunk.
    pub lines: Vec<DiffLine>,
    /// Review decision for this hunk.
    #[serde(default)]
    pub state: ReviewState,
}

impl Hunk {
    /// Create an empty hunk with the given header info.
    pub fn new(
        id: impl Into<String>,
        old_start: u32,
        old_count: u32,
        new_start: u32,
        new_count: u32,
    ) -> Self {
        Self {
            id: id.into(),
            header: Self::format_header(old_start, old_count, new_start, new_count),
            old_start,
            old_count,
            new_start,
            new_count,
            lines: Vec::new(),
            state: ReviewState::Unreviewed,
        }
    }

    /// Build a hunk whose ranges are derived from its lines.
    ///
    /// Counts follow the line kinds. Each start is the first number found on
    /// that side, or the fallback when no line carries one.
    pub fn from_lines(
        id: impl Into<String>,
        lines: Vec<DiffLine>,
        fallback_old_start: u32,
        fallback_new_start: u32,
    ) -> Self {
        let old_start = lines
            .iter()
            .find_map(DiffLine::old_line)
            .unwrap_or(fallback_old_start);
        let new_start = lines
            .iter()
            .find_map(DiffLine::new_line)
            .unwrap_or(fallback_new_start);
        let old_count = lines.iter().filter(|l| l.old_line().is_some()).count() as u32;
        let new_count = lines.iter().filter(|l| l.new_line().is_some()).count() as u32;

        let mut hunk = Self::new(id, old_start, old_count, new_start, new_count);
        hunk.lines = lines;
        hunk
    }

    /// Format a unified-diff hunk header without section context.
    pub fn format_header(old_start: u32, old_count: u32, new_start: u32, new_count: u32) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            old_start, old_count, new_start, new_count
        )
    }

    /// The 0-indexed, inclusive range of new-file lines this hunk spans.
    ///
    /// `None` for pure deletions, which have no new-file line to anchor to.
    pub fn new_line_span(&self) -> Option<RangeInclusive<u32>> {
        if self.new_count == 0 {
            return None;
        }
        let start = self.new_start.saturating_sub(1);
        Some(start..=start + (self.new_count - 1))
    }

    /// Number of added lines.
    pub fn additions(&self) -> usize {
        self.lines.iter().filter(|l| l.is_added()).count()
    }

    /// Number of removed lines.
    pub fn deletions(&self) -> usize {
        self.lines.iter().filter(|l| l.is_removed()).count()
    }

    /// Rebuild the hunk body as unified-diff text (header not included).
    pub fn to_diff_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("{}{}", l.prefix(), l.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single line in the diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    /// Line type together with the line numbers it carries.
    #[serde(flatten)]
    pub kind: LineKind,
    /// Line content (without leading +/-/ ).
    pub content: String,
}

impl DiffLine {
    /// Create a new context line.
    pub fn context(content: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        Self {
            kind: LineKind::Context { old_line, new_line },
            content: content.into(),
        }
    }

    /// Create a new addition line.
    pub fn added(content: impl Into<String>, new_line: u32) -> Self {
        Self {
            kind: LineKind::Added { new_line },
            content: content.into(),
        }
    }

    /// Create a new deletion line.
    pub fn removed(content: impl Into<String>, old_line: u32) -> Self {
        Self {
            kind: LineKind::Removed { old_line },
            content: content.into(),
        }
    }

    /// Line number in the old file (Context and Removed).
    pub fn old_line(&self) -> Option<u32> {
        match self.kind {
            LineKind::Removed { old_line } | LineKind::Context { old_line, .. } => Some(old_line),
            LineKind::Added { .. } => None,
        }
    }

    /// Line number in the new file (Context and Added).
    pub fn new_line(&self) -> Option<u32> {
        match self.kind {
            LineKind::Added { new_line } | LineKind::Context { new_line, .. } => Some(new_line),
            LineKind::Removed { .. } => None,
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self.kind, LineKind::Added { .. })
    }

    pub fn is_removed(&self) -> bool {
        matches!(self.kind, LineKind::Removed { .. })
    }

    pub fn is_context(&self) -> bool {
        matches!(self.kind, LineKind::Context { .. })
    }

    /// Get the prefix character for this line type.
    pub fn prefix(&self) -> char {
        match self.kind {
            LineKind::Added { .. } => '+',
            LineKind::Removed { .. } => '-',
            LineKind::Context { .. } => ' ',
        }
    }
}

/// Line type in the diff, with the line numbers that type carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LineKind {
    /// Added line (+), only present in the new file.
    Added { new_line: u32 },
    /// Removed line (-), only present in the old file.
    Removed { old_line: u32 },
    /// Unchanged line, present on both sides.
    Context { old_line: u32, new_line: u32 },
}
