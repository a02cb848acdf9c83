//! Reducing annotated hunks to the windows around their annotations.
//!
//! A large hunk (an entire added file is a single hunk) should not be shown
//! in full when only a few of its lines carry notes. [`trim_hunk`] keeps each
//! annotated line plus a context radius on each side and merges windows that
//! overlap or touch.

mod ranges;

pub use ranges::{merge_ranges, window};

use crate::model::{Annotation, Hunk};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Context lines kept on each side of an annotated line.
pub const DEFAULT_CONTEXT_RADIUS: usize = 3;

/// Windows whose gap is at most this many lines are merged (1 = touching).
pub const DEFAULT_MERGE_GAP: usize = 1;

/// Tuning for [`trim_hunk`] and context hunk building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrimOptions {
    pub context_radius: usize,
    pub merge_gap: usize,
}

impl Default for TrimOptions {
    fn default() -> Self {
        Self {
            context_radius: DEFAULT_CONTEXT_RADIUS,
            merge_gap: DEFAULT_MERGE_GAP,
        }
    }
}

/// Outcome of trimming a hunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trimmed<'a> {
    /// No annotations were given; nothing to show.
    Empty,
    /// The input hunk itself, either because it is already minimal or because
    /// no annotation hit a line with a new-side number.
    Whole(&'a Hunk),
    /// New sub-hunks in ascending position within the parent.
    Windows(Vec<Hunk>),
}

impl<'a> Trimmed<'a> {
    pub fn as_slice(&self) -> &[Hunk] {
        match self {
            Trimmed::Empty => &[],
            Trimmed::Whole(hunk) => std::slice::from_ref(*hunk),
            Trimmed::Windows(hunks) => hunks,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Whether the result is the untouched input hunk.
    pub fn is_untrimmed(&self) -> bool {
        matches!(self, Trimmed::Whole(_))
    }

    /// Owned hunks, cloning the input hunk when it was returned whole.
    pub fn into_vec(self) -> Vec<Hunk> {
        match self {
            Trimmed::Empty => Vec::new(),
            Trimmed::Whole(hunk) => vec![hunk.clone()],
            Trimmed::Windows(hunks) => hunks,
        }
    }
}

/// Trim `hunk` to the minimal windows covering every annotation plus context.
///
/// Windows are computed over line indices, so removed lines sitting within
/// the radius of an annotated line are kept. Sub-hunk ids are
/// `{parent id}:trim:{n}` with `n` counting windows from the top.
///
/// File-level annotations carry no line and are ignored, so a set made only
/// of file-level notes yields [`Trimmed::Empty`] just like an empty set.
pub fn trim_hunk<'a, 'b>(
    hunk: &'a Hunk,
    annotations: impl IntoIterator<Item = &'b Annotation>,
    options: &TrimOptions,
) -> Trimmed<'a> {
    let mut file_level = 0;
    let targets: Vec<RangeInclusive<u32>> = annotations
        .into_iter()
        .filter(|a| {
            if a.file_level {
                file_level += 1;
            }
            !a.file_level
        })
        .map(Annotation::target_lines)
        .collect();

    if targets.is_empty() {
        if file_level > 0 {
            log::debug!(
                "Only file-level annotations ({}) for hunk {}, nothing to trim to",
                file_level,
                hunk.id
            );
        }
        return Trimmed::Empty;
    }

    let hits: Vec<usize> = hunk
        .lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            line.new_line()
                .filter(|n| targets.iter().any(|t| t.contains(n)))
                .map(|_| idx)
        })
        .collect();

    if hits.is_empty() {
        log::debug!("No annotated new-side line in hunk {}, keeping it whole", hunk.id);
        return Trimmed::Whole(hunk);
    }

    let len = hunk.lines.len();
    let merged = merge_ranges(
        hits.iter()
            .map(|&idx| window(idx, options.context_radius, len)),
        options.merge_gap,
    );

    if merged.as_slice() == [(0, len - 1)] {
        return Trimmed::Whole(hunk);
    }

    let windows = merged
        .into_iter()
        .enumerate()
        .map(|(n, (start, end))| {
            let mut sub = Hunk::from_lines(
                format!("{}:trim:{}", hunk.id, n),
                hunk.lines[start..=end].to_vec(),
                hunk.old_start,
                hunk.new_start,
            );
            sub.state = hunk.state;
            sub
        })
        .collect();

    Trimmed::Windows(windows)
}
