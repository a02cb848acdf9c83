//! Assembling the annotated, trimmed view of each changed file.
//!
//! This is the path a review takes on its way to an export: parse the diff,
//! give notes on unchanged lines some surrounding code, then cut every
//! annotated hunk down to the windows around its notes.

use crate::context::{build_context_hunks, context_hunk};
use crate::matcher::{hunk_contains, orphan_annotations};
use crate::model::{Annotation, ChangedFile, FileDiff, FileStatus, Hunk};
use crate::parser::{parse_added, parse_diff, split_lines};
use crate::traits::{AnnotationSource, DiffSource, SourceError};
use crate::trim::{merge_ranges, trim_hunk, TrimOptions};

/// One trimmed window together with the notes anchored in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcerptHunk {
    pub hunk: Hunk,
    pub annotations: Vec<Annotation>,
}

/// Everything worth showing about one annotated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileExcerpt {
    pub file: ChangedFile,
    /// Added lines in the full diff, not just the excerpt.
    pub additions: usize,
    /// Removed lines in the full diff, not just the excerpt.
    pub deletions: usize,
    /// Windows ordered by ascending `new_start`.
    pub hunks: Vec<ExcerptHunk>,
    /// Notes no window could anchor: file-level notes, and line notes for
    /// which no code was available.
    pub orphans: Vec<Annotation>,
}

/// Build the excerpt for one file from its parsed diff.
///
/// `file_lines` is the current file content; when given, line notes outside
/// every diff hunk get a context hunk, and overlapping context hunks are
/// merged. Each note is shown once, under the first hunk containing it (diff
/// hunks before context hunks).
pub fn build_excerpt<S: AsRef<str>>(
    file_diff: &FileDiff,
    annotations: &[Annotation],
    file_lines: Option<&[S]>,
    options: &TrimOptions,
) -> FileExcerpt {
    let mut candidates = file_diff.hunks.clone();
    if let Some(lines) = file_lines {
        let orphans = orphan_annotations(&file_diff.hunks, annotations);
        let windows = build_context_hunks(
            &file_diff.file.uri,
            lines,
            orphans,
            options.context_radius,
        );

        // Merge overlapping windows so a note spanning into a neighbour's
        // window is still shown in full.
        let spans = windows.iter().filter_map(Hunk::new_line_span);
        candidates.extend(
            merge_ranges(
                spans.map(|span| (*span.start() as usize, *span.end() as usize)),
                options.merge_gap,
            )
            .into_iter()
            .map(|(start, end)| context_hunk(&file_diff.file.uri, lines, start, end)),
        );
    }

    // Claim each note for the first candidate containing it.
    let mut claimed: Vec<Vec<&Annotation>> = vec![Vec::new(); candidates.len()];
    let mut orphans = Vec::new();
    for annotation in annotations {
        match candidates.iter().position(|h| hunk_contains(h, annotation)) {
            Some(idx) => claimed[idx].push(annotation),
            None => orphans.push(annotation.clone()),
        }
    }

    let mut hunks = Vec::new();
    for (hunk, notes) in candidates.iter().zip(&claimed) {
        if notes.is_empty() {
            continue;
        }
        for window in trim_hunk(hunk, notes.iter().copied(), options).as_slice() {
            let annotations = notes
                .iter()
                .filter(|a| hunk_contains(window, a))
                .map(|a| (*a).clone())
                .collect();
            hunks.push(ExcerptHunk {
                hunk: window.clone(),
                annotations,
            });
        }
    }
    hunks.sort_by_key(|h| h.hunk.new_start);

    FileExcerpt {
        file: file_diff.file.clone(),
        additions: file_diff.additions,
        deletions: file_diff.deletions,
        hunks,
        orphans,
    }
}

/// Collect excerpts for every changed file that has at least one annotation.
///
/// Files appear in the order the diff source lists them. Files carrying only
/// file-level notes are not diffed at all.
pub async fn collect_excerpts(
    source: &dyn DiffSource,
    annotations: &dyn AnnotationSource,
    options: &TrimOptions,
) -> Result<Vec<FileExcerpt>, SourceError> {
    let all = annotations.annotations();
    if all.is_empty() {
        return Ok(Vec::new());
    }

    let mut excerpts = Vec::new();
    for file in source.changed_files().await? {
        let notes: Vec<Annotation> = all
            .iter()
            .filter(|a| a.file_uri == file.uri)
            .cloned()
            .collect();
        if notes.is_empty() {
            continue;
        }
        excerpts.push(collect_file(source, file, &notes, options).await?);
    }

    log::debug!("Collected {} annotated file(s)", excerpts.len());
    Ok(excerpts)
}

async fn collect_file(
    source: &dyn DiffSource,
    file: ChangedFile,
    notes: &[Annotation],
    options: &TrimOptions,
) -> Result<FileExcerpt, SourceError> {
    if notes.iter().all(|a| a.file_level) {
        return Ok(build_excerpt::<&str>(&FileDiff::new(file), notes, None, options));
    }

    let raw = source.raw_diff(&file).await?;
    let mut content = None;
    let file_diff = if raw.trim().is_empty() && file.status == FileStatus::Added {
        let text = source.file_content(&file).await?;
        let diff = parse_added(&file, &text);
        content = Some(text);
        diff
    } else {
        parse_diff(&file, &raw)
    };

    let needs_context = orphan_annotations(&file_diff.hunks, notes)
        .iter()
        .any(|a| !a.file_level);
    if needs_context && content.is_none() && file.status != FileStatus::Deleted {
        match source.file_content(&file).await {
            Ok(text) => content = Some(text),
            Err(e) => log::warn!("No context for notes in {}: {}", file.relative_path, e),
        }
    }

    let lines: Option<Vec<&str>> = content.as_deref().map(split_lines);
    Ok(build_excerpt(&file_diff, notes, lines.as_deref(), options))
}
