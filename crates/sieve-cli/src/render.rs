//! Plain-text rendering of file excerpts.

use sieve_diff::{Annotation, FileExcerpt};
use std::fmt;

/// Markdown-ish view of one excerpt: a `diff` block per window, each followed
/// by its notes, then any notes that could not be placed.
pub struct ExcerptView<'a>(pub &'a FileExcerpt);

fn note_location(annotation: &Annotation) -> String {
    if annotation.file_level {
        return "file".to_string();
    }
    // Notes are stored 0-indexed; show editor line numbers
    let lines = annotation.target_lines();
    let (start, end) = (*lines.start(), *lines.end());
    if start == end {
        format!("line {}", start)
    } else {
        format!("lines {}-{}", start, end)
    }
}

fn write_note(f: &mut fmt::Formatter<'_>, annotation: &Annotation) -> fmt::Result {
    let tag = annotation
        .category
        .map(|c| format!("[{}] ", c.as_str()))
        .unwrap_or_default();
    let resolved = if annotation.resolved { " (resolved)" } else { "" };
    writeln!(
        f,
        "- {}{}: {}{}",
        tag,
        note_location(annotation),
        annotation.body,
        resolved
    )
}

impl fmt::Display for ExcerptView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let excerpt = self.0;
        writeln!(
            f,
            "## {} ({}) +{} -{}",
            excerpt.file.display_name(),
            excerpt.file.status.as_str(),
            excerpt.additions,
            excerpt.deletions
        )?;

        for window in &excerpt.hunks {
            writeln!(f)?;
            writeln!(f, "```diff")?;
            writeln!(f, "{}", window.hunk.header)?;
            writeln!(f, "{}", window.hunk.to_diff_text())?;
            writeln!(f, "```")?;
            for annotation in &window.annotations {
                write_note(f, annotation)?;
            }
        }

        if !excerpt.orphans.is_empty() {
            writeln!(f)?;
            writeln!(f, "Other notes:")?;
            for annotation in &excerpt.orphans {
                write_note(f, annotation)?;
            }
        }
        Ok(())
    }
}
