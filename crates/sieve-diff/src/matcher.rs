//! Assigning annotations to the hunks they point into.

use crate::model::{Annotation, Hunk};

/// Whether `annotation` is anchored inside `hunk`'s new-file range.
///
/// File-level notes have no anchor line and never match. Pure deletions
/// (`new_count == 0`) match nothing.
pub fn hunk_contains(hunk: &Hunk, annotation: &Annotation) -> bool {
    if annotation.file_level {
        return false;
    }
    hunk.new_line_span()
        .is_some_and(|span| span.contains(&annotation.start_line))
}

/// Annotations whose start line falls inside `hunk`, in input order.
pub fn annotations_for_hunk<'a>(
    hunk: &Hunk,
    annotations: impl IntoIterator<Item = &'a Annotation>,
) -> Vec<&'a Annotation> {
    annotations
        .into_iter()
        .filter(|a| hunk_contains(hunk, a))
        .collect()
}

/// Annotations not matched by any of `hunks`, in input order.
pub fn orphan_annotations<'a>(
    hunks: &[Hunk],
    annotations: impl IntoIterator<Item = &'a Annotation>,
) -> Vec<&'a Annotation> {
    annotations
        .into_iter()
        .filter(|a| !hunks.iter().any(|h| hunk_contains(h, a)))
        .collect()
}
