//! Context-only hunks for annotations on unchanged lines.

use crate::model::{Annotation, DiffLine, Hunk};

/// Build one context-only hunk around each line-anchored orphan annotation.
///
/// The window spans `context_radius` lines either side of the annotated range,
/// clamped to the file. Old and new line numbers are equal since the window is
/// a view into the current file rather than a diff. File-level notes produce
/// nothing. Every other note gets a hunk, even one that starts past the end
/// of the file, in which case the window is partial or empty.
///
/// Hunks are not merged here; overlapping windows are the trimmer's job.
pub fn build_context_hunks<'a, S: AsRef<str>>(
    file_uri: &str,
    file_lines: &[S],
    orphans: impl IntoIterator<Item = &'a Annotation>,
    context_radius: usize,
) -> Vec<Hunk> {
    orphans
        .into_iter()
        .filter(|a| !a.file_level)
        .map(|a| {
            if a.start_line as usize >= file_lines.len() {
                log::debug!(
                    "Annotation {} starts past the end of {} ({} lines)",
                    a.id,
                    file_uri,
                    file_lines.len()
                );
            }
            let start = (a.start_line as usize).saturating_sub(context_radius);
            let end = (a.end_line.max(a.start_line) as usize).saturating_add(context_radius);
            context_hunk(file_uri, file_lines, start, end)
        })
        .collect()
}

/// A context-only hunk over the 0-indexed file lines `start..=end`.
///
/// Lines past the end of the file are left out, so the hunk may be empty.
pub(crate) fn context_hunk<S: AsRef<str>>(
    file_uri: &str,
    file_lines: &[S],
    start: usize,
    end: usize,
) -> Hunk {
    let lines = (start..=end)
        .map_while(|idx| {
            let text = file_lines.get(idx)?;
            let line_no = idx as u32 + 1;
            Some(DiffLine::context(text.as_ref(), line_no, line_no))
        })
        .collect();

    let new_start = u32::try_from(start).unwrap_or(u32::MAX).saturating_add(1);
    let id = format!("{}:ctx:{}", file_uri, new_start);
    Hunk::from_lines(id, lines, new_start, new_start)
}
