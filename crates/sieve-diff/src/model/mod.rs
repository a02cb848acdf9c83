//! Data models for diff and annotation representation.

mod annotation;
mod diff;

pub use annotation::{parse_annotation_body, Annotation, AnnotationCategory, ParsedBody};
pub use diff::{ChangedFile, DiffLine, FileDiff, FileStatus, Hunk, LineKind, ReviewState};
