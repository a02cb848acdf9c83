//! Boundaries to the collaborators that feed the engine.

mod annotation_source;
mod diff_source;

pub use annotation_source::AnnotationSource;
pub use diff_source::{DiffSource, SourceError};
