//! Trait for reading review annotations.

use crate::model::Annotation;

/// Read-only view of an annotation store.
///
/// Persistence lives elsewhere; the engine only needs the notes in store order.
pub trait AnnotationSource: Send + Sync {
    /// Every known annotation, in store order.
    fn annotations(&self) -> Vec<Annotation>;

    /// Annotations for one file, in store order.
    fn annotations_for_file(&self, file_uri: &str) -> Vec<Annotation> {
        self.annotations()
            .into_iter()
            .filter(|a| a.file_uri == file_uri)
            .collect()
    }
}

impl AnnotationSource for [Annotation] {
    fn annotations(&self) -> Vec<Annotation> {
        self.to_vec()
    }
}

impl AnnotationSource for Vec<Annotation> {
    fn annotations(&self) -> Vec<Annotation> {
        self.clone()
    }
}
