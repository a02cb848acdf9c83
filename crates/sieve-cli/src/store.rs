//! JSON annotation store.

use anyhow::{Context, Result};
use sieve_diff::Annotation;
use std::path::Path;

/// Load notes from a JSON array on disk.
///
/// A missing store means nobody has written notes yet, so it yields none.
pub fn load_annotations(path: &Path) -> Result<Vec<Annotation>> {
    if !path.exists() {
        log::info!("No annotation store at {}", path.display());
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read annotations from {}", path.display()))?;
    let annotations: Vec<Annotation> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid annotation store {}", path.display()))?;

    log::debug!("Loaded {} annotation(s) from {}", annotations.len(), path.display());
    Ok(annotations)
}
