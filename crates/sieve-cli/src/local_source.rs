//! Diff source backed by files on disk.

use async_trait::async_trait;
use sieve_diff::{ChangedFile, DiffSource, SourceError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Serves a single changed file whose diff was saved beforehand.
///
/// Without a diff file the raw diff is empty, which the engine reads as an
/// untracked file and falls back to the file's content.
pub struct LocalDiffSource {
    file: ChangedFile,
    diff_path: Option<PathBuf>,
}

impl LocalDiffSource {
    pub fn new(file: ChangedFile, diff_path: Option<PathBuf>) -> Self {
        Self { file, diff_path }
    }
}

async fn read(path: &Path) -> Result<String, SourceError> {
    tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => SourceError::FileNotFound(path.display().to_string()),
        _ => SourceError::Io(e),
    })
}

#[async_trait]
impl DiffSource for LocalDiffSource {
    async fn changed_files(&self) -> Result<Vec<ChangedFile>, SourceError> {
        Ok(vec![self.file.clone()])
    }

    async fn raw_diff(&self, file: &ChangedFile) -> Result<String, SourceError> {
        if file.uri != self.file.uri {
            return Err(SourceError::FileNotFound(file.uri.clone()));
        }
        match &self.diff_path {
            Some(path) => read(path).await,
            None => Ok(String::new()),
        }
    }

    async fn file_content(&self, file: &ChangedFile) -> Result<String, SourceError> {
        read(Path::new(&file.uri)).await
    }
}
