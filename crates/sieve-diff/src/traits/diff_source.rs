//! Trait for fetching changed files and their diffs.

use crate::model::ChangedFile;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when fetching diff input.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The requested file was not found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// The source cannot serve requests (e.g. no repository open).
    #[error("Diff source unavailable: {0}")]
    Unavailable(String),

    /// Reading from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Supplies changed files and raw diff text, usually backed by version control.
///
/// The engine never talks to version control itself; implement this trait to
/// plug a repository (or anything else producing unified diffs) into
/// [`collect_excerpts`](crate::collect_excerpts).
///
/// # Example
///
/// ```ignore
/// struct GitCliSource {
///     root: PathBuf,
/// }
///
/// #[async_trait]
/// impl DiffSource for GitCliSource {
///     async fn changed_files(&self) -> Result<Vec<ChangedFile>, SourceError> {
///         // `git status --porcelain`, mapped to ChangedFile
///     }
///
///     async fn raw_diff(&self, file: &ChangedFile) -> Result<String, SourceError> {
///         let output = tokio::process::Command::new("git")
///             .args(["diff", "HEAD", "--", &file.relative_path])
///             .current_dir(&self.root)
///             .output()
///             .await?;
///         Ok(String::from_utf8_lossy(&output.stdout).into_owned())
///     }
///
///     async fn file_content(&self, file: &ChangedFile) -> Result<String, SourceError> {
///         Ok(tokio::fs::read_to_string(&file.uri).await?)
///     }
/// }
/// ```
#[async_trait]
pub trait DiffSource: Send + Sync {
    /// All files that differ from the baseline.
    async fn changed_files(&self) -> Result<Vec<ChangedFile>, SourceError>;

    /// Unified diff text for one file against the baseline.
    ///
    /// Untracked files may yield an empty string.
    async fn raw_diff(&self, file: &ChangedFile) -> Result<String, SourceError>;

    /// Current content of the file in the working tree.
    async fn file_content(&self, file: &ChangedFile) -> Result<String, SourceError>;
}
