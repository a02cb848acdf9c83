//! # sieve-diff
//!
//! The diff reconciliation engine behind sieve code reviews: it turns raw
//! unified diff text into addressable hunks, pairs free-floating review
//! annotations with the hunks they point into, and cuts large hunks down to
//! the few lines around each annotation.
//!
//! ## Design Principles
//!
//! Every operation is a pure function of its arguments. The engine never
//! reads files or talks to version control; those inputs come through the
//! [`DiffSource`] and [`AnnotationSource`] traits. This enables:
//!
//! - Testability without a repository on disk
//! - Parsing many files in parallel, since nothing is shared
//! - Total functions: malformed input degrades instead of erroring
//!
//! ## Line numbering
//!
//! Diff lines carry 1-based old/new numbers as printed in `@@` headers.
//! Annotations use 0-based new-file lines, so annotation line `n` is diff
//! line `n + 1`.
//!
//! ## Usage
//!
//! ```
//! use sieve_diff::{
//!     annotations_for_hunk, parse_added, trim_hunk, Annotation, ChangedFile, FileStatus,
//!     TrimOptions,
//! };
//!
//! let file = ChangedFile::new("/ws/big.rs", "big.rs", FileStatus::Added);
//! let content: String = (0..100).map(|i| format!("line {}\n", i)).collect();
//! let diff = parse_added(&file, &content);
//!
//! let notes = vec![Annotation::line("n1", "/ws/big.rs", 9, "off by one?")];
//! let hunk = &diff.hunks[0];
//! let matched = annotations_for_hunk(hunk, &notes);
//!
//! let trimmed = trim_hunk(hunk, matched, &TrimOptions::default());
//! assert_eq!(trimmed.as_slice()[0].header, "@@ -0,0 +7,7 @@");
//! ```

pub mod context;
pub mod excerpt;
pub mod matcher;
pub mod model;
pub mod parser;
pub mod traits;
pub mod trim;

// Re-export commonly used types
pub use context::build_context_hunks;
pub use excerpt::{build_excerpt, collect_excerpts, ExcerptHunk, FileExcerpt};
pub use matcher::{annotations_for_hunk, hunk_contains, orphan_annotations};
pub use model::{
    parse_annotation_body, Annotation, AnnotationCategory, ChangedFile, DiffLine, FileDiff,
    FileStatus, Hunk, LineKind, ParsedBody, ReviewState,
};
pub use parser::{parse_added, parse_diff, split_lines};
pub use traits::{AnnotationSource, DiffSource, SourceError};
pub use trim::{
    merge_ranges, trim_hunk, TrimOptions, Trimmed, DEFAULT_CONTEXT_RADIUS, DEFAULT_MERGE_GAP,
};
