//! Review annotations and their categories.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A reviewer note attached to a line range, or to a whole file.
///
/// Annotations are owned by an external store; the engine only reads and
/// regroups them. Line numbers are 0-indexed new-file coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Store-assigned identifier.
    pub id: String,
    /// Location of the annotated file.
    pub file_uri: String,
    /// First annotated line (0-indexed, inclusive).
    pub start_line: u32,
    /// Last annotated line (0-indexed, inclusive).
    pub end_line: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<AnnotationCategory>,
    /// Note text (markdown).
    pub body: String,
    /// When the note was written.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved: bool,
    /// Applies to the whole file rather than to `start_line`.
    ///
    /// Stores written before this flag existed omit it; those notes are line notes.
    #[serde(default)]
    pub file_level: bool,
}

impl Annotation {
    /// Create a note on the inclusive line range `start_line..=end_line`.
    pub fn lines(
        id: impl Into<String>,
        file_uri: impl Into<String>,
        start_line: u32,
        end_line: u32,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            file_uri: file_uri.into(),
            start_line,
            end_line,
            category: None,
            body: body.into(),
            created_at: Utc::now(),
            resolved: false,
            file_level: false,
        }
    }

    /// Create a note on a single line.
    pub fn line(
        id: impl Into<String>,
        file_uri: impl Into<String>,
        line: u32,
        body: impl Into<String>,
    ) -> Self {
        Self::lines(id, file_uri, line, line, body)
    }

    /// Create a note about the whole file.
    pub fn file(id: impl Into<String>, file_uri: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            file_level: true,
            ..Self::lines(id, file_uri, 0, 0, body)
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: AnnotationCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// The annotated new-file lines, 1-indexed as they appear in a diff.
    ///
    /// A reversed range collapses to its start line.
    pub fn target_lines(&self) -> std::ops::RangeInclusive<u32> {
        let first = self.start_line.saturating_add(1);
        first..=self.end_line.max(self.start_line).saturating_add(1)
    }
}

/// What kind of feedback a note asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationCategory {
    Bug,
    Security,
    Performance,
    Architecture,
    Explain,
    Refactor,
    Test,
}

impl AnnotationCategory {
    /// All categories, in cycling order.
    pub const ALL: [AnnotationCategory; 7] = [
        AnnotationCategory::Bug,
        AnnotationCategory::Security,
        AnnotationCategory::Performance,
        AnnotationCategory::Architecture,
        AnnotationCategory::Explain,
        AnnotationCategory::Refactor,
        AnnotationCategory::Test,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationCategory::Bug => "bug",
            AnnotationCategory::Security => "security",
            AnnotationCategory::Performance => "performance",
            AnnotationCategory::Architecture => "architecture",
            AnnotationCategory::Explain => "explain",
            AnnotationCategory::Refactor => "refactor",
            AnnotationCategory::Test => "test",
        }
    }

    /// Look up a category by its lower-case tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == tag)
    }

    /// The next category in cycling order, wrapping around after the last.
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Result of splitting a typed note into its category tag and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBody {
    pub category: Option<AnnotationCategory>,
    pub body: String,
    /// Whether the text started with a recognised `[tag]`.
    pub has_explicit_category: bool,
}

/// Parse note text of the form `[category] body`.
///
/// Unknown tags and brackets anywhere but the start leave the text untouched.
pub fn parse_annotation_body(text: &str) -> ParsedBody {
    static CATEGORY_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = CATEGORY_REGEX.get_or_init(|| {
        // [tag] followed by the rest of the note, newlines included
        Regex::new(r"(?s)^\[(\w+)\]\s*(.*)$").unwrap()
    });

    let trimmed = text.trim();
    if let Some(captures) = re.captures(trimmed) {
        let tag = captures[1].to_lowercase();
        if let Some(category) = AnnotationCategory::from_tag(&tag) {
            return ParsedBody {
                category: Some(category),
                body: captures[2].trim().to_string(),
                has_explicit_category: true,
            };
        }
    }

    ParsedBody {
        category: None,
        body: trimmed.to_string(),
        has_explicit_category: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_body_with_category() {
        let parsed = parse_annotation_body("[Security] token is logged");
        assert_eq!(parsed.category, Some(AnnotationCategory::Security));
        assert_eq!(parsed.body, "token is logged");
        assert!(parsed.has_explicit_category);
    }

    #[test]
    fn test_parse_body_unknown_tag() {
        let parsed = parse_annotation_body("[nope] something");
        assert_eq!(parsed.category, None);
        assert_eq!(parsed.body, "[nope] something");
        assert!(!parsed.has_explicit_category);
    }

    #[test]
    fn test_parse_body_trims_and_keeps_multiline() {
        let parsed = parse_annotation_body("  [refactor]   first\nsecond  ");
        assert_eq!(parsed.category, Some(AnnotationCategory::Refactor));
        assert_eq!(parsed.body, "first\nsecond");

        let parsed = parse_annotation_body("[test]");
        assert_eq!(parsed.category, Some(AnnotationCategory::Test));
        assert_eq!(parsed.body, "");
    }

    #[test]
    fn test_parse_body_ignores_brackets_mid_text() {
        let parsed = parse_annotation_body("some prefix [bug] real body");
        assert_eq!(parsed.category, None);
        assert_eq!(parsed.body, "some prefix [bug] real body");

        let parsed = parse_annotation_body("");
        assert_eq!(parsed.category, None);
        assert_eq!(parsed.body, "");
    }

    #[test]
    fn test_category_cycles() {
        assert_eq!(AnnotationCategory::Bug.next(), AnnotationCategory::Security);
        assert_eq!(AnnotationCategory::Test.next(), AnnotationCategory::Bug);
    }

    #[test]
    fn test_target_lines_are_one_indexed() {
        let a = Annotation::lines("a", "/f", 20, 22, "x");
        assert_eq!(a.target_lines(), 21..=23);

        let reversed = Annotation::lines("b", "/f", 9, 3, "x");
        assert_eq!(reversed.target_lines(), 10..=10);
    }

    #[test]
    fn test_target_lines_saturate_at_max_line() {
        let a = Annotation::lines("a", "/f", 5, u32::MAX, "x");
        assert_eq!(a.target_lines(), 6..=u32::MAX);
        assert!(!a.target_lines().is_empty());
    }

    #[test]
    fn test_deserialize_store_entry_without_file_level() {
        let json = r#"{
            "id": "old-1",
            "fileUri": "/f.ts",
            "startLine": 0,
            "endLine": 0,
            "category": "bug",
            "body": "old format",
            "createdAt": 1700000000000,
            "resolved": false
        }"#;
        let a: Annotation = serde_json::from_str(json).unwrap();
        assert!(!a.file_level);
        assert_eq!(a.category, Some(AnnotationCategory::Bug));
        assert_eq!(a.created_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_file_note_is_flagged() {
        let a = Annotation::file("f", "/f", "needs review");
        assert!(a.file_level);
        assert_eq!(a.start_line, 0);
    }
}
