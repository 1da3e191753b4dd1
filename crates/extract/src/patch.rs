//! Unified-diff hunk extraction
//!
//! ManySStuBs4J patches change a single statement, so only the first hunk
//! of the first file is read. Its context and removed lines form the
//! "before" snippet; its context and added lines form the "after" snippet.

use crate::{ExtractError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static HUNK_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").expect("valid hunk header regex")
});

/// Before/after text of one hunk, diff markers stripped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HunkSnippets {
    pub source: String,
    pub target: String,
}

/// Reads the first hunk out of a patch
pub trait DiffParser: Send + Sync {
    fn first_hunk(&self, patch: &str) -> Result<HunkSnippets>;
}

/// Line-count driven reader for unified diffs
#[derive(Debug, Clone, Copy, Default)]
pub struct UnifiedDiffParser;

impl UnifiedDiffParser {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HunkHeader {
    source_len: usize,
    target_len: usize,
}

impl HunkHeader {
    fn parse(line: &str) -> Option<Self> {
        let caps = HUNK_HEADER.captures(line)?;
        // A missing length means a single-line range.
        let len = |i: usize| {
            caps.get(i)
                .map_or(Some(1), |m| m.as_str().parse::<usize>().ok())
        };
        Some(Self {
            source_len: len(2)?,
            target_len: len(4)?,
        })
    }
}

impl DiffParser for UnifiedDiffParser {
    fn first_hunk(&self, patch: &str) -> Result<HunkSnippets> {
        let mut lines = patch.split_inclusive('\n');

        let header = lines
            .by_ref()
            .find_map(HunkHeader::parse)
            .ok_or_else(|| ExtractError::Patch("no hunk header found".into()))?;

        let mut snippets = HunkSnippets::default();
        let (mut source_seen, mut target_seen) = (0, 0);

        for line in lines {
            if source_seen >= header.source_len && target_seen >= header.target_len {
                break;
            }
            match line.as_bytes().first() {
                Some(b' ') => {
                    snippets.source.push_str(&line[1..]);
                    snippets.target.push_str(&line[1..]);
                    source_seen += 1;
                    target_seen += 1;
                }
                // Some tools drop the space marker on blank context lines.
                Some(b'\n') | Some(b'\r') => {
                    snippets.source.push_str(line);
                    snippets.target.push_str(line);
                    source_seen += 1;
                    target_seen += 1;
                }
                Some(b'-') => {
                    snippets.source.push_str(&line[1..]);
                    source_seen += 1;
                }
                Some(b'+') => {
                    snippets.target.push_str(&line[1..]);
                    target_seen += 1;
                }
                // "\ No newline at end of file"
                Some(b'\\') => {}
                _ => break,
            }
        }

        if source_seen < header.source_len || target_seen < header.target_len {
            return Err(ExtractError::Patch(format!(
                "hunk shorter than its header: expected -{} +{}, found -{} +{}",
                header.source_len, header.target_len, source_seen, target_seen
            )));
        }

        Ok(snippets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATCH: &str = concat!(
        "diff --git a/src/Foo.java b/src/Foo.java\n",
        "index 1111111..2222222 100644\n",
        "--- a/src/Foo.java\n",
        "+++ b/src/Foo.java\n",
        "@@ -10,3 +10,3 @@ public class Foo {\n",
        "   int size() {\n",
        "-    return count - 1;\n",
        "+    return count;\n",
        "   }\n",
    );

    #[test]
    fn test_first_hunk() {
        let hunk = UnifiedDiffParser::new().first_hunk(PATCH).unwrap();

        assert_eq!(hunk.source, "  int size() {\n    return count - 1;\n  }\n");
        assert_eq!(hunk.target, "  int size() {\n    return count;\n  }\n");
    }

    #[test]
    fn test_single_line_ranges() {
        let patch = "@@ -5 +5 @@\n-foo(a);\n+foo(b);\n";
        let hunk = UnifiedDiffParser::new().first_hunk(patch).unwrap();

        assert_eq!(hunk.source, "foo(a);\n");
        assert_eq!(hunk.target, "foo(b);\n");
    }

    #[test]
    fn test_only_first_hunk_is_read() {
        let patch = "@@ -1,1 +1,1 @@\n-a();\n+b();\n@@ -9,1 +9,1 @@\n-c();\n+d();\n";
        let hunk = UnifiedDiffParser::new().first_hunk(patch).unwrap();

        assert_eq!(hunk.source, "a();\n");
        assert_eq!(hunk.target, "b();\n");
    }

    #[test]
    fn test_no_newline_marker_skipped() {
        let patch = "@@ -1 +1 @@\n-x = 1;\n\\ No newline at end of file\n+x = 2;\n\\ No newline at end of file";
        let hunk = UnifiedDiffParser::new().first_hunk(patch).unwrap();

        assert_eq!(hunk.source, "x = 1;\n");
        assert_eq!(hunk.target, "x = 2;\n");
    }

    #[test]
    fn test_blank_context_line_without_marker() {
        let patch = "@@ -1,2 +1,2 @@\n\n-a;\n+b;\n";
        let hunk = UnifiedDiffParser::new().first_hunk(patch).unwrap();

        assert_eq!(hunk.source, "\na;\n");
        assert_eq!(hunk.target, "\nb;\n");
    }

    #[test]
    fn test_missing_header() {
        let err = UnifiedDiffParser::new().first_hunk("just text\n").unwrap_err();

        assert!(matches!(err, ExtractError::Patch(_)));
    }

    #[test]
    fn test_truncated_hunk() {
        let err = UnifiedDiffParser::new()
            .first_hunk("@@ -1,3 +1,3 @@\n a;\n-b;\n+c;\n")
            .unwrap_err();

        assert!(err.to_string().contains("shorter than its header"));
    }
}
