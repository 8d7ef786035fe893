//! Rewrites the article array embedded in the news page.
//!
//! The page ships its data inline as `const <identifier> = [ ... ];`. Only the
//! bracketed literal is replaced; every byte before the `[` and after the
//! matching `]` is kept as is.
//!
//! # Finding the end of the literal
//!
//! The closing bracket is found by a structural scan rather than by searching
//! for `];`: bracket depth is tracked outside of string literals (`"`, `'`,
//! and backtick quotes, with backslash escapes), so article text containing
//! `]` or `];` cannot end the literal early. Line and block comments are
//! skipped the same way. All delimiters are ASCII, so the scan can walk bytes
//! without splitting multi-byte characters.
//!
//! An article title may itself contain `const <identifier> = [`. Such a match
//! lies inside the literal found for the real assignment and is ignored, so a
//! page written by one run can be patched again by the next.

use crate::error::{Error, Result};
use crate::utils::write_atomic;
use regex::Regex;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// Byte range of the array literal, `[` through the matching `]` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

fn check_identifier(identifier: &str) -> Result<()> {
    let mut chars = identifier.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{identifier:?} is not a usable JavaScript identifier"
        )))
    }
}

/// Index one past the `]` closing the array opened at `open`.
///
/// `//` and `/* */` comments outside strings are skipped.
fn literal_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut escaped = false;
    let mut i = open;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        match (b, bytes.get(i + 1).copied()) {
            (b'/', Some(b'/')) => {
                let newline = bytes[i..].iter().position(|&c| c == b'\n')?;
                i += newline;
            }
            (b'/', Some(b'*')) => {
                let close = bytes[i + 2..].windows(2).position(|w| w == b"*/")?;
                i += 2 + close + 1;
            }
            (b'"' | b'\'' | b'`', _) => quote = Some(b),
            (b'[', _) => depth += 1,
            (b']', _) => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Locate the literal assigned to `const <identifier>`.
///
/// Heads are taken in document order; a head that falls inside a literal
/// already located (for example in an article title) is part of that
/// literal's data and is not counted.
///
/// # Errors
///
/// - [`Error::PatchTargetNotFound`] when no assignment matches
/// - [`Error::PatchTargetAmbiguous`] when more than one does
/// - [`Error::PatchTargetUnterminated`] when the literal never closes
pub fn locate_assignment(doc: &str, identifier: &str) -> Result<Span> {
    check_identifier(identifier)?;
    let pattern = format!(r"\bconst\s+{}\s*=\s*\[", regex::escape(identifier));
    let re = Regex::new(&pattern).map_err(|e| Error::Config(e.to_string()))?;

    let mut targets: Vec<(usize, Option<usize>)> = Vec::new();
    let mut covered_until = 0;
    for m in re.find_iter(doc) {
        if m.start() < covered_until {
            continue;
        }
        let start = m.end() - 1;
        let end = literal_end(doc.as_bytes(), start);
        covered_until = end.unwrap_or(doc.len());
        targets.push((start, end));
    }

    match targets.as_slice() {
        [] => Err(Error::PatchTargetNotFound {
            identifier: identifier.to_string(),
        }),
        [(start, Some(end))] => {
            debug!(start, end, "Located embedded array literal");
            Ok(Span {
                start: *start,
                end: *end,
            })
        }
        [(_, None)] => Err(Error::PatchTargetUnterminated {
            identifier: identifier.to_string(),
        }),
        many => Err(Error::PatchTargetAmbiguous {
            identifier: identifier.to_string(),
            count: many.len(),
        }),
    }
}

/// Return `doc` with the literal assigned to `identifier` replaced by `literal`.
pub fn patch_document(doc: &str, identifier: &str, literal: &str) -> Result<String> {
    let Span { start, end } = locate_assignment(doc, identifier)?;
    let mut out = String::with_capacity(doc.len() - (end - start) + literal.len());
    out.push_str(&doc[..start]);
    out.push_str(literal);
    out.push_str(&doc[end..]);
    Ok(out)
}

/// A computed but not yet written patch of a page.
#[derive(Debug)]
pub struct PatchPlan {
    pub path: PathBuf,
    pub original: String,
    pub patched: String,
}

impl PatchPlan {
    pub fn changed(&self) -> bool {
        self.original != self.patched
    }

    /// Write the patched page. Returns whether the file changed.
    pub async fn apply(&self) -> Result<bool> {
        if !self.changed() {
            info!(path = %self.path.display(), "HTML already up to date");
            return Ok(false);
        }
        write_atomic(&self.path, self.patched.as_bytes()).await?;
        info!(path = %self.path.display(), bytes = self.patched.len(), "Patched HTML file");
        Ok(true)
    }
}

/// Read the page at `path` and compute its patched contents.
#[instrument(level = "info", skip(literal), fields(path = %path.display()))]
pub async fn plan(path: &Path, identifier: &str, literal: &str) -> Result<PatchPlan> {
    let original = fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    let patched = patch_document(&original, identifier, literal)?;
    Ok(PatchPlan {
        path: path.to_path_buf(),
        original,
        patched,
    })
}

/// Patch the page at `path` in place. Nothing is written on error.
pub async fn patch_file(path: &Path, identifier: &str, literal: &str) -> Result<bool> {
    plan(path, identifier, literal).await?.apply().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PAGE: &str = "<html>\n<script>\n  const defaultData = [\n    {\"title\": \"旧\"}\n  ];\n  render(defaultData);\n</script>\n</html>\n";

    #[test]
    fn test_replaces_only_the_literal() {
        let out = patch_document(PAGE, "defaultData", "[1, 2]").unwrap();
        assert_eq!(
            out,
            "<html>\n<script>\n  const defaultData = [1, 2];\n  render(defaultData);\n</script>\n</html>\n"
        );
    }

    #[test]
    fn test_prefix_and_suffix_untouched() {
        let span = locate_assignment(PAGE, "defaultData").unwrap();
        let out = patch_document(PAGE, "defaultData", "[\"新\"]").unwrap();
        assert!(out.starts_with(&PAGE[..span.start]));
        assert!(out.ends_with(&PAGE[span.end..]));
        assert_eq!(&PAGE[span.start..span.start + 1], "[");
        assert_eq!(&PAGE[span.end - 1..span.end], "]");
    }

    #[test]
    fn test_delimiter_inside_strings() {
        let doc = "const embeddedData = [{\"t\": \"a ]; b\"}, {\"t\": 'x [ y'}, {\"t\": \"esc \\\" ];\"}];\nconst other = 1;\n";
        let out = patch_document(doc, "embeddedData", "[]").unwrap();
        assert_eq!(out, "const embeddedData = [];\nconst other = 1;\n");
    }

    #[test]
    fn test_nested_arrays() {
        let doc = "const defaultData = [[1, [2]], [3]];tail";
        assert_eq!(patch_document(doc, "defaultData", "[]").unwrap(), "const defaultData = [];tail");
    }

    #[test]
    fn test_not_found() {
        let err = patch_document("<p>no data here</p>", "defaultData", "[]").unwrap_err();
        assert!(matches!(err, Error::PatchTargetNotFound { .. }));

        // A longer identifier sharing the prefix is not a match.
        let err = patch_document("const defaultDataV2 = [];", "defaultData", "[]").unwrap_err();
        assert!(matches!(err, Error::PatchTargetNotFound { .. }));
    }

    #[test]
    fn test_ambiguous() {
        let doc = "const defaultData = [];\nconst defaultData = [1];\n";
        let err = patch_document(doc, "defaultData", "[]").unwrap_err();
        assert!(matches!(err, Error::PatchTargetAmbiguous { count: 2, .. }));
    }

    #[test]
    fn test_unterminated() {
        let err = patch_document("const defaultData = [{\"a\": 1}", "defaultData", "[]").unwrap_err();
        assert!(matches!(err, Error::PatchTargetUnterminated { .. }));
    }

    #[test]
    fn test_assignment_text_inside_title() {
        let doc = "const defaultData = [{\"title\": \"how to write const defaultData = [ in js\"}];\n";
        let out = patch_document(doc, "defaultData", "[]").unwrap();
        assert_eq!(out, "const defaultData = [];\n");

        let literal = "[{\"title\": \"前端教程: const defaultData = [ 的写法\"}]";
        let once = patch_document(PAGE, "defaultData", literal).unwrap();
        let twice = patch_document(&once, "defaultData", literal).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_comments_inside_literal() {
        let doc = "const defaultData = [\n  // don't edit\n  1, /* ] */ 2\n];\nrender();\n";
        let out = patch_document(doc, "defaultData", "[3]").unwrap();
        assert_eq!(out, "const defaultData = [3];\nrender();\n");

        let err = patch_document("const defaultData = [1, /* ]", "defaultData", "[]").unwrap_err();
        assert!(matches!(err, Error::PatchTargetUnterminated { .. }));
    }

    #[test]
    fn test_rejects_bad_identifier() {
        let err = patch_document(PAGE, "default Data", "[]").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_patch_is_idempotent() {
        let literal = "[\n  {\n    \"title\": \"智能招聘 ];\"\n  }\n]";
        let once = patch_document(PAGE, "defaultData", literal).unwrap();
        let twice = patch_document(&once, "defaultData", literal).unwrap();
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_patch_file_writes_and_reports_change() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, PAGE).unwrap();

        assert!(patch_file(&path, "defaultData", "[42]").await.unwrap());
        let first = std::fs::read_to_string(&path).unwrap();
        assert!(first.contains("const defaultData = [42];"));

        assert!(!patch_file(&path, "defaultData", "[42]").await.unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
    }

    #[tokio::test]
    async fn test_failed_patch_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        let doc = "const defaultData = [];\nconst defaultData = [];\n";
        std::fs::write(&path, doc).unwrap();

        let err = patch_file(&path, "defaultData", "[1]").await.unwrap_err();
        assert!(matches!(err, Error::PatchTargetAmbiguous { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), doc);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = patch_file(&dir.path().join("absent.html"), "defaultData", "[]")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
