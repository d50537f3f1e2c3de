use std::path::{Path, PathBuf};

use crate::error::ExtractError;

/// An immutable snapshot of the declaration file.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
    /// Byte offsets where each line starts (0-indexed into content)
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ExtractError::SourceUnreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_string(path.to_path_buf(), content))
    }

    /// Create a SourceFile from a string, using the given path for display purposes.
    pub fn from_string(path: PathBuf, content: String) -> Self {
        let line_starts = compute_line_starts(content.as_bytes());
        Self {
            path,
            content,
            line_starts,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Convert a byte offset into a (1-indexed line, 1-indexed column) pair.
    /// Column counts UTF-8 characters, matching what editors show.
    pub fn offset_to_line_col(&self, byte_offset: usize) -> (usize, usize) {
        let byte_offset = byte_offset.min(self.content.len());
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let line_bytes = &self.content.as_bytes()[self.line_starts[line_idx]..byte_offset];
        let col = line_bytes.iter().filter(|&&b| (b & 0xC0) != 0x80).count();
        (line_idx + 1, col + 1)
    }

    pub fn path_str(&self) -> &str {
        self.path.to_str().unwrap_or("<non-utf8 path>")
    }
}

fn compute_line_starts(content: &[u8]) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, &byte) in content.iter().enumerate() {
        if byte == b'\n' && i + 1 < content.len() {
            starts.push(i + 1);
        }
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(s: &str) -> SourceFile {
        SourceFile::from_string(PathBuf::from("expr_sema.go"), s.to_string())
    }

    #[test]
    fn line_starts_multiple_lines() {
        let sf = source("abc\ndef\nghi");
        assert_eq!(sf.line_starts, vec![0, 4, 8]);
    }

    #[test]
    fn line_starts_trailing_newline() {
        let sf = source("abc\n");
        assert_eq!(sf.line_starts, vec![0]);
    }

    #[test]
    fn offset_to_line_col_positions() {
        let sf = source("abc\ndef\nghi");
        assert_eq!(sf.offset_to_line_col(0), (1, 1));
        assert_eq!(sf.offset_to_line_col(2), (1, 3));
        assert_eq!(sf.offset_to_line_col(4), (2, 1));
        assert_eq!(sf.offset_to_line_col(9), (3, 2));
    }

    #[test]
    fn offset_past_end_is_clamped() {
        let sf = source("ab\ncd");
        assert_eq!(sf.offset_to_line_col(100), (2, 3));
    }

    #[test]
    fn columns_count_characters() {
        let sf = source("\"é\" x");
        // 'x' is at byte 5 but character 4
        assert_eq!(sf.offset_to_line_col(5), (1, 5));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("expr_sema.go");
        std::fs::write(&file, "package actionlint\n").unwrap();
        let sf = SourceFile::from_path(&file).unwrap();
        assert_eq!(sf.as_str(), "package actionlint\n");
        assert_eq!(sf.path, file);
    }

    #[test]
    fn from_path_nonexistent() {
        let err = SourceFile::from_path(Path::new("/nonexistent/expr_sema.go")).unwrap_err();
        assert!(matches!(err, ExtractError::SourceUnreadable { .. }));
    }

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn line_starts_follow_newlines(content in "[a-z\\n]{0,300}") {
                let starts = compute_line_starts(content.as_bytes());
                prop_assert_eq!(starts[0], 0);
                for &start in &starts[1..] {
                    prop_assert!(start > 0 && content.as_bytes()[start - 1] == b'\n');
                }
            }

            #[test]
            fn offset_to_line_col_is_monotonic(content in "[\\x00-\\x7f\\u{80}-\\u{10FFFF}]{1,200}") {
                let sf = source(&content);
                let mut prev = (0usize, 0usize);
                for offset in 0..=content.len() {
                    if !content.is_char_boundary(offset) {
                        continue;
                    }
                    let cur = sf.offset_to_line_col(offset);
                    prop_assert!(cur >= prev, "offset {} -> {:?} after {:?}", offset, cur, prev);
                    prev = cur;
                }
            }
        }
    }
}
