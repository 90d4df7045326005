use std::path::Path;

use log::trace;

use crate::engine::merge::LicenseMap;
use crate::error::ScanError;
use crate::extract::CommentExtractor;
use crate::license::classifier::LicenseClassifier;
use crate::models::{Dialect, LicenseFinding};

/// Turns the text of one file into its license findings.
///
/// Holds only compiled, read-only state; the engine shares one instance
/// across all workers behind an `Arc`.
pub struct FileScanner {
    extractor: CommentExtractor,
    classifier: LicenseClassifier,
}

impl FileScanner {
    pub fn new(extractor: CommentExtractor, classifier: LicenseClassifier) -> Self {
        Self {
            extractor,
            classifier,
        }
    }

    /// Build a scanner from configuration values. Fails on an invalid extra
    /// pattern, before any file is touched.
    pub fn from_settings(
        dialects: &[Dialect],
        whole_file_fallback: bool,
        extra_patterns: &[String],
    ) -> Result<Self, ScanError> {
        Ok(Self::new(
            CommentExtractor::new(dialects, whole_file_fallback)?,
            LicenseClassifier::new(extra_patterns)?,
        ))
    }

    pub fn dialects(&self) -> Vec<Dialect> {
        self.extractor.dialects()
    }

    pub fn classifier(&self) -> &LicenseClassifier {
        &self.classifier
    }

    /// Every license finding in `text`, at most one per extracted comment.
    pub fn findings(&self, path: &Path, text: &str) -> Vec<LicenseFinding> {
        self.extractor
            .extract_comments(text)
            .iter()
            .filter_map(|comment| {
                let text = self.classifier.classify(&comment.body())?;
                trace!(
                    "{}: license text in {} comment",
                    path.display(),
                    comment
                        .dialect()
                        .map_or_else(|| "whole-file".to_string(), |d| d.to_string())
                );
                Some(text)
            })
            .map(|text| LicenseFinding {
                text,
                path: path.to_path_buf(),
            })
            .collect()
    }

    /// Per-file result: each distinct license key found in `text`, mapped to
    /// `path` alone. Empty when nothing classifies.
    pub fn scan_text(&self, path: &Path, text: &str) -> LicenseMap {
        self.findings(path, text).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> FileScanner {
        FileScanner::from_settings(&Dialect::ALL, false, &[]).unwrap()
    }

    const NOTICE: &str = "Copyright (C) 2020 Example Corp. Licensed under the MIT License.";

    #[test]
    fn test_notice_found_in_every_dialect() {
        let s = scanner();
        for text in [
            format!("/* {} */\nint x;", NOTICE),
            format!("<%-- {} --%>\n<div/>", NOTICE),
            format!("' {}\nDim x As Integer", NOTICE),
            format!("// {}\nlet x = 1;", NOTICE),
            format!("@* {} *@", NOTICE),
            format!("REM {}", NOTICE),
        ] {
            let findings = s.findings(Path::new("f"), &text);
            assert!(!findings.is_empty(), "no finding in {:?}", text);
            assert!(findings.iter().all(|f| f.text == NOTICE), "{:?}", findings);
        }
    }

    #[test]
    fn test_plain_code_has_no_findings() {
        let text = "function add(a, b) {\n  return a + b;\n}\nconsole.log(add(1, 2));\n";
        assert!(scanner().scan_text(Path::new("add.js"), text).is_empty());
    }

    #[test]
    fn test_non_license_comments_are_dropped() {
        let text = "/* helper */\n// TODO: speed up\n/* Copyright 2020 Foo */";
        let findings = scanner().findings(Path::new("a.c"), text);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].text, "Copyright 2020 Foo");
    }

    #[test]
    fn test_two_blocks_in_one_file_yield_two_groups() {
        let text = "/* Copyright 2020 Foo */\nx();\n/* Portions (C) 2011 Bar, BSD */";
        let map = scanner().scan_text(Path::new("a.c"), text);
        assert_eq!(map.len(), 2);
        for group in map.groups() {
            assert_eq!(group.files.len(), 1);
        }
    }

    #[test]
    fn test_repeated_block_counts_file_once() {
        let text = "/* Copyright 2020 Foo */\n/* Copyright 2020 Foo */";
        let map = scanner().scan_text(Path::new("a.c"), text);
        assert_eq!(map.len(), 1);
        assert_eq!(map.groups()[0].files.len(), 1);
    }

    #[test]
    fn test_whole_file_fallback_is_opt_in() {
        let text = "Copyright 2020 Foo\nMIT";
        assert!(scanner().scan_text(Path::new("LICENSE"), text).is_empty());

        let fallback = FileScanner::from_settings(&Dialect::ALL, true, &[]).unwrap();
        let map = fallback.scan_text(Path::new("LICENSE"), text);
        assert_eq!(map.groups()[0].license, "Copyright 2020 Foo\nMIT");
    }
}
