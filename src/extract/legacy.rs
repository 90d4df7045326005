use regex::Regex;

use crate::error::ScanError;
use crate::models::{CommentStyle, Dialect, RawComment};

/// Extractor for Visual Basic line comments.
///
/// A line is a comment when, after optional blanks, it starts with the word
/// `REM` (any case) or with `'`. Apostrophe lines that contain a second `'`
/// are treated as string-bearing code and skipped.
pub struct LegacyExtractor {
    rem_line: Regex,
    quote_line: Regex,
}

impl LegacyExtractor {
    pub fn new() -> Result<Self, ScanError> {
        Ok(Self {
            rem_line: super::compile(r"(?im)^[ \t]*REM\b[^\r\n]+")?,
            quote_line: super::compile(r"(?m)^([ \t]*'[^'\r\n]+)\r?$")?,
        })
    }
}

impl super::DialectExtractor for LegacyExtractor {
    fn dialect(&self) -> Dialect {
        Dialect::Legacy
    }

    fn extract<'a>(&self, text: &'a str, out: &mut Vec<RawComment<'a>>) {
        out.extend(
            self.rem_line
                .find_iter(text)
                .map(|m| RawComment::new(CommentStyle::Rem, m.as_str())),
        );
        out.extend(
            self.quote_line
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| RawComment::new(CommentStyle::Apostrophe, m.as_str())),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::DialectExtractor;

    fn extract(text: &str) -> Vec<RawComment<'_>> {
        let mut out = Vec::new();
        LegacyExtractor::new().unwrap().extract(text, &mut out);
        out
    }

    #[test]
    fn test_rem_lines_any_case() {
        let text = "REM Copyright 2001\r\n  rem second\nDim remote As Integer\nREMARK no\n";
        let comments = extract(text);
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].raw, "REM Copyright 2001");
        assert_eq!(comments[1].raw, "  rem second");
    }

    #[test]
    fn test_apostrophe_lines() {
        let text = "' Copyright (C) 2020 Foo\r\nx = 1 ' trailing is not matched\n    ' indented\n";
        let comments = extract(text);
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0], RawComment::new(CommentStyle::Apostrophe, "' Copyright (C) 2020 Foo"));
        assert_eq!(comments[1].raw, "    ' indented");
    }

    #[test]
    fn test_quoted_strings_are_not_comments() {
        assert!(extract("'use strict';\n  'a', 'b',\n").is_empty());
    }

    #[test]
    fn test_bare_rem_is_not_a_comment() {
        assert!(extract("REM\n").is_empty());
    }
}
