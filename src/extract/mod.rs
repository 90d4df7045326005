//! Lexical comment extraction.
//!
//! Each [`Dialect`] has one [`DialectExtractor`] that scans the whole text on
//! its own. [`CommentExtractor`] runs the enabled ones and returns the union of
//! their matches; overlapping spans found by different dialects are all kept.
//!
//! - [`c_family`] — hand-written lexer for `/* */` and `//`, string-literal aware.
//! - [`markup`] — `<%-- --%>` and `@* *@` spans.
//! - [`legacy`] — Visual Basic `REM` and `'` lines.

use crate::error::ScanError;
use crate::models::{CommentStyle, Dialect, RawComment};

pub mod c_family;
pub mod legacy;
pub mod markup;

/// Finds comments of a single dialect.
///
/// Implementations hold only immutable state so one instance can be shared by
/// every worker.
pub trait DialectExtractor: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Append every comment found in `text` to `out`.
    fn extract<'a>(&self, text: &'a str, out: &mut Vec<RawComment<'a>>);
}

pub struct CommentExtractor {
    rules: Vec<Box<dyn DialectExtractor>>,
    whole_file_fallback: bool,
}

impl CommentExtractor {
    /// Build an extractor for `dialects`. Duplicate dialects are ignored.
    pub fn new(dialects: &[Dialect], whole_file_fallback: bool) -> Result<Self, ScanError> {
        let mut enabled = dialects.to_vec();
        enabled.sort();
        enabled.dedup();

        let mut rules: Vec<Box<dyn DialectExtractor>> = Vec::with_capacity(enabled.len());
        for dialect in enabled {
            let rule: Box<dyn DialectExtractor> = match dialect {
                Dialect::CFamily => Box::new(c_family::CFamilyExtractor::new()),
                Dialect::Markup => Box::new(markup::MarkupExtractor::new()?),
                Dialect::Legacy => Box::new(legacy::LegacyExtractor::new()?),
            };
            rules.push(rule);
        }

        Ok(Self {
            rules,
            whole_file_fallback,
        })
    }

    pub fn dialects(&self) -> Vec<Dialect> {
        self.rules.iter().map(|r| r.dialect()).collect()
    }

    pub fn extract_comments<'a>(&self, text: &'a str) -> Vec<RawComment<'a>> {
        let mut comments = Vec::new();
        for rule in &self.rules {
            rule.extract(text, &mut comments);
        }

        if comments.is_empty() && self.whole_file_fallback && !text.trim().is_empty() {
            comments.push(RawComment::new(CommentStyle::WholeFile, text));
        }

        comments
    }
}

/// Compile one of the built-in patterns, mapping failure to the startup error kind.
pub(crate) fn compile(pattern: &str) -> Result<regex::Regex, ScanError> {
    regex::Regex::new(pattern).map_err(|source| ScanError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
