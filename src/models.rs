use std::borrow::Cow;
use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A source-syntax family with its own comment delimiters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// `/* ... */` and `// ...` (C, C++, C#, Java, JavaScript, ...).
    CFamily,
    /// `<%-- ... --%>` and `@* ... *@` (ASP.NET, Razor).
    Markup,
    /// `REM ...` and `' ...` lines (Visual Basic).
    Legacy,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::CFamily, Dialect::Markup, Dialect::Legacy];
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::CFamily => write!(f, "c-family"),
            Dialect::Markup => write!(f, "markup"),
            Dialect::Legacy => write!(f, "legacy"),
        }
    }
}

/// The lexical form a comment was matched in. Determines which delimiters
/// [`RawComment::body`] removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `/* ... */`, possibly unterminated at end of input.
    Block,
    /// One or more `//` comments on consecutive lines.
    LineRun,
    /// `<%-- ... --%>`
    ServerBlock,
    /// `@* ... *@`
    RazorBlock,
    /// `REM ...`
    Rem,
    /// `' ...`
    Apostrophe,
    /// The whole file, used only when the whole-file fallback is enabled.
    WholeFile,
}

impl CommentStyle {
    pub fn dialect(&self) -> Option<Dialect> {
        match self {
            CommentStyle::Block | CommentStyle::LineRun => Some(Dialect::CFamily),
            CommentStyle::ServerBlock | CommentStyle::RazorBlock => Some(Dialect::Markup),
            CommentStyle::Rem | CommentStyle::Apostrophe => Some(Dialect::Legacy),
            CommentStyle::WholeFile => None,
        }
    }
}

/// A span of file text lexically identified as a comment.
///
/// `raw` is the exact matched substring, delimiters included. It only lives
/// as long as the file text it borrows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawComment<'a> {
    pub style: CommentStyle,
    pub raw: &'a str,
}

impl<'a> RawComment<'a> {
    pub fn new(style: CommentStyle, raw: &'a str) -> Self {
        Self { style, raw }
    }

    pub fn dialect(&self) -> Option<Dialect> {
        self.style.dialect()
    }

    /// The comment text with its opening and closing delimiters removed.
    pub fn body(&self) -> Cow<'a, str> {
        let raw = self.raw;
        match self.style {
            CommentStyle::Block => {
                let inner = raw.strip_prefix("/*").unwrap_or(raw);
                Cow::Borrowed(inner.strip_suffix("*/").unwrap_or(inner))
            }
            CommentStyle::LineRun => Cow::Owned(
                raw.lines()
                    .map(|line| line.trim_start().trim_start_matches('/'))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            CommentStyle::ServerBlock => {
                let inner = raw.strip_prefix("<%--").unwrap_or(raw);
                Cow::Borrowed(inner.strip_suffix("--%>").unwrap_or(inner))
            }
            CommentStyle::RazorBlock => {
                let inner = raw.strip_prefix("@*").unwrap_or(raw);
                Cow::Borrowed(inner.strip_suffix("*@").unwrap_or(inner))
            }
            CommentStyle::Rem => {
                let trimmed = raw.trim_start();
                Cow::Borrowed(trimmed.get(3..).unwrap_or(""))
            }
            CommentStyle::Apostrophe => {
                let trimmed = raw.trim_start();
                Cow::Borrowed(trimmed.strip_prefix('\'').unwrap_or(trimmed))
            }
            CommentStyle::WholeFile => Cow::Borrowed(raw),
        }
    }
}

/// A comment confirmed to carry license text, after sanitization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseFinding {
    pub text: String,
    pub path: PathBuf,
}

/// Grouping key derived from a finding's text. Never displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LicenseKey(String);

impl LicenseKey {
    pub(crate) fn new(folded: String) -> Self {
        Self(folded)
    }
}

/// One distinct license text and every file it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseGroup {
    #[serde(rename = "licenseText")]
    pub license: String,
    pub files: BTreeSet<PathBuf>,
}

impl LicenseGroup {
    pub fn new(license: String, path: PathBuf) -> Self {
        let mut files = BTreeSet::new();
        files.insert(path);
        Self { license, files }
    }

    /// Fold `other` into `self`: union of files, lexicographically smallest text.
    pub fn absorb(&mut self, other: LicenseGroup) {
        if other.license < self.license {
            self.license = other.license;
        }
        self.files.extend(other.files);
    }
}

impl From<LicenseFinding> for LicenseGroup {
    fn from(finding: LicenseFinding) -> Self {
        LicenseGroup::new(finding.text, finding.path)
    }
}
