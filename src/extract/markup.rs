use regex::Regex;

use crate::error::ScanError;
use crate::models::{CommentStyle, Dialect, RawComment};

/// Extractor for server-side markup comments: ASP.NET `<%-- ... --%>` and
/// Razor `@* ... *@`. Both may span lines and stop at the first closing
/// delimiter.
pub struct MarkupExtractor {
    server_block: Regex,
    razor_block: Regex,
}

impl MarkupExtractor {
    pub fn new() -> Result<Self, ScanError> {
        Ok(Self {
            server_block: super::compile(r"(?s)<%--.*?--%>")?,
            razor_block: super::compile(r"(?s)@\*.*?\*@")?,
        })
    }
}

impl super::DialectExtractor for MarkupExtractor {
    fn dialect(&self) -> Dialect {
        Dialect::Markup
    }

    fn extract<'a>(&self, text: &'a str, out: &mut Vec<RawComment<'a>>) {
        out.extend(
            self.server_block
                .find_iter(text)
                .map(|m| RawComment::new(CommentStyle::ServerBlock, m.as_str())),
        );
        out.extend(
            self.razor_block
                .find_iter(text)
                .map(|m| RawComment::new(CommentStyle::RazorBlock, m.as_str())),
        );
    }
}
