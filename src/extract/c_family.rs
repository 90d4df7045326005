use crate::models::{CommentStyle, Dialect, RawComment};

/// Extractor for `/* ... */` block comments and `//` line comments.
///
/// Block comments do not nest; an unterminated one runs to the end of the
/// text. `//` comments on consecutive lines are reported as one
/// [`CommentStyle::LineRun`]. String literals (`"` and `` ` ``) and short
/// character literals (`'x'`, `'\n'`) are skipped so delimiters inside them
/// are not treated as comments. A `'` with no closing quote nearby (a
/// lifetime, an apostrophe in prose) is ordinary text.
pub struct CFamilyExtractor;

impl CFamilyExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl super::DialectExtractor for CFamilyExtractor {
    fn dialect(&self) -> Dialect {
        Dialect::CFamily
    }

    fn extract<'a>(&self, text: &'a str, out: &mut Vec<RawComment<'a>>) {
        let bytes = text.as_bytes();
        let mut i = 0;
        // Start and end of the `//` run being accumulated.
        let mut run: Option<(usize, usize)> = None;

        while i < bytes.len() {
            match bytes[i] {
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    flush_run(text, &mut run, out);
                    let end = find(bytes, i + 2, b"*/").map_or(bytes.len(), |pos| pos + 2);
                    out.push(RawComment::new(CommentStyle::Block, &text[i..end]));
                    i = end;
                }
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    let end = line_end(bytes, i);
                    run = match run {
                        Some((start, prev_end)) if continues_run(&text[prev_end..i]) => {
                            Some((start, end))
                        }
                        _ => {
                            flush_run(text, &mut run, out);
                            Some((i, end))
                        }
                    };
                    i = end;
                }
                b'\'' => i = skip_char_literal(bytes, i),
                quote @ (b'"' | b'`') => i = skip_string(bytes, i, quote),
                _ => i += 1,
            }
        }

        flush_run(text, &mut run, out);
    }
}

/// Two line comments belong to one run when only whitespace and a single
/// line break separate them.
fn continues_run(gap: &str) -> bool {
    gap.trim().is_empty() && gap.matches('\n').count() == 1
}

fn flush_run<'a>(text: &'a str, run: &mut Option<(usize, usize)>, out: &mut Vec<RawComment<'a>>) {
    if let Some((start, end)) = run.take() {
        out.push(RawComment::new(CommentStyle::LineRun, &text[start..end]));
    }
}

/// Index of the end of the line containing `from`, excluding any `\r\n`.
fn line_end(bytes: &[u8], from: usize) -> usize {
    let mut end = bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |pos| from + pos);
    if end > from && bytes[end - 1] == b'\r' {
        end -= 1;
    }
    end
}

fn find(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from >= bytes.len() {
        return None;
    }
    bytes[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| from + pos)
}

/// Return the index just past the string literal opened at `start`.
///
/// `"` literals stop at an unescaped line break so a stray quote in prose
/// cannot swallow the rest of the file; template literals may span lines.
fn skip_string(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'\n' if quote != b'`' => return j,
            b if b == quote => return j + 1,
            _ => j += 1,
        }
    }
    bytes.len()
}

/// Longest character literal body recognised, as in `'\u{10FFFF}'`.
const MAX_CHAR_LITERAL: usize = 10;

/// Return the index just past the character literal opened at `start`, or
/// `start + 1` when no closing `'` follows within [`MAX_CHAR_LITERAL`] bytes
/// on the same line.
fn skip_char_literal(bytes: &[u8], start: usize) -> usize {
    let limit = (start + 1 + MAX_CHAR_LITERAL).min(bytes.len());
    let mut j = start + 1;
    while j < limit {
        match bytes[j] {
            b'\\' => j += 2,
            b'\n' => break,
            b'\'' => return j + 1,
            _ => j += 1,
        }
    }
    start + 1
}
