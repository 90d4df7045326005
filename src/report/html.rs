use std::fmt::Write as _;
use std::path::Path;

use regex::Regex;

use crate::error::ScanError;
use crate::models::LicenseGroup;

const STYLE: &str = r#"
        table {
            border-collapse: collapse;
        }

        table, th, td {
            border: 1px solid #AAAAAA;
        }

        tr:hover {
            background: #f0f0f5;
        }
"#;

/// Render `groups` as an HTML table and write it to `output`.
pub fn render(groups: &[LicenseGroup], keywords: &Regex, output: &Path) -> Result<(), ScanError> {
    std::fs::write(output, build_html(groups, keywords)).map_err(|source| ScanError::OutputWrite {
        path: output.to_path_buf(),
        source,
    })
}

/// One row per group: the file list and the license text with keywords
/// highlighted. `groups` is expected in report order.
pub fn build_html(groups: &[LicenseGroup], keywords: &Regex) -> String {
    let mut rows = String::new();
    for group in groups {
        let files = group
            .files
            .iter()
            .map(|p| escape(&p.display().to_string()))
            .collect::<Vec<_>>()
            .join("<br>");
        let license = highlight(&group.license, keywords);

        // Writing into a String cannot fail.
        let _ = write!(
            rows,
            r#"
                <tr>
                    <td style="vertical-align: top">{files}</td>
                    <td style="vertical-align: top">{license}</td>
                </tr>"#
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html>
    <head>
        <meta charset="utf-8">
        <title>Search license results</title>
        <style>{STYLE}        </style>
    </head>
    <body>
        <table border="1">
            <thead>
                <tr>
                    <th>Files</th>
                    <th>License</th>
                </tr>
            </thead>
            <tbody>{rows}
            </tbody>
        </table>
    </body>
</html>
"#
    )
}

/// Escape `text` and wrap every keyword match in a highlighted `<b>`.
/// Matching runs on the raw text so escaping cannot split a keyword.
fn highlight(text: &str, keywords: &Regex) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in keywords.find_iter(text) {
        out.push_str(&to_html(&text[last..m.start()]));
        out.push_str(r#"<b style="background-color: yellow">"#);
        out.push_str(&to_html(m.as_str()));
        out.push_str("</b>");
        last = m.end();
    }
    out.push_str(&to_html(&text[last..]));
    out
}

fn to_html(text: &str) -> String {
    escape(text).replace("\r\n", "<br>").replace('\n', "<br>")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license::classifier::LicenseClassifier;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    fn group(license: &str, files: &[&str]) -> LicenseGroup {
        LicenseGroup {
            license: license.to_string(),
            files: files.iter().map(PathBuf::from).collect::<BTreeSet<_>>(),
        }
    }

    fn keywords() -> Regex {
        LicenseClassifier::new(&[]).unwrap().pattern().clone()
    }

    #[test]
    fn test_rows_and_files() {
        let html = build_html(&[group("MIT License", &["b.js", "a.js"])], &keywords());
        assert!(html.contains("<th>Files</th>"));
        assert!(html.contains("a.js<br>b.js"));
        assert!(html.contains(r#"<b style="background-color: yellow">MIT</b>"#));
    }

    #[test]
    fn test_text_is_escaped_and_line_broken() {
        let html = build_html(
            &[group("Copyright <Foo> & Co\nAll rights reserved", &["x.aspx"])],
            &keywords(),
        );
        assert!(html.contains("&lt;Foo&gt; &amp; Co<br>"));
        assert!(!html.contains("<Foo>"));
    }

    #[test]
    fn test_empty_report_is_valid_table() {
        let html = build_html(&[], &keywords());
        assert!(html.contains("<tbody>"));
        assert!(!html.contains("<td"));
    }

    #[test]
    fn test_write_failure_is_reported() {
        let err = render(&[], &keywords(), Path::new("/nonexistent-dir/report.html")).unwrap_err();
        assert!(matches!(err, ScanError::OutputWrite { .. }));
    }
}
