use regex::Regex;

use crate::error::ScanError;

/// Keyword patterns that only count as whole words.
///
/// ref: https://en.wikipedia.org/wiki/Comparison_of_free_and_open-source_software_licenses
const WORD_PATTERNS: &[&str] = &[
    r"v?\d+(?:\.\d+){2,}",
    r"copy\s*right\w*",
    r"licen[cs]e\w*",
    r"(?:all\s+)?rights\s+reserved",
    r"warrant\w*",
    r"liabilit\w*",
    "MIT",
    "BSD",
    r"[AL]?GPL(?:v\d)?",
    "Unlicense",
    "ISC",
    "CC-BY",
    r"Creative\s+Commons",
    "CeCILL",
    "WTFPL",
    r"Public\s+Domain",
    "Permissive",
    "Copylefted",
    r"Free\s+Software",
    r"Open\s+Source",
    r"Free\s+License",
    r"With\s+restrictions",
];

/// Marks that are not word characters, so word boundaries would never match
/// around them.
const MARK_PATTERNS: &[&str] = &[r"\(C\)", "©", "™", "®"];

/// Decides whether a comment carries license text and cleans it up for display.
///
/// The compiled pattern is matched through `Regex`'s stateless API, so a single
/// classifier is shared by every worker.
#[derive(Debug, Clone)]
pub struct LicenseClassifier {
    pattern: Regex,
}

impl LicenseClassifier {
    /// Build the classifier from the built-in keyword set plus `extra` user
    /// patterns. Extra patterns are case-insensitive and matched as written.
    pub fn new(extra: &[String]) -> Result<Self, ScanError> {
        let mut alternatives = vec![
            format!(r"\b(?:{})\b", WORD_PATTERNS.join("|")),
            format!("(?:{})", MARK_PATTERNS.join("|")),
        ];

        for pattern in extra {
            // Validate each one on its own so the error names the culprit.
            Regex::new(pattern).map_err(|source| ScanError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            alternatives.push(format!("(?:{})", pattern));
        }

        let source = format!("(?i){}", alternatives.join("|"));
        let pattern = Regex::new(&source).map_err(|source_err| ScanError::InvalidPattern {
            pattern: source.clone(),
            source: source_err,
        })?;

        Ok(Self { pattern })
    }

    /// The combined keyword pattern, used by reporters for highlighting.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn is_license(&self, fragment: &str) -> bool {
        self.pattern.is_match(fragment)
    }

    /// Return the sanitized text of `fragment` if it mentions any license
    /// keyword. A fragment that is empty after sanitizing yields nothing.
    pub fn classify(&self, fragment: &str) -> Option<String> {
        if !self.is_license(fragment) {
            return None;
        }
        let text = sanitize(fragment);
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Clean comment text for display.
///
/// Strips the leading run of blanks and `*` continuation markers from every
/// line, blanks out decorative separator lines made only of `@ # = -`,
/// collapses repeated blank lines and trims the result.
pub fn sanitize(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        let stripped = line
            .trim_start_matches(|c: char| c.is_whitespace() || c == '*')
            .trim_end();
        let line = if is_decorative(stripped) { "" } else { stripped };

        if line.is_empty() && lines.last().map_or(true, |prev| prev.is_empty()) {
            continue;
        }
        lines.push(line);
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

fn is_decorative(line: &str) -> bool {
    line.chars()
        .all(|c| c.is_whitespace() || matches!(c, '@' | '#' | '=' | '-'))
}
