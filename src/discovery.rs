use std::path::PathBuf;

use glob::{glob_with, MatchOptions};
use log::warn;

use crate::error::ScanError;

/// Expand `pattern` into the sorted list of regular files it matches.
///
/// Matching is case-insensitive unless `case_sensitive` is set. Directories,
/// symlinks and other non-regular entries are dropped, as are entries that
/// cannot be inspected (with a warning).
pub fn discover_files(pattern: &str, case_sensitive: bool) -> Result<Vec<PathBuf>, ScanError> {
    let options = MatchOptions {
        case_sensitive,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    let entries = glob_with(pattern, options).map_err(|source| ScanError::Glob {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("cannot read {}: {}", e.path().display(), e.error());
                continue;
            }
        };
        match std::fs::symlink_metadata(&path) {
            Ok(meta) if meta.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("cannot stat {}: {}", path.display(), e),
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("lib/nested.js")).unwrap();
        std::fs::write(dir.path().join("lib/a.js"), "// a").unwrap();
        std::fs::write(dir.path().join("lib/B.JS"), "// b").unwrap();
        std::fs::write(dir.path().join("lib/c.cs"), "// c").unwrap();
        dir
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_case_insensitive_by_default() {
        let dir = fixture();
        let pattern = format!("{}/**/*.js", dir.path().display());
        let files = discover_files(&pattern, false).unwrap();
        assert_eq!(names(&files), vec!["B.JS", "a.js"]);
    }

    #[test]
    fn test_case_sensitive() {
        let dir = fixture();
        let pattern = format!("{}/**/*.js", dir.path().display());
        let files = discover_files(&pattern, true).unwrap();
        assert_eq!(names(&files), vec!["a.js"]);
    }

    #[test]
    fn test_directories_are_excluded() {
        let dir = fixture();
        let pattern = format!("{}/lib/*", dir.path().display());
        let files = discover_files(&pattern, false).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|p| p.is_file()));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = discover_files("src/***/x", false).unwrap_err();
        assert!(matches!(err, ScanError::Glob { .. }));
    }
}
